use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codescribe::cli::GenerateOptions;
use codescribe::config::{Config, ConfigLoader};
use codescribe::prompt::{DocStyle, OutputLanguage};

/// Parse output language from string
fn parse_output_language(s: &str) -> Result<OutputLanguage, String> {
    match s.to_lowercase().as_str() {
        "en" | "english" => Ok(OutputLanguage::English),
        "zh" | "chinese" => Ok(OutputLanguage::Chinese),
        _ => Err(format!("Invalid language '{}'. Valid values: en, zh", s)),
    }
}

/// Parse documentation style from string
fn parse_doc_style(s: &str) -> Result<DocStyle, String> {
    match s.to_lowercase().as_str() {
        "manual" => Ok(DocStyle::Manual),
        "tutorial" => Ok(DocStyle::Tutorial),
        "api" => Ok(DocStyle::Api),
        "comment" => Ok(DocStyle::Comment),
        "insight" => Ok(DocStyle::Insight),
        _ => Err(format!(
            "Invalid style '{}'. Valid values: manual, tutorial, api, comment, insight",
            s
        )),
    }
}

#[derive(Parser)]
#[command(name = "codescribe")]
#[command(version, about = "AI documentation generator for codebases")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, help = "Load configuration from this file only")]
    config: Option<PathBuf>,

    #[arg(long, short, help = "Output directory override")]
    output: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Document a single source file
    File {
        #[arg(help = "Path to the source file")]
        path: PathBuf,
        #[arg(long, short, default_value = "zh", value_parser = parse_output_language, help = "Output language: en, zh")]
        lang: OutputLanguage,
        #[arg(long, short, default_value = "manual", value_parser = parse_doc_style, help = "Style: manual, tutorial, api, comment, insight")]
        style: DocStyle,
    },

    /// Document a zip archive of source code
    Zip {
        #[arg(help = "Path to the zip archive")]
        path: PathBuf,
        #[arg(long, short, default_value = "zh", value_parser = parse_output_language, help = "Output language: en, zh")]
        lang: OutputLanguage,
        #[arg(long, short, default_value = "manual", value_parser = parse_doc_style, help = "Style: manual, tutorial, api, comment, insight")]
        style: DocStyle,
    },

    /// Document a GitHub repository
    Repo {
        #[arg(help = "Repository URL or owner/name")]
        reference: String,
        #[arg(long, short, default_value = "zh", value_parser = parse_output_language, help = "Output language: en, zh")]
        lang: OutputLanguage,
        #[arg(long, short, default_value = "manual", value_parser = parse_doc_style, help = "Style: manual, tutorial, api, comment, insight")]
        style: DocStyle,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show,
    /// Show configuration file paths
    Path,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            codescribe::cli::report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> codescribe::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(dir) = &cli.output {
        config.output.dir = dir.clone();
    }
    Ok(config)
}

fn run_cli() -> codescribe::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::File { path, lang, style } => {
            let rt = Runtime::new()?;
            rt.block_on(codescribe::cli::run_file(
                &path,
                &config,
                GenerateOptions {
                    language: lang,
                    style,
                },
            ))?;
        }
        Commands::Zip { path, lang, style } => {
            let rt = Runtime::new()?;
            rt.block_on(codescribe::cli::run_zip(
                &path,
                &config,
                GenerateOptions {
                    language: lang,
                    style,
                },
            ))?;
        }
        Commands::Repo {
            reference,
            lang,
            style,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(codescribe::cli::run_repo(
                &reference,
                &config,
                GenerateOptions {
                    language: lang,
                    style,
                },
            ))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                codescribe::cli::run_config_show(&config)?;
            }
            ConfigAction::Path => {
                codescribe::cli::run_config_path();
            }
        },
    }

    Ok(())
}
