//! Command Implementations
//!
//! One function per subcommand. Each command builds its own file mapping,
//! runs one generation, persists the Markdown artifact, and reports the
//! written path. Failures surface as structured errors with user-facing
//! messages; no failure is process-fatal beyond the current request.

use std::path::Path;

use tracing::info;

use super::output::Output;
use crate::ai::create_provider;
use crate::config::{Config, ConfigLoader};
use crate::generator::{DocumentationGenerator, output_file_name, write_markdown};
use crate::ingest::{self, ExtractOptions, GithubClient, RepoRef};
use crate::prompt::{DocStyle, OutputLanguage, ProjectKind};
use crate::types::{Result, ScribeError};

/// User-selected generation options shared by all commands
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub language: OutputLanguage,
    pub style: DocStyle,
}

fn generator_for(config: &Config) -> Result<DocumentationGenerator> {
    let provider = create_provider(&config.llm)?;
    Ok(DocumentationGenerator::new(provider))
}

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or_else(|| ScribeError::invalid_input(format!("invalid path: {}", path.display())))
}

fn report_written(out: &Output, path: &Path) {
    out.success(&format!("Documentation written to {}", path.display()));
}

// =============================================================================
// file: single source file
// =============================================================================

pub async fn run_file(path: &Path, config: &Config, options: GenerateOptions) -> Result<()> {
    let out = Output::new();
    let filename = file_name_of(path)?;

    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes).into_owned();

    out.info(&format!("Generating {} documentation for {}", options.style.as_str(), filename));

    let generator = generator_for(config)?;
    let docs = generator
        .generate_single(&filename, &content, options.language, options.style)
        .await?;

    let written = write_markdown(&config.output.dir, "output.md", &docs)?;
    report_written(&out, &written);
    Ok(())
}

// =============================================================================
// zip: uploaded archive
// =============================================================================

pub async fn run_zip(path: &Path, config: &Config, options: GenerateOptions) -> Result<()> {
    let out = Output::new();
    let filename = file_name_of(path)?;
    let project_name = filename.strip_suffix(".zip").unwrap_or(&filename);

    let bytes = std::fs::read(path)?;
    let extraction = ingest::extract(&bytes, ExtractOptions::upload())?;

    if extraction.is_empty() {
        return Err(ScribeError::EmptyResult);
    }
    out.info(&format!("Extracted {} code files from {}", extraction.files.len(), filename));
    if extraction.unreadable > 0 {
        out.warning(&format!(
            "{} archive entries could not be read and were omitted",
            extraction.unreadable
        ));
    }

    let generator = generator_for(config)?;
    let docs = generator
        .generate_project(
            &extraction.files,
            project_name,
            ProjectKind::Upload,
            options.language,
            options.style,
        )
        .await?;

    let written = write_markdown(&config.output.dir, &output_file_name(&filename), &docs)?;
    report_written(&out, &written);
    Ok(())
}

// =============================================================================
// repo: GitHub repository
// =============================================================================

pub async fn run_repo(reference: &str, config: &Config, options: GenerateOptions) -> Result<()> {
    let out = Output::new();
    let repo = RepoRef::parse(reference)?;
    info!("normalized repository reference: {}", repo.canonical_url());

    let client = GithubClient::new()?;
    let (repo_info, extraction) = client.fetch_repository(&repo).await?;

    out.section(&format!("Repository: {}", repo_info.name));
    if !repo_info.description.is_empty() {
        out.info(&repo_info.description);
    }
    out.info(&format!(
        "Language: {}  Stars: {}  Forks: {}  Size: {} KB",
        if repo_info.language.is_empty() { "unknown" } else { &repo_info.language },
        repo_info.stars,
        repo_info.forks,
        repo_info.size
    ));

    if extraction.is_empty() {
        return Err(ScribeError::EmptyResult);
    }
    out.info(&format!("Extracted {} code files", extraction.files.len()));
    if extraction.unreadable > 0 {
        out.warning(&format!(
            "{} archive entries could not be read and were omitted",
            extraction.unreadable
        ));
    }

    let generator = generator_for(config)?;
    let docs = generator
        .generate_project(
            &extraction.files,
            &repo_info.name,
            ProjectKind::Repository,
            options.language,
            options.style,
        )
        .await?;

    let written = write_markdown(&config.output.dir, &output_file_name(&repo_info.name), &docs)?;
    report_written(&out, &written);
    Ok(())
}

// =============================================================================
// config: show merged configuration
// =============================================================================

pub fn run_config_path() {
    let out = Output::new();
    match ConfigLoader::global_config_path() {
        Some(path) => out.info(&format!("Global:  {}", path.display())),
        None => out.warning("Global:  could not determine home directory"),
    }
    out.info(&format!(
        "Project: {}",
        ConfigLoader::project_config_path().display()
    ));
}

pub fn run_config_show(config: &Config) -> Result<()> {
    // API key is skipped during serialization, so it never reaches stdout.
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| ScribeError::Config(format!("could not render config: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

/// Map a command outcome to the message shown to the user
pub fn report_error(err: &ScribeError) {
    Output::new().error(&err.user_message());
}
