pub mod commands;
pub mod output;

pub use commands::{
    GenerateOptions, report_error, run_config_path, run_config_show, run_file, run_repo, run_zip,
};
pub use output::Output;
