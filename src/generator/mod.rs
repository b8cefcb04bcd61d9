//! Documentation Generation
//!
//! Orchestrates one request end to end: file mapping → project summary →
//! prompt → LLM provider → generated Markdown → persisted artifact. Each
//! request builds and discards its own mapping and summary; nothing is
//! retained between requests.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::ai::{ChatMessage, SharedProvider};
use crate::analyzer::ProjectSummary;
use crate::prompt::{
    self, DocStyle, OutputLanguage, ProjectKind, PromptRequest, build_single_file_prompt,
};
use crate::types::{FileMapping, Result, ScribeError};

/// Generates documentation through a configured LLM provider
pub struct DocumentationGenerator {
    provider: SharedProvider,
}

impl DocumentationGenerator {
    pub fn new(provider: SharedProvider) -> Self {
        Self { provider }
    }

    /// Generate documentation for a single (filename, content) pair.
    pub async fn generate_single(
        &self,
        filename: &str,
        content: &str,
        language: OutputLanguage,
        style: DocStyle,
    ) -> Result<String> {
        if filename.trim().is_empty() || content.trim().is_empty() {
            return Err(ScribeError::invalid_input(
                "filename and content must not be empty",
            ));
        }

        let user = build_single_file_prompt(filename, content, language, style);
        self.complete(prompt::system_prompt(language, false), user)
            .await
    }

    /// Generate comprehensive documentation for a whole project mapping.
    /// An empty mapping is rejected as "nothing to analyze".
    pub async fn generate_project(
        &self,
        files: &FileMapping,
        project_name: &str,
        kind: ProjectKind,
        language: OutputLanguage,
        style: DocStyle,
    ) -> Result<String> {
        if files.is_empty() {
            return Err(ScribeError::EmptyResult);
        }

        let summary = ProjectSummary::analyze(files);
        info!(
            "analyzing {} files across {} top-level directories",
            summary.total_files,
            summary.directories.len()
        );

        let user = prompt::build_project_prompt(&PromptRequest {
            files,
            summary: &summary,
            project_name,
            kind,
            language,
            style,
        });
        self.complete(prompt::system_prompt(language, true), user)
            .await
    }

    async fn complete(&self, system: &str, user: String) -> Result<String> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        info!(
            "requesting documentation from {} ({})",
            self.provider.name(),
            self.provider.model()
        );
        self.provider.generate(&messages).await
    }
}

// =============================================================================
// Markdown Persistence
// =============================================================================

/// Output file name for a project: archive/repo suffixes dropped, `_docs.md`
/// appended.
pub fn output_file_name(project_name: &str) -> String {
    let base = project_name
        .strip_suffix(".zip")
        .unwrap_or(project_name)
        .trim();
    if base.is_empty() {
        "output.md".to_string()
    } else {
        format!("{}_docs.md", base)
    }
}

/// Write generated documentation under the output directory, creating it if
/// needed. Returns the written path.
pub fn write_markdown(output_dir: &Path, file_name: &str, documentation: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(file_name);
    fs::write(&path, documentation)?;
    info!("wrote documentation to {}", path.display());
    Ok(path)
}

// =============================================================================
// Tests
// =============================================================================
