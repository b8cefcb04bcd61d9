//! Codescribe - AI Documentation Generator for Codebases
//!
//! Accepts source code as a single file, a zip archive, or a GitHub
//! repository URL, assembles a prompt describing the code, and forwards it
//! to an LLM API to obtain generated documentation, persisted as Markdown.
//!
//! ## Pipeline
//!
//! raw archive bytes → extraction (skip/extension filters, lossy decode) →
//! file mapping → project summary → prompt → LLM provider → Markdown file
//!
//! ## Modules
//!
//! - [`ingest`]: archive extraction, path filters, GitHub download
//! - [`analyzer`]: project structure summary over a file mapping
//! - [`prompt`]: instruction document assembly per language/style
//! - [`ai`]: LLM provider abstraction
//! - [`generator`]: request orchestration and Markdown persistence
//! - [`config`]: layered configuration

pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod generator;
pub mod ingest;
pub mod prompt;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, OutputConfig};

// Error Types
pub use types::{FileMapping, Result, ScribeError};

// Ingestion
pub use ingest::{ExtractOptions, Extraction, GithubClient, RepoInfo, RepoRef};

// Analysis & Prompts
pub use analyzer::ProjectSummary;
pub use prompt::{DocStyle, OutputLanguage, ProjectKind};

// Generation
pub use ai::{ChatMessage, LlmProvider, OpenAiProvider, ProviderConfig, SharedProvider};
pub use generator::DocumentationGenerator;
