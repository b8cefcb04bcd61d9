//! Ingestion Pipeline
//!
//! Turns raw caller input (uploaded zip bytes or a GitHub reference) into an
//! ordered file mapping ready for analysis:
//!
//! raw archive bytes → entry walk → skip/extension filters → lossy decode
//! → [`FileMapping`] → project summary → prompt
//!
//! ## Modules
//!
//! - `filter`: extension allow-list and skip-path rules
//! - `archive`: zip entry extraction into a [`FileMapping`]
//! - `github`: reference normalization, metadata fetch, archive download
//!
//! [`FileMapping`]: crate::types::FileMapping

pub mod archive;
pub mod filter;
pub mod github;

pub use archive::{ExtractOptions, Extraction, extract};
pub use filter::{SkipReason, is_supported_extension, language_for_path, should_skip, skip_reason};
pub use github::{GithubClient, RepoInfo, RepoRef};
