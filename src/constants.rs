//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Extraction constants
pub mod extraction {
    /// Repository archive entries at or above this decoded length are skipped
    /// to bound prompt size
    pub const MAX_REPO_FILE_CHARS: usize = 100_000;
}

/// GitHub network constants
pub mod github {
    /// Metadata (repos API) request timeout (seconds)
    pub const METADATA_TIMEOUT_SECS: u64 = 10;

    /// Archive download timeout (seconds)
    pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

    /// Branch names tried for archive download, in order.
    /// Primary first, then exactly one fallback.
    pub const BRANCH_CANDIDATES: &[&str] = &["main", "master"];

    /// GitHub REST API base URL
    pub const API_BASE: &str = "https://api.github.com";
}

/// Prompt assembly constants
pub mod prompt {
    /// Character budget per embedded file for the manual style
    pub const MANUAL_FILE_CHARS: usize = 1000;

    /// Character budget per embedded file for all other styles
    pub const DEFAULT_FILE_CHARS: usize = 800;

    /// Maximum files embedded for the manual style
    pub const MANUAL_MAX_FILES: usize = 10;

    /// Maximum files embedded for tutorial/api/insight styles
    pub const DEFAULT_MAX_FILES: usize = 8;

    /// Maximum files embedded for the comment style
    pub const COMMENT_MAX_FILES: usize = 6;
}

/// LLM generation constants
pub mod llm {
    /// Default model for documentation generation
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

    /// Maximum output tokens per generation
    pub const DEFAULT_MAX_TOKENS: usize = 4000;

    /// Sampling temperature (low for factual documentation)
    pub const DEFAULT_TEMPERATURE: f32 = 0.3;

    /// Request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
}
