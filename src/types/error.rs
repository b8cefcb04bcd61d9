//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Every failure that can reach a caller carries a human-readable message;
//! nothing here is process-fatal.
//!
//! ## Failure Kinds
//!
//! - **InvalidInput**: malformed repository reference, empty upload, missing field
//! - **NotFound**: repository metadata lookup returned 404
//! - **Network**: timeout or connection failure during a fetch
//! - **Extraction**: the archive could not be opened or parsed
//! - **EmptyResult**: extraction succeeded but yielded zero qualifying files
//!
//! Per-entry read failures inside extraction are logged and skipped; they
//! never escalate to one of these variants.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScribeError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // -------------------------------------------------------------------------
    // Request Failures
    // -------------------------------------------------------------------------
    /// Malformed or missing caller input. Reported back verbatim, never retried.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Repository metadata lookup returned not-found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Timeout or connection failure during metadata/archive fetch.
    #[error("Network failure: {0}")]
    Network(String),

    /// Archive could not be opened or parsed; wraps the underlying cause.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Extraction succeeded but no file passed the filters.
    #[error("no supported files found")]
    EmptyResult,

    // -------------------------------------------------------------------------
    // Generation Failures
    // -------------------------------------------------------------------------
    #[error("LLM API error: {0}")]
    LlmApi(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ScribeError {
    fn from(err: reqwest::Error) -> Self {
        // Timeouts and connection failures are a distinct user-facing kind,
        // not conflated with "repository not found".
        if err.is_timeout() {
            ScribeError::Network(format!("request timed out: {}", err))
        } else if err.is_connect() {
            ScribeError::Network(format!("connection failed: {}", err))
        } else {
            ScribeError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ScribeError>;

impl ScribeError {
    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an extraction error wrapping an underlying cause
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// The message shown to the end user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyResult => "No supported code files found in the input".to_string(),
            Self::InvalidInput(msg) => msg.clone(),
            Self::NotFound(msg) => msg.clone(),
            Self::Network(msg) => format!("Network request failed: {}", msg),
            Self::Extraction(msg) => format!("Could not read the archive: {}", msg),
            other => other.to_string(),
        }
    }

    /// Whether the caller supplied bad input (as opposed to an upstream fault)
    pub fn is_caller_fault(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::EmptyResult)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_user_message() {
        let err = ScribeError::EmptyResult;
        assert_eq!(
            err.user_message(),
            "No supported code files found in the input"
        );
    }

    #[test]
    fn test_invalid_input_reported_verbatim() {
        let err = ScribeError::invalid_input("GitHub URL must not be empty");
        assert_eq!(err.user_message(), "GitHub URL must not be empty");
        assert!(err.is_caller_fault());
    }

    #[test]
    fn test_network_distinct_from_not_found() {
        let network = ScribeError::Network("connection refused".to_string());
        let not_found = ScribeError::NotFound("repository does not exist".to_string());
        assert!(!network.is_caller_fault());
        assert_ne!(network.user_message(), not_found.user_message());
    }

    #[test]
    fn test_extraction_wraps_cause() {
        let err = ScribeError::extraction("invalid central directory");
        assert!(err.to_string().contains("invalid central directory"));
    }
}
