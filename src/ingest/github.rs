//! GitHub Repository Ingestion
//!
//! Resolves a free-form repository reference to a canonical identity,
//! fetches repository metadata, downloads the archive for a primary branch
//! (with exactly one fallback branch), and delegates to the archive
//! extractor. The downloaded archive lives in a scoped temporary file that
//! is removed on every exit path, including errors.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Duration;

use futures::StreamExt;
use regex::Regex;
use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use url::Url;

use super::archive::{self, ExtractOptions, Extraction};
use crate::constants::github::{
    API_BASE, BRANCH_CANDIDATES, DOWNLOAD_TIMEOUT_SECS, METADATA_TIMEOUT_SECS,
};
use crate::types::{Result, ScribeError};

const USER_AGENT: &str = concat!("codescribe/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Repository Reference
// =============================================================================

/// Canonical (owner, name) identity for a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse a free-form reference string.
    ///
    /// Accepted shapes, tried in order:
    /// 1. Full URL with scheme (`https://github.com/owner/name`)
    /// 2. URL without scheme (`github.com/owner/name`)
    /// 3. Bare `owner/name`
    ///
    /// Whitespace and a trailing slash are trimmed first; a trailing `.git`
    /// suffix is stripped from the repository name. Anything matching none
    /// of the shapes is an invalid-input failure.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ScribeError::invalid_input("GitHub URL must not be empty"));
        }

        let parsed = if trimmed.contains("://") {
            Self::from_url(trimmed)
        } else {
            Self::from_bare(trimmed)
        };

        parsed.ok_or_else(|| {
            ScribeError::invalid_input(format!("unrecognized GitHub reference: {}", input.trim()))
        })
    }

    fn from_url(input: &str) -> Option<Self> {
        let url = Url::parse(input).ok()?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str() != Some("github.com") {
            return None;
        }
        let mut segments = url.path_segments()?;
        let owner = segments.next().filter(|s| !s.is_empty())?;
        let name = segments.next().filter(|s| !s.is_empty())?;
        Some(Self::build(owner, name))
    }

    fn from_bare(input: &str) -> Option<Self> {
        static SCHEMELESS: OnceLock<Regex> = OnceLock::new();
        static BARE: OnceLock<Regex> = OnceLock::new();

        let schemeless = SCHEMELESS
            .get_or_init(|| Regex::new(r"^github\.com/([^/\s]+)/([^/\s]+)").expect("valid regex"));
        let bare =
            BARE.get_or_init(|| Regex::new(r"^([^/\s]+)/([^/\s]+)$").expect("valid regex"));

        let captures = schemeless.captures(input).or_else(|| bare.captures(input))?;
        Some(Self::build(&captures[1], &captures[2]))
    }

    fn build(owner: &str, name: &str) -> Self {
        let name = name.strip_suffix(".git").unwrap_or(name);
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    /// Canonical `https://github.com/{owner}/{name}` reference
    pub fn canonical_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// =============================================================================
// Repository Metadata
// =============================================================================

/// Descriptive metadata from the provider's repos endpoint
#[derive(Debug, Clone)]
pub struct RepoInfo {
    pub name: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    /// Repository size in kilobytes, as reported by the API
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ApiRepo {
    name: Option<String>,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    size: u64,
}

// =============================================================================
// GitHub Client
// =============================================================================

/// HTTP client for repository metadata and archive download.
///
/// Metadata requests use a short timeout; archive downloads use a longer one
/// and stream the body in chunks rather than buffering it whole.
pub struct GithubClient {
    metadata: reqwest::Client,
    download: reqwest::Client,
}

impl GithubClient {
    pub fn new() -> Result<Self> {
        let metadata = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(METADATA_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScribeError::Config(format!("failed to create HTTP client: {}", e)))?;

        let download = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScribeError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { metadata, download })
    }

    /// Fetch descriptive metadata for a repository.
    /// Not-found or any other non-2xx status is a hard failure; there is no
    /// retry on this endpoint.
    pub async fn fetch_repo_info(&self, repo: &RepoRef) -> Result<RepoInfo> {
        let url = format!("{}/repos/{}/{}", API_BASE, repo.owner, repo.name);
        debug!("fetching repository metadata from {}", url);

        let response = self.metadata.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ScribeError::NotFound(format!(
                "repository {} does not exist or is private",
                repo
            )));
        }
        if !response.status().is_success() {
            return Err(ScribeError::Network(format!(
                "metadata request for {} failed with HTTP {}",
                repo,
                response.status()
            )));
        }

        let api: ApiRepo = response.json().await?;
        Ok(RepoInfo {
            name: api.name.unwrap_or_else(|| repo.name.clone()),
            description: api.description.unwrap_or_default(),
            language: api.language.unwrap_or_default(),
            stars: api.stargazers_count,
            forks: api.forks_count,
            size: api.size,
            url: repo.canonical_url(),
        })
    }

    /// Download the repository archive and extract qualifying files.
    ///
    /// Branch candidates are attempted in order; the first successful
    /// download wins. The archive is persisted to a scoped temporary file
    /// which is deleted when this function returns, on success and failure
    /// alike (RAII via `NamedTempFile`).
    pub async fn fetch_archive(&self, repo: &RepoRef) -> Result<Extraction> {
        let temp = self.download_to_tempfile(repo).await?;

        let bytes = std::fs::read(temp.path())?;
        archive::extract(&bytes, ExtractOptions::github())
        // `temp` dropped here; the on-disk archive is removed.
    }

    /// Convenience wrapper: metadata plus extracted files in one call.
    /// Metadata failure aborts before any download happens.
    pub async fn fetch_repository(&self, repo: &RepoRef) -> Result<(RepoInfo, Extraction)> {
        let info = self.fetch_repo_info(repo).await?;
        info!(
            "downloading {} ({} stars, primary language: {})",
            repo,
            info.stars,
            if info.language.is_empty() { "unknown" } else { &info.language }
        );
        let extraction = self.fetch_archive(repo).await?;
        Ok((info, extraction))
    }

    async fn download_to_tempfile(&self, repo: &RepoRef) -> Result<NamedTempFile> {
        let mut last_error: Option<ScribeError> = None;

        for branch in BRANCH_CANDIDATES {
            match self.try_download_branch(repo, branch).await {
                Ok(temp) => return Ok(temp),
                Err(err) => {
                    warn!("archive download for branch '{}' failed: {}", branch, err);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ScribeError::Network(format!("no archive available for {}", repo))
        }))
    }

    async fn try_download_branch(&self, repo: &RepoRef, branch: &str) -> Result<NamedTempFile> {
        let url = format!(
            "https://github.com/{}/{}/archive/refs/heads/{}.zip",
            repo.owner, repo.name, branch
        );
        debug!("downloading archive from {}", url);

        let response = self.download.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ScribeError::Network(format!(
                "archive download failed with HTTP {}",
                response.status()
            )));
        }

        let mut temp = NamedTempFile::new()?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            temp.write_all(&chunk?)?;
        }
        temp.flush()?;

        Ok(temp)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_full_url() {
        let repo = RepoRef::parse("https://github.com/octocat/Hello-World").unwrap();
        assert_eq!(repo.owner, "octocat");
        assert_eq!(repo.name, "Hello-World");
        assert_eq!(
            repo.canonical_url(),
            "https://github.com/octocat/Hello-World"
        );
    }

    #[test]
    fn test_parse_schemeless_url() {
        let repo = RepoRef::parse("github.com/octocat/Hello-World").unwrap();
        assert_eq!(
            repo.canonical_url(),
            "https://github.com/octocat/Hello-World"
        );
    }

    #[test]
    fn test_parse_bare_owner_name_with_git_suffix() {
        let repo = RepoRef::parse("octocat/Hello-World.git").unwrap();
        assert_eq!(
            repo.canonical_url(),
            "https://github.com/octocat/Hello-World"
        );
    }

    #[test]
    fn test_parse_trims_whitespace_and_trailing_slash() {
        let repo = RepoRef::parse("  https://github.com/octocat/Hello-World/  ").unwrap();
        assert_eq!(repo.name, "Hello-World");
    }

    #[test]
    fn test_parse_ignores_extra_path_segments() {
        let repo = RepoRef::parse("https://github.com/octocat/Hello-World/tree/main").unwrap();
        assert_eq!(repo.owner, "octocat");
        assert_eq!(repo.name, "Hello-World");
    }

    #[test]
    fn test_parse_rejects_unrecognized_shapes() {
        assert!(RepoRef::parse("not a url").is_err());
        assert!(RepoRef::parse("").is_err());
        assert!(RepoRef::parse("https://gitlab.com/owner/name").is_err());
        assert!(RepoRef::parse("just-a-name").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(RepoRef::parse("https://github.com/octocat").is_err());
        assert!(RepoRef::parse("https://github.com").is_err());
    }

    #[test]
    fn test_branch_candidates_order() {
        assert_eq!(BRANCH_CANDIDATES, &["main", "master"]);
    }

    #[test]
    fn test_tempfile_removed_on_drop() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().to_path_buf();
        assert!(path.exists());
        drop(temp);
        assert!(!path.exists());
    }

    proptest! {
        /// Strings without a slash can never parse as a repository reference.
        #[test]
        fn prop_slashless_inputs_rejected(input in "[^/]*") {
            prop_assert!(RepoRef::parse(&input).is_err());
        }

        /// Bare owner/name round-trips into the canonical URL.
        #[test]
        fn prop_bare_reference_canonicalizes(
            owner in "[A-Za-z0-9_.-]{1,20}",
            name in "[A-Za-z0-9_-]{1,20}",
        ) {
            let repo = RepoRef::parse(&format!("{}/{}", owner, name)).unwrap();
            prop_assert_eq!(
                repo.canonical_url(),
                format!("https://github.com/{}/{}", owner, name)
            );
        }
    }
}
