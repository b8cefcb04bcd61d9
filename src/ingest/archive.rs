//! Archive Extraction
//!
//! Walks a zip archive's entry list, applies the path filters, decodes entry
//! bytes as text, and folds the survivors into an ordered [`FileMapping`].
//!
//! Each entry yields zero-or-one `(path, content)` candidate; candidates are
//! collected in enumeration order, so re-extracting the same bytes always
//! produces an identical mapping. A corrupt archive fails the whole operation
//! with a single aggregate error; an unreadable entry is logged, counted, and
//! skipped, never aborting the batch.

use std::io::{Cursor, Read};

use tracing::{debug, warn};
use zip::ZipArchive;

use super::filter;
use crate::constants::extraction::MAX_REPO_FILE_CHARS;
use crate::types::{FileMapping, Result, ScribeError};

/// Options controlling how archive entry names map to relative paths
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Drop the single top-level wrapper directory the hosting provider
    /// injects (GitHub archives). Entries with fewer than two path segments
    /// are dropped entirely.
    pub strip_toplevel: bool,
    /// Skip entries whose decoded length reaches this many characters
    pub max_file_chars: Option<usize>,
}

impl ExtractOptions {
    /// Options for a directly uploaded archive
    pub fn upload() -> Self {
        Self::default()
    }

    /// Options for a GitHub-downloaded archive: wrapper directory stripped
    /// and individual file size capped to bound prompt size
    pub fn github() -> Self {
        Self {
            strip_toplevel: true,
            max_file_chars: Some(MAX_REPO_FILE_CHARS),
        }
    }
}

/// Result of an extraction: the mapping plus an omission count for entries
/// whose bytes could not be read (logged and skipped, never escalated).
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Files that passed every filter, in archive enumeration order
    pub files: FileMapping,
    /// Number of entries dropped because reading their bytes failed
    pub unreadable: usize,
}

impl Extraction {
    /// True when no qualifying file survived the filters.
    /// A valid, non-error outcome that callers must treat as "nothing to analyze".
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Extract qualifying text files from raw zip bytes.
///
/// Per entry: directories are skipped, then the skip-path filter, then the
/// extension filter; surviving bytes are decoded as UTF-8 with a replacement
/// marker for undecodable sequences; entries whose trimmed content is empty
/// (or over the configured size cap) are dropped.
pub fn extract(data: &[u8], options: ExtractOptions) -> Result<Extraction> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| ScribeError::extraction(format!("could not open archive: {}", e)))?;

    let mut files = FileMapping::new();
    let mut unreadable = 0usize;

    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable archive entry #{}: {}", index, err);
                unreadable += 1;
                continue;
            }
        };

        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let Some(relative) = normalize_entry_path(&name, options.strip_toplevel) else {
            continue;
        };

        if filter::should_skip(&relative) || !filter::is_supported_extension(&relative) {
            continue;
        }

        let mut bytes = Vec::new();
        if let Err(err) = entry.read_to_end(&mut bytes) {
            warn!("skipping unreadable archive entry {}: {}", relative, err);
            unreadable += 1;
            continue;
        }

        let content = String::from_utf8_lossy(&bytes).into_owned();
        if content.trim().is_empty() {
            continue;
        }
        if let Some(cap) = options.max_file_chars
            && content.chars().count() >= cap
        {
            debug!("skipping oversized entry {} ({} bytes)", relative, bytes.len());
            continue;
        }

        files.insert(relative, content);
    }

    debug!(
        "extracted {} files ({} unreadable entries skipped)",
        files.len(),
        unreadable
    );

    Ok(Extraction { files, unreadable })
}

/// Map an archive entry name to the relative path used for filtering.
/// Returns None when the entry should be dropped outright.
fn normalize_entry_path(name: &str, strip_toplevel: bool) -> Option<String> {
    if !strip_toplevel {
        return Some(name.to_string());
    }

    // GitHub archives wrap everything in `{repo}-{branch}/`; require at
    // least two segments and drop the first.
    let (_, rest) = name.split_once('/')?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            writer.start_file(name.to_string(), options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_upload_scenario_filters() {
        let data = build_zip(&[
            ("src/main.py", b"print('hello')\n"),
            ("src/.git/config", b"[core]\n"),
            ("node_modules/x.js", b"module.exports = {};\n"),
            ("src/empty.py", b"   \n\t"),
        ]);

        let result = extract(&data, ExtractOptions::upload()).unwrap();
        assert_eq!(result.files.len(), 1);
        assert!(result.files.contains_key("src/main.py"));
        assert_eq!(result.unreadable, 0);
    }

    #[test]
    fn test_every_key_satisfies_both_filters() {
        let data = build_zip(&[
            ("a.py", b"x = 1\n"),
            ("b.md", b"# readme\n"),
            ("dist/c.js", b"var c;\n"),
            ("d.rs", b"fn main() {}\n"),
        ]);

        let result = extract(&data, ExtractOptions::upload()).unwrap();
        for (path, content) in &result.files {
            assert!(filter::is_supported_extension(path));
            assert!(!filter::should_skip(path));
            assert!(!content.trim().is_empty());
        }
        assert_eq!(result.files.len(), 2);
    }

    #[test]
    fn test_github_wrapper_stripped() {
        let data = build_zip(&[
            ("repo-main/src/app.py", b"app = 1\n"),
            ("repo-main/.github/workflows/ci.yml", b"on: push\n"),
            ("toplevel.py", b"dropped, single segment\n"),
        ]);

        let result = extract(&data, ExtractOptions::github()).unwrap();
        assert_eq!(result.files.len(), 1);
        assert!(result.files.contains_key("src/app.py"));
    }

    #[test]
    fn test_github_size_cap() {
        let big = "x".repeat(MAX_REPO_FILE_CHARS);
        let data = build_zip(&[
            ("repo-main/big.py", big.as_bytes()),
            ("repo-main/small.py", b"y = 2\n"),
        ]);

        let result = extract(&data, ExtractOptions::github()).unwrap();
        assert_eq!(result.files.len(), 1);
        assert!(result.files.contains_key("small.py"));
    }

    #[test]
    fn test_undecodable_bytes_use_replacement_marker() {
        let data = build_zip(&[("bad.py", &b"print('ok')\xff\xfe"[..])]);

        let result = extract(&data, ExtractOptions::upload()).unwrap();
        let content = result.files.get("bad.py").unwrap();
        assert!(content.contains("print('ok')"));
        assert!(content.contains('\u{FFFD}'));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let data = build_zip(&[
            ("z.py", b"z = 0\n"),
            ("a/b.rs", b"pub fn b() {}\n"),
            ("m.go", b"package m\n"),
        ]);

        let first = extract(&data, ExtractOptions::upload()).unwrap();
        let second = extract(&data, ExtractOptions::upload()).unwrap();

        let first_entries: Vec<_> = first.files.iter().collect();
        let second_entries: Vec<_> = second.files.iter().collect();
        assert_eq!(first_entries, second_entries);
    }

    #[test]
    fn test_enumeration_order_preserved() {
        let data = build_zip(&[
            ("c.py", b"c\n"),
            ("a.py", b"a\n"),
            ("b.py", b"b\n"),
        ]);

        let result = extract(&data, ExtractOptions::upload()).unwrap();
        let keys: Vec<_> = result.files.keys().cloned().collect();
        assert_eq!(keys, vec!["c.py", "a.py", "b.py"]);
    }

    #[test]
    fn test_corrupt_archive_is_aggregate_error() {
        let err = extract(b"definitely not a zip", ExtractOptions::upload()).unwrap_err();
        assert!(matches!(err, ScribeError::Extraction(_)));
    }

    #[test]
    fn test_empty_mapping_is_not_an_error() {
        let data = build_zip(&[("README.md", b"docs only\n")]);
        let result = extract(&data, ExtractOptions::upload()).unwrap();
        assert!(result.is_empty());
    }
}
