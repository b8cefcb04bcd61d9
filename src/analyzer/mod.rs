//! Project Structure Analyzer
//!
//! Summarizes an extracted file mapping into aggregate statistics: language
//! histogram, top-level directory set, detected entry-point/config/test
//! files, and an extension histogram. Pure and deterministic, one pass over
//! the mapping; the summary is recomputed fresh per request and discarded
//! once the prompt is built.

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;

use crate::ingest::filter::language_for_path;
use crate::types::FileMapping;

/// Base names that conventionally mark a program's primary executable module
const ENTRY_POINT_NAMES: &[&str] = &["main.py", "app.py", "index.js", "main.js", "index.html"];

/// Known manifest filenames (lowercased)
const CONFIG_NAMES: &[&str] = &["package.json", "requirements.txt", "pom.xml", "cargo.toml"];

/// Read-only aggregate over a [`FileMapping`].
///
/// Entry-point, test, and config classifications are independent; a file may
/// appear in more than one list (a test file named like an entry point, for
/// instance). That overlap is accepted, not deduplicated.
#[derive(Debug, Clone, Default)]
pub struct ProjectSummary {
    /// Total number of files in the mapping
    pub total_files: usize,
    /// Language name → file count, in first-seen order
    pub languages: IndexMap<String, usize>,
    /// Top-level directory names (first segment of multi-segment paths), sorted
    pub directories: Vec<String>,
    /// Paths whose base name marks a conventional entry point
    pub entry_points: Vec<String>,
    /// Paths classified as test files
    pub test_files: Vec<String>,
    /// Paths whose base name is a known manifest
    pub config_files: Vec<String>,
    /// Lowercased extension → file count, in first-seen order
    pub extensions: IndexMap<String, usize>,
}

impl ProjectSummary {
    /// Analyze a file mapping in a single pass.
    pub fn analyze(files: &FileMapping) -> Self {
        let mut summary = Self {
            total_files: files.len(),
            ..Self::default()
        };
        let mut directories = BTreeSet::new();

        for path in files.keys() {
            if let Some((first, _)) = path.split_once('/') {
                directories.insert(first.to_string());
            }

            *summary
                .languages
                .entry(language_for_path(path).to_string())
                .or_insert(0) += 1;

            let base = Path::new(path)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(path)
                .to_lowercase();

            if ENTRY_POINT_NAMES.contains(&base.as_str()) {
                summary.entry_points.push(path.clone());
            }
            if base.starts_with("test_") || base.contains("test") {
                summary.test_files.push(path.clone());
            }
            if CONFIG_NAMES.contains(&base.as_str()) {
                summary.config_files.push(path.clone());
            }

            let extension = Path::new(path)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase())
                .unwrap_or_default();
            *summary.extensions.entry(extension).or_insert(0) += 1;
        }

        summary.directories = directories.into_iter().collect();
        summary
    }

    /// Comma-joined `Language(count)` pairs for prompt context
    pub fn language_overview(&self) -> String {
        self.languages
            .iter()
            .map(|(lang, count)| format!("{}({})", lang, count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, &str)]) -> FileMapping {
        entries
            .iter()
            .map(|(path, content)| (path.to_string(), content.to_string()))
            .collect()
    }

    #[test]
    fn test_scenario_classification() {
        let files = mapping(&[
            ("main.py", "print('hi')"),
            ("test_utils.py", "def test_x(): pass"),
            ("package.json", "{}"),
        ]);

        let summary = ProjectSummary::analyze(&files);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.entry_points, vec!["main.py"]);
        assert_eq!(summary.test_files, vec!["test_utils.py"]);
        assert_eq!(summary.config_files, vec!["package.json"]);
        assert_eq!(summary.languages.get("Python"), Some(&2));
        assert_eq!(summary.languages.get("Unknown"), Some(&1));
    }

    #[test]
    fn test_top_level_directories() {
        let files = mapping(&[
            ("src/a.py", "a = 1"),
            ("src/sub/b.py", "b = 2"),
            ("tests/test_a.py", "pass"),
            ("standalone.py", "c = 3"),
        ]);

        let summary = ProjectSummary::analyze(&files);
        assert_eq!(summary.directories, vec!["src", "tests"]);
    }

    #[test]
    fn test_categories_are_independent() {
        // A test file named like an entry point lands in both lists.
        let files = mapping(&[("contest/main.py", "x = 1")]);

        let summary = ProjectSummary::analyze(&files);
        assert_eq!(summary.entry_points, vec!["contest/main.py"]);
        // "main.py" does not contain "test"; the directory name is ignored.
        assert!(summary.test_files.is_empty());

        let files = mapping(&[("tests/test_main.py", "x = 1")]);
        let summary = ProjectSummary::analyze(&files);
        assert_eq!(summary.test_files, vec!["tests/test_main.py"]);
    }

    #[test]
    fn test_extension_histogram() {
        let files = mapping(&[
            ("a.py", "a"),
            ("b.PY", "b"),
            ("c.rs", "c"),
        ]);

        let summary = ProjectSummary::analyze(&files);
        assert_eq!(summary.extensions.get("py"), Some(&2));
        assert_eq!(summary.extensions.get("rs"), Some(&1));
    }

    #[test]
    fn test_language_overview_format() {
        let files = mapping(&[("a.py", "a"), ("b.py", "b"), ("c.rs", "c")]);
        let summary = ProjectSummary::analyze(&files);
        assert_eq!(summary.language_overview(), "Python(2), Rust(1)");
    }

    #[test]
    fn test_empty_mapping() {
        let summary = ProjectSummary::analyze(&FileMapping::new());
        assert_eq!(summary.total_files, 0);
        assert!(summary.languages.is_empty());
        assert!(summary.directories.is_empty());
    }
}
