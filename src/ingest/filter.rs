//! Path Filters
//!
//! Two pure filters applied to every archive entry before decoding:
//!
//! - **Extension filter**: fixed allow-list of code/markup extensions, with a
//!   matching extension → language classification used by the analyzer.
//! - **Skip-path filter**: an explicit, closed enumeration of path-pattern
//!   rules evaluated in a fixed order, rejecting hidden paths, dependency
//!   caches, build output, VCS/IDE metadata, and lock files.
//!
//! Matching is deliberately coarse (substring containment). A legitimately
//! named file that happens to contain a flagged substring is skipped; that
//! imprecision is accepted.

use std::path::Path;

/// Supported code/markup extensions with their language classification.
///
/// Single source of truth: the extension filter accepts exactly the keys of
/// this table, and the analyzer classifies languages from the same table.
const EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    ("py", "Python"),
    ("js", "JavaScript"),
    ("ts", "TypeScript"),
    ("java", "Java"),
    ("cpp", "C++"),
    ("c", "C"),
    ("cs", "C#"),
    ("php", "PHP"),
    ("rb", "Ruby"),
    ("go", "Go"),
    ("rs", "Rust"),
    ("swift", "Swift"),
    ("kt", "Kotlin"),
    ("scala", "Scala"),
    ("r", "R"),
    ("m", "Objective-C"),
    ("pl", "Perl"),
    ("sh", "Shell"),
    ("sql", "SQL"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("vue", "Vue.js"),
    ("jsx", "React JSX"),
    ("tsx", "TypeScript React"),
];

/// Language name reported for unsupported or missing extensions
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Lowercased extension of a path, if any
fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Check whether a path's lowercased suffix is in the supported set.
/// Missing or unmatched suffix yields false.
pub fn is_supported_extension(path: &str) -> bool {
    extension_of(path)
        .map(|ext| EXTENSION_LANGUAGES.iter().any(|(e, _)| *e == ext))
        .unwrap_or(false)
}

/// Classify a path into a human-readable language name.
/// Unknown extensions classify as [`UNKNOWN_LANGUAGE`].
pub fn language_for_path(path: &str) -> &'static str {
    extension_of(path)
        .and_then(|ext| {
            EXTENSION_LANGUAGES
                .iter()
                .find(|(e, _)| *e == ext)
                .map(|(_, lang)| *lang)
        })
        .unwrap_or(UNKNOWN_LANGUAGE)
}

// =============================================================================
// Skip-Path Rules
// =============================================================================

/// Why a path was excluded from analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Path begins with `.` or contains a `/.` segment
    Hidden,
    /// Dependency cache directory (node_modules, venv, ...)
    DependencyCache,
    /// Build output directory (dist, build, target, ...)
    BuildOutput,
    /// Version control metadata (.git)
    VersionControl,
    /// Editor/IDE configuration (.idea, .vscode)
    IdeMetadata,
    /// Operating system metadata files (.DS_Store, Thumbs.db)
    OsMetadata,
    /// Dependency lock files (package-lock.json, yarn.lock)
    LockFile,
    /// VCS configuration files (.gitignore)
    VcsConfig,
}

/// Artifact rules evaluated in order after the hidden-path check.
/// Substring containment; first match wins.
const ARTIFACT_RULES: &[(&str, SkipReason)] = &[
    ("node_modules/", SkipReason::DependencyCache),
    (".git/", SkipReason::VersionControl),
    ("__pycache__/", SkipReason::DependencyCache),
    (".pytest_cache/", SkipReason::DependencyCache),
    ("venv/", SkipReason::DependencyCache),
    ("env/", SkipReason::DependencyCache),
    (".env/", SkipReason::DependencyCache),
    ("dist/", SkipReason::BuildOutput),
    ("build/", SkipReason::BuildOutput),
    ("target/", SkipReason::BuildOutput),
    (".idea/", SkipReason::IdeMetadata),
    (".vscode/", SkipReason::IdeMetadata),
    (".DS_Store", SkipReason::OsMetadata),
    ("Thumbs.db", SkipReason::OsMetadata),
    ("package-lock.json", SkipReason::LockFile),
    ("yarn.lock", SkipReason::LockFile),
    (".gitignore", SkipReason::VcsConfig),
];

/// Determine whether a relative path should be excluded, and why.
///
/// Rules in order, any match short-circuits:
/// 1. Hidden files/directories (`.` prefix or `/.` segment)
/// 2. The fixed artifact rule table, by substring containment
pub fn skip_reason(path: &str) -> Option<SkipReason> {
    if path.starts_with('.') || path.contains("/.") {
        return Some(SkipReason::Hidden);
    }

    ARTIFACT_RULES
        .iter()
        .find(|(pattern, _)| path.contains(pattern))
        .map(|(_, reason)| *reason)
}

/// Convenience wrapper: true if the path should be excluded from analysis
pub fn should_skip(path: &str) -> bool {
    skip_reason(path).is_some()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("src/main.py"));
        assert!(is_supported_extension("lib/util.RS"));
        assert!(is_supported_extension("index.html"));
        assert!(!is_supported_extension("README.md"));
        assert!(!is_supported_extension("Makefile"));
        assert!(!is_supported_extension("data.bin"));
    }

    #[test]
    fn test_language_classification() {
        assert_eq!(language_for_path("src/main.py"), "Python");
        assert_eq!(language_for_path("app.tsx"), "TypeScript React");
        assert_eq!(language_for_path("lib.rs"), "Rust");
        assert_eq!(language_for_path("notes.txt"), UNKNOWN_LANGUAGE);
        assert_eq!(language_for_path("Makefile"), UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_hidden_paths_skipped() {
        assert_eq!(skip_reason(".env"), Some(SkipReason::Hidden));
        assert_eq!(skip_reason("src/.git/config"), Some(SkipReason::Hidden));
        assert_eq!(skip_reason(".github/workflows/ci.yml"), Some(SkipReason::Hidden));
        assert_eq!(skip_reason("src/main.py"), None);
    }

    #[test]
    fn test_artifact_rules() {
        assert_eq!(
            skip_reason("node_modules/x.js"),
            Some(SkipReason::DependencyCache)
        );
        assert_eq!(skip_reason("app/dist/bundle.js"), Some(SkipReason::BuildOutput));
        assert_eq!(skip_reason("package-lock.json"), Some(SkipReason::LockFile));
        assert_eq!(skip_reason("img/Thumbs.db"), Some(SkipReason::OsMetadata));
    }

    #[test]
    fn test_substring_imprecision_is_accepted() {
        // A legitimately named file containing a flagged substring is skipped.
        assert!(should_skip("my_dist/report.py"));
    }

    #[test]
    fn test_rule_order_hidden_first() {
        // Both hidden and artifact rules match; the hidden rule wins.
        assert_eq!(skip_reason(".git/hooks/pre-commit"), Some(SkipReason::Hidden));
        assert_eq!(skip_reason("vendor/.git/config"), Some(SkipReason::Hidden));
    }
}
