pub mod error;

pub use error::{Result, ScribeError};

use indexmap::IndexMap;

/// Ordered mapping from relative path to decoded text content.
///
/// Keys are unique; insertion order reflects archive enumeration order.
/// Invariants upheld by the extraction pipeline: every value is non-empty
/// after trimming, every key's extension is in the supported set, and no key
/// starts with a skipped path segment.
pub type FileMapping = IndexMap<String, String>;
