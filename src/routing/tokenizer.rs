//! Path tokenization.
//!
//! # Design Decisions
//! - Empty segments are discarded, so leading/trailing/duplicate slashes
//!   carry no meaning
//! - Borrows from the input; no allocation per segment
//! - Idempotent: tokenizing a re-joined token sequence yields the same tokens

/// Split a path into its non-empty `/`-separated segments.
///
/// `"/a//b/"` and `"a/b"` both tokenize to `["a", "b"]`.
pub fn tokenize(url: &str) -> Vec<&str> {
    url.split('/').filter(|segment| !segment.is_empty()).collect()
}
