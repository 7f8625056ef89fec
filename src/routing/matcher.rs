//! Route matching logic.
//!
//! # Responsibilities
//! - Recognize `{name}` placeholder segments in templates
//! - Compare a tokenized template against a tokenized candidate path
//!
//! # Design Decisions
//! - Segment counts must be equal; there are no variable-length wildcards
//! - A placeholder segment matches any candidate segment unconditionally
//! - Literal segments require exact, case-sensitive equality
//! - No regex; matching is a single left-to-right pass

/// Returns true if the segment contains a `{...}` placeholder with a
/// non-empty interior. `{}` does not qualify.
pub fn segment_is_variable(segment: &str) -> bool {
    match segment.find('{') {
        Some(open) => segment[open + 1..].chars().skip(1).any(|c| c == '}'),
        None => false,
    }
}

/// Compare a tokenized template against a tokenized candidate.
///
/// Both sequences must have the same length. Each position must either be
/// a placeholder segment in the template or an exact string match. Two
/// empty sequences match.
pub fn matches(template: &[&str], candidate: &[&str]) -> bool {
    if template.len() != candidate.len() {
        return false;
    }

    template
        .iter()
        .zip(candidate)
        .all(|(t, c)| segment_is_variable(t) || t == c)
}
