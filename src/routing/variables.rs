//! Path variable extraction.
//!
//! # Responsibilities
//! - Scan a raw template for `{name}` placeholder occurrences
//! - Capture the candidate segment at each placeholder's position
//!
//! # Design Decisions
//! - Placeholders are located in the raw template string, then resolved
//!   to positions in the tokenized template
//! - Captured values are sanitized before handlers see them
//! - A placeholder whose position cannot be resolved is omitted, never
//!   an error

use std::collections::BTreeMap;

use crate::routing::request::sanitize;
use crate::routing::tokenizer::tokenize;

/// Scan a raw template for placeholder occurrences, in order.
///
/// Each occurrence is the full `{...}` span, braces included: an opening
/// brace up to the first closing brace that leaves a non-empty interior.
/// Scanning resumes after each closing brace.
fn find_placeholders(template: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut offset = 0;

    while let Some(open_rel) = template[offset..].find('{') {
        let open = offset + open_rel;
        let interior_start = open + 1;
        let close = template[interior_start..]
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '}')
            .map(|(i, _)| interior_start + i);
        match close {
            Some(close) => {
                let end = close + 1;
                found.push(&template[open..end]);
                offset = end;
            }
            None => break,
        }
    }

    found
}

/// Extract named path variables for a template matched against a request path.
///
/// For each placeholder found in the raw template, the first template token
/// equal to the full placeholder text gives its position; the value is the
/// sanitized request-path token at that position. The variable name is the
/// placeholder interior with surrounding whitespace trimmed.
pub fn extract_variables(template: &str, request_path: &str) -> BTreeMap<String, String> {
    let template_tokens = tokenize(template);
    let path_tokens = tokenize(request_path);

    let mut variables = BTreeMap::new();
    for placeholder in find_placeholders(template) {
        let position = template_tokens.iter().position(|t| *t == placeholder);
        if let Some(index) = position {
            if let Some(value) = path_tokens.get(index) {
                let name = placeholder
                    .trim_matches(|c| c == '{' || c == '}')
                    .trim()
                    .to_string();
                variables.insert(name, sanitize(value));
            }
        }
    }

    variables
}
