//! Request view handed to handlers.
//!
//! # Responsibilities
//! - Carry method, path, query parameters, and captured path variables
//! - Sanitize externally-sourced values before handlers see them
//!
//! # Design Decisions
//! - Built fresh per dispatch, only for a matched invocable route
//! - Query parameters are always the full sanitized set, never the
//!   filtered subset used for matching
//! - `BTreeMap` keeps key ordering deterministic

use std::collections::BTreeMap;

use crate::routing::method::MethodTag;

/// Structured view of the current request, owned by the invoked handler
/// for the duration of the call.
#[derive(Debug, Clone)]
pub struct Request {
    method: MethodTag,
    path: String,
    query_params: BTreeMap<String, String>,
    path_variables: BTreeMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: MethodTag,
        path: String,
        query_params: BTreeMap<String, String>,
        path_variables: BTreeMap<String, String>,
    ) -> Self {
        Self {
            method,
            path,
            query_params,
            path_variables,
        }
    }

    /// Method bucket the request was dispatched under.
    pub fn method(&self) -> MethodTag {
        self.method
    }

    /// Request path, without query string or leading slash.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a query parameter by key.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }

    /// Look up a captured path variable by name.
    pub fn path_variable(&self, name: &str) -> Option<&str> {
        self.path_variables.get(name).map(String::as_str)
    }

    /// All query parameters, sanitized.
    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query_params
    }

    /// All captured path variables.
    pub fn path_variables(&self) -> &BTreeMap<String, String> {
        &self.path_variables
    }
}

/// Strip characters unsafe for display from an externally-sourced value.
///
/// Drops ASCII control characters and `<`, `>`, `"`, `'`, backtick. This
/// is a conservative removal pass, not HTML escaping.
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '<' | '>' | '"' | '\'' | '`'))
        .collect()
}

/// Sanitize every value of a raw parameter map.
pub(crate) fn sanitize_params(raw: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    raw.iter()
        .map(|(k, v)| (k.clone(), sanitize(v)))
        .collect()
}
