//! Routing error definitions.

use thiserror::Error;

/// Errors that can occur while building a route table.
///
/// Matching itself never errors: an unmatched request is an explicit
/// no-match outcome, and a malformed template simply never matches.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A multi-method registration named a method that is not a known tag.
    /// The whole batch is rejected; nothing is registered.
    #[error("unknown method {0}")]
    UnknownMethod(String),
}
