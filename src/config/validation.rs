//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate redirect targets and status code ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: RoutesConfig → Result<(), Vec<ValidationError>>
//! - Templates are deliberately not checked; malformed templates are
//!   inert, not invalid

use std::fmt;

use crate::config::schema::RoutesConfig;

/// A single semantic violation, indexed by redirect position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Redirect target is empty.
    EmptyTarget { index: usize },
    /// Redirect status is outside the 3xx range.
    StatusNotRedirect { index: usize, status: u16 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTarget { index } => {
                write!(f, "redirect {} has an empty target", index)
            }
            ValidationError::StatusNotRedirect { index, status } => {
                write!(f, "redirect {} has non-redirect status {}", index, status)
            }
        }
    }
}

/// Validate a parsed routes config, collecting every violation.
pub fn validate_config(config: &RoutesConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, redirect) in config.redirects.iter().enumerate() {
        if redirect.target.is_empty() {
            errors.push(ValidationError::EmptyTarget { index });
        }
        if !(300..=399).contains(&redirect.status) {
            errors.push(ValidationError::StatusNotRedirect {
                index,
                status: redirect.status,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
