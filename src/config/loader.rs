//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RoutesConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Errors that can occur while loading a routes table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the routes file failed.
    #[error("failed to read routes file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for the routes schema.
    #[error("failed to parse routes file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The table parsed but violates semantic constraints.
    #[error("invalid routes table: {}", render_violations(.0))]
    Validation(Vec<ValidationError>),
}

fn render_violations(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate a routes table from a TOML file.
pub fn load_routes(path: &Path) -> Result<RoutesConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RoutesConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_joins_every_violation() {
        let err = ConfigError::Validation(vec![
            ValidationError::EmptyTarget { index: 0 },
            ValidationError::StatusNotRedirect { index: 1, status: 200 },
        ]);

        let rendered = err.to_string();
        assert!(rendered.contains("redirect 0 has an empty target"));
        assert!(rendered.contains("redirect 1 has non-redirect status 200"));
    }
}
