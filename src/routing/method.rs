//! HTTP method tags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::routing::error::RouteError;

/// Method bucket a route is registered under.
///
/// `Any` is the method-agnostic bucket, checked as a fallback after the
/// method-specific bucket on every dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MethodTag {
    Any,
    Get,
    Post,
    Head,
    Put,
    Delete,
}

impl MethodTag {
    /// All tags, in bucket order.
    pub const ALL: [MethodTag; 6] = [
        MethodTag::Any,
        MethodTag::Get,
        MethodTag::Post,
        MethodTag::Head,
        MethodTag::Put,
        MethodTag::Delete,
    ];

    /// Parse a method name, case-insensitively.
    pub fn parse(name: &str) -> Result<MethodTag, RouteError> {
        match name.to_uppercase().as_str() {
            "ANY" => Ok(MethodTag::Any),
            "GET" => Ok(MethodTag::Get),
            "POST" => Ok(MethodTag::Post),
            "HEAD" => Ok(MethodTag::Head),
            "PUT" => Ok(MethodTag::Put),
            "DELETE" => Ok(MethodTag::Delete),
            _ => Err(RouteError::UnknownMethod(name.to_string())),
        }
    }

    /// Uppercase name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodTag::Any => "ANY",
            MethodTag::Get => "GET",
            MethodTag::Post => "POST",
            MethodTag::Head => "HEAD",
            MethodTag::Put => "PUT",
            MethodTag::Delete => "DELETE",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            MethodTag::Any => 0,
            MethodTag::Get => 1,
            MethodTag::Post => 2,
            MethodTag::Head => 3,
            MethodTag::Put => 4,
            MethodTag::Delete => 5,
        }
    }
}

impl fmt::Display for MethodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(MethodTag::parse("get").unwrap(), MethodTag::Get);
        assert_eq!(MethodTag::parse("GET").unwrap(), MethodTag::Get);
        assert_eq!(MethodTag::parse("Delete").unwrap(), MethodTag::Delete);
    }

    #[test]
    fn test_parse_rejects_unknown_methods() {
        let err = MethodTag::parse("PATCH").unwrap_err();
        assert!(err.to_string().contains("PATCH"));
    }

    #[test]
    fn test_display_round_trip() {
        for tag in MethodTag::ALL {
            assert_eq!(MethodTag::parse(tag.as_str()).unwrap(), tag);
        }
    }
}
