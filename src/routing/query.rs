//! Query-parameter match rules.
//!
//! # Responsibilities
//! - Represent per-route include/exclude rules for query parameters
//! - Merge per-route rules with registry-wide global rules at registration
//! - Derive the two serialized remainders compared during matching
//!
//! # Design Decisions
//! - `None` means a rule was not declared; a declared-empty set is distinct
//!   and participates in the algebra
//! - `include` removes its keys from the request side but keeps only those
//!   keys on the route side; `exclude` does the reverse. The opposite
//!   polarity of the two sides is intentional and pinned by tests; a route
//!   with rules is selected only when the request-side remainder equals the
//!   route-side remainder
//! - Serialization iterates a `BTreeMap`, so pair order is deterministic
//! - Percent-encoding via `form_urlencoded` keeps `/` out of the serialized
//!   string, so it tokenizes as at most one trailing segment

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::form_urlencoded;

/// The `include` side of a rule: either the `"*"` wildcard or a key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeRule {
    /// Wildcard: every parameter participates.
    All,
    /// Only the named keys participate. May be empty.
    Keys(BTreeSet<String>),
}

/// Per-route query-parameter rules, merged with global rules at
/// registration time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRules {
    /// Keys that participate in the match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<IncludeRule>,

    /// Keys that must not participate in the match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<BTreeSet<String>>,
}

impl QueryRules {
    /// Rules with an `include` key list.
    pub fn with_include<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(IncludeRule::Keys(
            keys.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Rules with the `include` wildcard.
    pub fn with_include_all(mut self) -> Self {
        self.include = Some(IncludeRule::All);
        self
    }

    /// Rules with an `exclude` key list.
    pub fn with_exclude<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// True if neither field was declared. Empty rules impose no query
    /// constraint: both derived remainders are empty strings.
    pub fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }

    /// Union these rules with the registry-wide global rules.
    ///
    /// Performed once at registration. The wildcard absorbs key lists;
    /// a declared-empty set survives union with an undeclared side.
    pub fn merged_with(&self, global: &QueryRules) -> QueryRules {
        let include = match (self.include.clone(), global.include.clone()) {
            (None, other) | (other, None) => other,
            (Some(IncludeRule::All), _) | (_, Some(IncludeRule::All)) => Some(IncludeRule::All),
            (Some(IncludeRule::Keys(mut a)), Some(IncludeRule::Keys(b))) => {
                a.extend(b);
                Some(IncludeRule::Keys(a))
            }
        };
        let exclude = match (self.exclude.clone(), global.exclude.clone()) {
            (None, other) | (other, None) => other,
            (Some(mut a), Some(b)) => {
                a.extend(b);
                Some(a)
            }
        };
        QueryRules { include, exclude }
    }

    /// Remainder appended to the request path before matching.
    ///
    /// Starts from every current parameter. An `include` key list (the
    /// wildcard is exempt) removes its keys; a non-empty `exclude` keeps
    /// only its keys.
    pub fn request_side_query(&self, params: &BTreeMap<String, String>) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut kept = params.clone();
        if let Some(IncludeRule::Keys(keys)) = &self.include {
            kept.retain(|key, _| !keys.contains(key));
        }
        if let Some(exclude) = &self.exclude {
            if !exclude.is_empty() {
                kept.retain(|key, _| exclude.contains(key));
            }
        }
        build_query_string(&kept)
    }

    /// Remainder appended to the route template before matching.
    ///
    /// Starts from every current parameter. A non-empty `include` key list
    /// keeps only its keys (the wildcard keeps everything); a declared
    /// `exclude` removes its keys, or clears everything when empty.
    pub fn route_side_query(&self, params: &BTreeMap<String, String>) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut kept = params.clone();
        if let Some(IncludeRule::Keys(keys)) = &self.include {
            if !keys.is_empty() {
                kept.retain(|key, _| keys.contains(key));
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_empty() {
                kept.clear();
            } else {
                kept.retain(|key, _| !exclude.contains(key));
            }
        }
        build_query_string(&kept)
    }
}

/// Serialize parameters as a canonical query string, `?`-prefixed, or an
/// empty string when there is nothing to serialize.
fn build_query_string(params: &BTreeMap<String, String>) -> String {
    if params.is_empty() {
        return String::new();
    }
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();
    format!("?{encoded}")
}

impl Serialize for IncludeRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IncludeRule::All => serializer.serialize_str("*"),
            IncludeRule::Keys(keys) => keys.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for IncludeRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IncludeVisitor;

        impl<'de> Visitor<'de> for IncludeVisitor {
            type Value = IncludeRule;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"*\" or a list of parameter keys")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<IncludeRule, E> {
                if value == "*" {
                    Ok(IncludeRule::All)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<IncludeRule, A::Error> {
                let mut keys = BTreeSet::new();
                while let Some(key) = seq.next_element::<String>()? {
                    keys.insert(key);
                }
                Ok(IncludeRule::Keys(keys))
            }
        }

        deserializer.deserialize_any(IncludeVisitor)
    }
}
