//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from routes files.

use serde::{Deserialize, Serialize};

use crate::routing::query::QueryRules;
use crate::routing::registry::{RouteRegistry, DEFAULT_REDIRECT_STATUS};

/// Root configuration for a declarative route table.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RoutesConfig {
    /// Query rules merged into every route registered from this file.
    pub global_rules: Option<QueryRules>,

    /// Redirect route definitions, applied in file order.
    pub redirects: Vec<RedirectConfig>,
}

/// A redirect route described in configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedirectConfig {
    /// Route template, e.g. `"legacy/{page}"`.
    pub template: String,

    /// Redirect target URL.
    pub target: String,

    /// Redirect status code (default: 301).
    #[serde(default = "default_redirect_status")]
    pub status: u16,

    /// Optional per-route query rules.
    pub rules: Option<QueryRules>,
}

fn default_redirect_status() -> u16 {
    DEFAULT_REDIRECT_STATUS
}

impl RoutesConfig {
    /// Register everything this config describes.
    ///
    /// Global rules are set first so every redirect in the file picks
    /// them up at registration.
    pub fn apply_to<T>(&self, registry: &mut RouteRegistry<T>) {
        if let Some(rules) = &self.global_rules {
            registry.set_global_rules(rules.clone());
        }
        for redirect in &self.redirects {
            registry.redirect_with_status(
                &redirect.template,
                &redirect.target,
                redirect.status,
                redirect.rules.clone().unwrap_or_default(),
            );
        }
    }
}
