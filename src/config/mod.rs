//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! routes file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RoutesConfig (validated, immutable)
//!     → applied to a RouteRegistry at startup
//! ```
//!
//! # Design Decisions
//! - Config covers the data-describable subset of the table: redirect
//!   routes and global query rules; invocable handlers are code-only
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every violation, not just the first
//! - Template syntax is never validated; a malformed template simply
//!   never matches

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_routes, ConfigError};
pub use schema::{RedirectConfig, RoutesConfig};
