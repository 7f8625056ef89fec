//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration phase:
//!     template + handler + QueryRules
//!     → registry.rs (normalize template, merge global rules, append to bucket)
//!
//! Dispatch phase (per request):
//!     method + path + raw query params
//!     → dispatcher.rs (sanitize params, build candidate list)
//!     → query.rs (derive request-side / route-side remainders)
//!     → tokenizer.rs + matcher.rs (structural comparison)
//!     → variables.rs (capture path variables for the winner)
//!     → Return: Handled | Redirect | NoMatch
//! ```
//!
//! # Design Decisions
//! - Registration strictly precedes dispatch; `&mut`/`&` borrows enforce it
//! - First match wins, ordered by method specificity then registration
//! - Deterministic: same registry and request always select the same route
//! - All work is synchronous in-memory computation

pub mod dispatcher;
pub mod error;
pub mod matcher;
pub mod method;
pub mod query;
pub mod registry;
pub mod request;
pub mod tokenizer;
pub mod variables;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::RouteError;
pub use method::MethodTag;
pub use query::{IncludeRule, QueryRules};
pub use registry::{HandlerRef, Route, RouteRegistry, DEFAULT_REDIRECT_STATUS};
pub use request::Request;
