//! Request-to-handler dispatch library.
//!
//! Binds path templates with `{name}` variables and optional query-parameter
//! rules to handlers or redirects, then resolves one incoming request to the
//! single best-matching route.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                ROUTE ENGINE                   │
//!   register(...)  │  ┌──────────┐                                │
//!   ───────────────┼─▶│ registry │  (per-method ordered buckets)  │
//!                  │  └────┬─────┘                                │
//!   dispatch(...)  │       ▼                                      │
//!   ───────────────┼─▶┌──────────┐   ┌────────┐   ┌────────────┐  │
//!                  │  │dispatcher│──▶│ query  │──▶│ tokenizer  │  │
//!                  │  └────┬─────┘   │ filter │   │ + matcher  │  │
//!                  │       │         └────────┘   └────────────┘  │
//!                  │       ▼                                      │
//!   Handled /      │  ┌──────────┐                                │
//!   Redirect /  ◀──┼──│ variables│  (capture `{name}` bindings)   │
//!   NoMatch        │  └──────────┘                                │
//!                  └──────────────────────────────────────────────┘
//!
//!   Cross-cutting: config (declarative redirect tables),
//!                  http (axum host adapter), observability (metrics)
//! ```
//!
//! Registration and dispatch are strictly sequential phases: registration
//! needs `&mut RouteRegistry`, dispatch borrows it shared. The engine does
//! no I/O and never suspends.

// Core engine
pub mod routing;

// Cross-cutting concerns
pub mod config;
pub mod http;
pub mod observability;

pub use routing::{
    DispatchOutcome, Dispatcher, MethodTag, QueryRules, Request, RouteError, RouteRegistry,
};
