//! HTTP host adapter subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming axum request
//!     → server.rs (extract method, decoded path, query params)
//!     → routing::Dispatcher (select route, run handler)
//!     → Outcome mapped back: Handled → response as-is,
//!       Redirect → Location + status, NoMatch → 404
//! ```

pub mod server;

pub use server::RouteHost;
