//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured log events via `tracing`; subscribers are installed by the
//!   embedding binary, never by the library
//! - Metrics go through the `metrics` facade so hosts choose the exporter
//! - Recording is cheap and never influences dispatch behavior

pub mod metrics;
