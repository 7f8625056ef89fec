//! Dispatch metrics.
//!
//! # Metrics
//! - `route_dispatch_total` (counter): dispatches by method and outcome
//! - `route_dispatch_duration_seconds` (histogram): dispatch latency
//!
//! # Design Decisions
//! - Labels limited to method and outcome; templates are unbounded and
//!   would blow up cardinality

use std::time::Instant;

use crate::routing::method::MethodTag;

/// Record one completed dispatch.
pub fn record_dispatch(method: MethodTag, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "route_dispatch_total",
        "method" => method.as_str(),
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!("route_dispatch_duration_seconds").record(start.elapsed().as_secs_f64());
}
