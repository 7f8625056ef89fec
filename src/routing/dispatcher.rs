//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Build the candidate list for the incoming method
//! - Apply the query filter and path matcher to each candidate in order
//! - Invoke the winning handler or signal a redirect
//! - Return an explicit no-match when nothing wins
//!
//! # Design Decisions
//! - Method-specific bucket first, then the method-agnostic bucket, each
//!   in registration order; first match wins
//! - No-match is a normal outcome, not an error; the host decides fallback
//! - Raw parameter values are sanitized once, before any matching
//! - Dispatch borrows the registry shared and performs no I/O

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, trace};

use crate::observability::metrics;
use crate::routing::matcher;
use crate::routing::method::MethodTag;
use crate::routing::registry::{HandlerRef, Route, RouteRegistry};
use crate::routing::request::{sanitize_params, Request};
use crate::routing::tokenizer::tokenize;
use crate::routing::variables::extract_variables;

/// Terminal result of a dispatch.
#[derive(Debug)]
pub enum DispatchOutcome<T> {
    /// A handler was invoked; carries its return value.
    Handled(T),
    /// A redirect route won; the host should redirect and stop.
    Redirect { target: String, status: u16 },
    /// No registered route satisfied the request.
    NoMatch,
}

impl<T> DispatchOutcome<T> {
    fn kind(&self) -> &'static str {
        match self {
            DispatchOutcome::Handled(_) => "handled",
            DispatchOutcome::Redirect { .. } => "redirect",
            DispatchOutcome::NoMatch => "no_match",
        }
    }
}

/// Resolves one request against a frozen registry borrow.
pub struct Dispatcher<'r, T> {
    registry: &'r RouteRegistry<T>,
}

impl<'r, T> Dispatcher<'r, T> {
    /// Create a dispatcher over a registry.
    pub fn new(registry: &'r RouteRegistry<T>) -> Self {
        Self { registry }
    }

    /// Resolve and execute the best-matching route for the request.
    ///
    /// `path` is the URL-decoded request path without its query string;
    /// `raw_params` is the raw query parameter map. Parameter values are
    /// sanitized here, once, and the sanitized map feeds both the match
    /// and the request view handed to the handler.
    pub fn dispatch(
        &self,
        method: MethodTag,
        path: &str,
        raw_params: &BTreeMap<String, String>,
    ) -> DispatchOutcome<T> {
        let start = Instant::now();
        let params = sanitize_params(raw_params);

        debug!(method = %method, path = %path, "Dispatching request");

        let outcome = match self.select_route(method, path, &params) {
            Some(route) => self.execute(route, method, path, params),
            None => {
                debug!(method = %method, path = %path, "No route matched");
                DispatchOutcome::NoMatch
            }
        };

        metrics::record_dispatch(method, outcome.kind(), start);
        outcome
    }

    /// Walk the candidate list and return the first route whose combined
    /// path-and-query check succeeds.
    fn select_route(
        &self,
        method: MethodTag,
        path: &str,
        params: &BTreeMap<String, String>,
    ) -> Option<&Route<T>> {
        let specific: &[Route<T>] = if method == MethodTag::Any {
            &[]
        } else {
            self.registry.routes_for(method)
        };
        let agnostic = self.registry.routes_for(MethodTag::Any);

        specific
            .iter()
            .chain(agnostic)
            .find(|route| route_matches(route, path, params))
    }

    fn execute(
        &self,
        route: &Route<T>,
        method: MethodTag,
        path: &str,
        params: BTreeMap<String, String>,
    ) -> DispatchOutcome<T> {
        debug!(method = %route.method, template = %route.template, "Route matched");

        match &route.handler {
            HandlerRef::Redirect { target, status } => DispatchOutcome::Redirect {
                target: target.clone(),
                status: *status,
            },
            HandlerRef::Invocable(handler) => {
                let variables = extract_variables(&route.template, path);
                let request = Request::new(
                    method,
                    path.trim_start_matches('/').to_string(),
                    params,
                    variables,
                );
                DispatchOutcome::Handled(handler(&request))
            }
        }
    }
}

/// Combined check: the tokenized path plus the request-side query remainder
/// must match the tokenized template plus the route-side remainder.
fn route_matches<T>(route: &Route<T>, path: &str, params: &BTreeMap<String, String>) -> bool {
    let candidate = format!("{}{}", path, route.rules.request_side_query(params));
    let template = format!("{}{}", route.template, route.rules.route_side_query(params));

    let matched = matcher::matches(&tokenize(&template), &tokenize(&candidate));
    trace!(template = %template, candidate = %candidate, matched, "Candidate checked");
    matched
}
