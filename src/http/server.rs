//! HTTP host binding for the dispatch engine.
//!
//! # Responsibilities
//! - Wire the engine into an axum Router as a catch-all handler
//! - Extract method, decoded path, and query parameters per request
//! - Map dispatch outcomes back to HTTP responses
//! - Wire up middleware (tracing, timeout) and request IDs
//!
//! # Design Decisions
//! - The registry is frozen behind an `Arc` before serving begins, so
//!   every dispatch sees the same immutable table
//! - Handlers are synchronous; the engine never suspends mid-dispatch
//! - An unmapped HTTP method (e.g. PATCH) dispatches against the
//!   method-agnostic bucket only
//! - No-match becomes 404 so hosts can layer their own fallback

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use url::form_urlencoded;
use uuid::Uuid;

use crate::routing::dispatcher::{DispatchOutcome, Dispatcher};
use crate::routing::method::MethodTag;
use crate::routing::registry::RouteRegistry;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state injected into the catch-all handler.
#[derive(Clone)]
struct HostState {
    registry: Arc<RouteRegistry<Response>>,
}

/// Binds a frozen route registry to an axum server.
pub struct RouteHost {
    registry: Arc<RouteRegistry<Response>>,
    request_timeout: Duration,
}

impl RouteHost {
    /// Freeze a registry and prepare it for serving.
    pub fn new(registry: RouteRegistry<Response>) -> Self {
        Self {
            registry: Arc::new(registry),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the axum router with the catch-all dispatch handler and
    /// middleware layers.
    pub fn into_router(self) -> Router {
        let state = HostState {
            registry: self.registry,
        };

        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(self.request_timeout))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Route host starting");

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Route host stopped");
        Ok(())
    }
}

/// Catch-all handler: extract, dispatch, convert the outcome.
async fn dispatch_handler(State(state): State<HostState>, request: Request<Body>) -> Response {
    let request_id = Uuid::new_v4();
    let method = map_method(request.method());
    let path = percent_decode_str(request.uri().path())
        .decode_utf8_lossy()
        .into_owned();
    let params = parse_query(request.uri().query().unwrap_or(""));

    tracing::debug!(
        request_id = %request_id,
        http_method = %request.method(),
        path = %path,
        "Handling request"
    );

    let dispatcher = Dispatcher::new(state.registry.as_ref());
    match dispatcher.dispatch(method, &path, &params) {
        DispatchOutcome::Handled(response) => response,
        DispatchOutcome::Redirect { target, status } => {
            tracing::debug!(request_id = %request_id, target = %target, status, "Redirecting");
            redirect_response(&target, status)
        }
        DispatchOutcome::NoMatch => {
            tracing::debug!(request_id = %request_id, path = %path, "No route matched");
            (StatusCode::NOT_FOUND, "No matching route found").into_response()
        }
    }
}

/// Map an HTTP method onto a dispatch bucket. Methods without a bucket
/// fall through to the method-agnostic one.
fn map_method(method: &Method) -> MethodTag {
    match method.as_str() {
        "GET" => MethodTag::Get,
        "POST" => MethodTag::Post,
        "HEAD" => MethodTag::Head,
        "PUT" => MethodTag::Put,
        "DELETE" => MethodTag::Delete,
        _ => MethodTag::Any,
    }
}

/// Decode a raw query string into a parameter map. Repeated keys keep the
/// last value.
fn parse_query(query: &str) -> BTreeMap<String, String> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn redirect_response(target: &str, status: u16) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() =
        StatusCode::from_u16(status).unwrap_or(StatusCode::MOVED_PERMANENTLY);
    if let Ok(value) = HeaderValue::from_str(target) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    use crate::routing::query::QueryRules;

    fn host_with_routes() -> RouteHost {
        let mut registry: RouteRegistry<Response> = RouteRegistry::new();
        registry.get(
            "flight/{altitude}",
            |request| {
                format!("altitude={}", request.path_variable("altitude").unwrap_or(""))
                    .into_response()
            },
            QueryRules::default(),
        );
        registry.get(
            "echo",
            |request| {
                format!("foo={}", request.parameter("foo").unwrap_or(""))
                    .into_response()
            },
            QueryRules::default(),
        );
        registry.redirect("legacy", "https://example.com/new", QueryRules::default());
        RouteHost::new(registry)
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_handled_route_returns_handler_response() {
        let app = host_with_routes().into_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/flight/high")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "altitude=high");
    }

    #[tokio::test]
    async fn test_path_is_percent_decoded_before_dispatch() {
        let app = host_with_routes().into_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/flight/hi%20gh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "altitude=hi gh");
    }

    #[tokio::test]
    async fn test_query_parameters_reach_the_handler() {
        let app = host_with_routes().into_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/echo?foo=bar")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "foo=bar");
    }

    #[tokio::test]
    async fn test_redirect_outcome_sets_location_and_status() {
        let app = host_with_routes().into_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/legacy")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://example.com/new"
        );
    }

    #[tokio::test]
    async fn test_unmatched_request_is_404() {
        let app = host_with_routes().into_router();
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/flight/high")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
