//! Route registration and storage.
//!
//! # Responsibilities
//! - Store routes in per-method buckets, preserving insertion order
//! - Normalize templates and merge global query rules at registration
//! - Expose the registration API and a read-only snapshot
//!
//! # Design Decisions
//! - Append-only: routes are immutable values, never removed or edited
//! - Order within a bucket is the tie-break for overlapping templates,
//!   so buckets are vectors, not keyed maps
//! - Registration takes `&mut self` and dispatch borrows shared, so the
//!   borrow checker keeps the two phases from interleaving
//! - Template syntax is not validated: a malformed template never
//!   matches, it never errors

use std::sync::Arc;

use tracing::debug;

use crate::routing::error::RouteError;
use crate::routing::method::MethodTag;
use crate::routing::query::QueryRules;
use crate::routing::request::Request;

/// Default status code for redirect routes.
pub const DEFAULT_REDIRECT_STATUS: u16 = 301;

/// An invocable route handler.
pub type HandlerFn<T> = Arc<dyn Fn(&Request) -> T + Send + Sync>;

/// What a route does when it wins a dispatch.
#[derive(Clone)]
pub enum HandlerRef<T> {
    /// Call the function with the assembled request view.
    Invocable(HandlerFn<T>),
    /// Signal a redirect; no request view is built.
    Redirect { target: String, status: u16 },
}

impl<T> std::fmt::Debug for HandlerRef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerRef::Invocable(_) => f.write_str("Invocable"),
            HandlerRef::Redirect { target, status } => f
                .debug_struct("Redirect")
                .field("target", target)
                .field("status", status)
                .finish(),
        }
    }
}

/// A registered route. Immutable once added; its identity is its position
/// within its method bucket.
#[derive(Debug, Clone)]
pub struct Route<T> {
    /// Method bucket the route lives in.
    pub method: MethodTag,
    /// Template with leading slashes stripped.
    pub template: String,
    /// Query rules after the registration-time merge with global rules.
    pub rules: QueryRules,
    pub(crate) handler: HandlerRef<T>,
}

impl<T> Route<T> {
    /// True if the route is a redirect descriptor.
    pub fn is_redirect(&self) -> bool {
        matches!(self.handler, HandlerRef::Redirect { .. })
    }
}

/// Ordered route storage, bucketed by method tag.
pub struct RouteRegistry<T> {
    buckets: [Vec<Route<T>>; 6],
    global_rules: QueryRules,
}

impl<T> Default for RouteRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            global_rules: QueryRules::default(),
        }
    }

    /// Set rules merged into every subsequently registered route.
    ///
    /// Routes registered before this call are unaffected; the merge
    /// happens once, at registration.
    pub fn set_global_rules(&mut self, rules: QueryRules) {
        self.global_rules = rules;
    }

    /// Register a route in the method-agnostic bucket.
    pub fn any<F>(&mut self, template: &str, handler: F, rules: QueryRules)
    where
        F: Fn(&Request) -> T + Send + Sync + 'static,
    {
        self.add_route(MethodTag::Any, template, HandlerRef::Invocable(Arc::new(handler)), rules);
    }

    /// Register a GET route.
    pub fn get<F>(&mut self, template: &str, handler: F, rules: QueryRules)
    where
        F: Fn(&Request) -> T + Send + Sync + 'static,
    {
        self.add_route(MethodTag::Get, template, HandlerRef::Invocable(Arc::new(handler)), rules);
    }

    /// Register a POST route.
    pub fn post<F>(&mut self, template: &str, handler: F, rules: QueryRules)
    where
        F: Fn(&Request) -> T + Send + Sync + 'static,
    {
        self.add_route(MethodTag::Post, template, HandlerRef::Invocable(Arc::new(handler)), rules);
    }

    /// Register a HEAD route.
    pub fn head<F>(&mut self, template: &str, handler: F, rules: QueryRules)
    where
        F: Fn(&Request) -> T + Send + Sync + 'static,
    {
        self.add_route(MethodTag::Head, template, HandlerRef::Invocable(Arc::new(handler)), rules);
    }

    /// Register a PUT route.
    pub fn put<F>(&mut self, template: &str, handler: F, rules: QueryRules)
    where
        F: Fn(&Request) -> T + Send + Sync + 'static,
    {
        self.add_route(MethodTag::Put, template, HandlerRef::Invocable(Arc::new(handler)), rules);
    }

    /// Register a DELETE route.
    pub fn delete<F>(&mut self, template: &str, handler: F, rules: QueryRules)
    where
        F: Fn(&Request) -> T + Send + Sync + 'static,
    {
        self.add_route(MethodTag::Delete, template, HandlerRef::Invocable(Arc::new(handler)), rules);
    }

    /// Register one handler under several method names at once.
    ///
    /// Every name is validated before anything is registered, so an
    /// unknown method aborts the whole batch.
    pub fn match_methods<F>(
        &mut self,
        methods: &[&str],
        template: &str,
        handler: F,
        rules: QueryRules,
    ) -> Result<(), RouteError>
    where
        F: Fn(&Request) -> T + Send + Sync + 'static,
    {
        let tags = methods
            .iter()
            .map(|name| MethodTag::parse(name))
            .collect::<Result<Vec<_>, _>>()?;

        let handler: HandlerFn<T> = Arc::new(handler);
        for tag in tags {
            self.add_route(
                tag,
                template,
                HandlerRef::Invocable(Arc::clone(&handler)),
                rules.clone(),
            );
        }
        Ok(())
    }

    /// Register a redirect with the default 301 status.
    pub fn redirect(&mut self, template: &str, target: &str, rules: QueryRules) {
        self.redirect_with_status(template, target, DEFAULT_REDIRECT_STATUS, rules);
    }

    /// Register a redirect with an explicit status code. Redirects live in
    /// the method-agnostic bucket.
    pub fn redirect_with_status(
        &mut self,
        template: &str,
        target: &str,
        status: u16,
        rules: QueryRules,
    ) {
        self.add_route(
            MethodTag::Any,
            template,
            HandlerRef::Redirect {
                target: target.to_string(),
                status,
            },
            rules,
        );
    }

    /// Routes registered under one method tag, in registration order.
    pub fn routes_for(&self, method: MethodTag) -> &[Route<T>] {
        &self.buckets[method.index()]
    }

    /// All routes, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &Route<T>> {
        MethodTag::ALL
            .iter()
            .flat_map(|tag| self.routes_for(*tag).iter())
    }

    /// Total number of registered routes.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn add_route(
        &mut self,
        method: MethodTag,
        template: &str,
        handler: HandlerRef<T>,
        rules: QueryRules,
    ) {
        let template = template.trim_start_matches('/').to_string();
        let rules = rules.merged_with(&self.global_rules);

        debug!(
            method = %method,
            template = %template,
            redirect = matches!(handler, HandlerRef::Redirect { .. }),
            "Route registered"
        );

        self.buckets[method.index()].push(Route {
            method,
            template,
            rules,
            handler,
        });
    }
}
