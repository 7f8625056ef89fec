//! End-to-end dispatch tests over the full matching pipeline.

use std::collections::BTreeMap;

use hookroute::routing::{DispatchOutcome, Dispatcher, MethodTag, QueryRules, RouteRegistry};

fn no_params() -> BTreeMap<String, String> {
    BTreeMap::new()
}

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn handled<T: std::fmt::Debug>(outcome: DispatchOutcome<T>) -> T {
    match outcome {
        DispatchOutcome::Handled(value) => value,
        other => panic!("expected a handled outcome, got {:?}", other),
    }
}

#[test]
fn test_exact_route_is_selected() {
    let mut registry = RouteRegistry::new();
    registry.get("flight", |_| "hello", QueryRules::default());

    let dispatcher = Dispatcher::new(&registry);
    let outcome = dispatcher.dispatch(MethodTag::Get, "/flight/", &no_params());
    assert_eq!(handled(outcome), "hello");
}

#[test]
fn test_path_variable_round_trip() {
    let mut registry = RouteRegistry::new();
    registry.get(
        "flight/{altitude}",
        |request| request.path_variable("altitude").unwrap_or("").to_string(),
        QueryRules::default(),
    );

    let dispatcher = Dispatcher::new(&registry);
    let outcome = dispatcher.dispatch(MethodTag::Get, "flight/high", &no_params());
    assert_eq!(handled(outcome), "high");
}

#[test]
fn test_registration_order_breaks_ties() {
    let mut registry = RouteRegistry::new();
    registry.get("bad/{x}", |_| "bad".to_string(), QueryRules::default());
    registry.get(
        "correct/{x}",
        |request| request.path_variable("x").unwrap_or("").to_string(),
        QueryRules::default(),
    );
    registry.get("notgood/{x}", |_| "not good at all".to_string(), QueryRules::default());

    let dispatcher = Dispatcher::new(&registry);
    let outcome = dispatcher.dispatch(MethodTag::Get, "/correct/yeah/", &no_params());
    assert_eq!(handled(outcome), "yeah");
}

#[test]
fn test_query_parameters_are_available_to_handlers() {
    let mut registry = RouteRegistry::new();
    registry.get(
        "param",
        |request| request.parameter("foo").unwrap_or("").to_string(),
        QueryRules::default(),
    );

    let dispatcher = Dispatcher::new(&registry);
    let outcome = dispatcher.dispatch(MethodTag::Get, "param/", &params(&[("foo", "bar")]));
    assert_eq!(handled(outcome), "bar");
}

#[test]
fn test_method_specific_bucket_beats_agnostic_bucket() {
    let mut registry = RouteRegistry::new();
    registry.any("thing", |_| "any", QueryRules::default());
    registry.post("thing", |_| "post", QueryRules::default());

    let dispatcher = Dispatcher::new(&registry);
    assert_eq!(
        handled(dispatcher.dispatch(MethodTag::Post, "thing", &no_params())),
        "post"
    );
    // Other methods still fall through to the agnostic bucket.
    assert_eq!(
        handled(dispatcher.dispatch(MethodTag::Get, "thing", &no_params())),
        "any"
    );
}

#[test]
fn test_unmatched_method_yields_no_match() {
    let mut registry = RouteRegistry::new();
    registry.get("flight", |_| "get", QueryRules::default());
    registry.any("boat", |_| "any", QueryRules::default());

    let dispatcher = Dispatcher::new(&registry);
    assert!(matches!(
        dispatcher.dispatch(MethodTag::Delete, "flight", &no_params()),
        DispatchOutcome::NoMatch
    ));
}

#[test]
fn test_redirect_carries_target_and_default_status() {
    let mut registry: RouteRegistry<String> = RouteRegistry::new();
    registry.redirect("moved/{page}", "https://example.com/landing", QueryRules::default());

    let dispatcher = Dispatcher::new(&registry);
    match dispatcher.dispatch(MethodTag::Get, "moved/about", &no_params()) {
        DispatchOutcome::Redirect { target, status } => {
            assert_eq!(target, "https://example.com/landing");
            assert_eq!(status, 301);
        }
        other => panic!("expected a redirect outcome, got {:?}", other),
    }
}

#[test]
fn test_redirect_with_explicit_status() {
    let mut registry: RouteRegistry<String> = RouteRegistry::new();
    registry.redirect_with_status("moved", "https://example.com/", 302, QueryRules::default());

    let dispatcher = Dispatcher::new(&registry);
    match dispatcher.dispatch(MethodTag::Get, "moved", &no_params()) {
        DispatchOutcome::Redirect { status, .. } => assert_eq!(status, 302),
        other => panic!("expected a redirect outcome, got {:?}", other),
    }
}

#[test]
fn test_match_methods_routes_all_named_methods() {
    let mut registry = RouteRegistry::new();
    registry
        .match_methods(&["GET", "PUT"], "resource", |_| "ok", QueryRules::default())
        .unwrap();

    let dispatcher = Dispatcher::new(&registry);
    assert_eq!(
        handled(dispatcher.dispatch(MethodTag::Get, "resource", &no_params())),
        "ok"
    );
    assert_eq!(
        handled(dispatcher.dispatch(MethodTag::Put, "resource", &no_params())),
        "ok"
    );
    assert!(matches!(
        dispatcher.dispatch(MethodTag::Post, "resource", &no_params()),
        DispatchOutcome::NoMatch
    ));
}

#[test]
fn test_invalid_method_name_registers_nothing() {
    let mut registry = RouteRegistry::new();
    let result = registry.match_methods(
        &["GET", "TRACE"],
        "resource",
        |_| "ok",
        QueryRules::default(),
    );

    assert!(result.is_err());
    let dispatcher = Dispatcher::new(&registry);
    assert!(matches!(
        dispatcher.dispatch(MethodTag::Get, "resource", &no_params()),
        DispatchOutcome::NoMatch
    ));
}

#[test]
fn test_segment_count_must_match_exactly() {
    let mut registry = RouteRegistry::new();
    registry.get("a/{b}", |_| "two", QueryRules::default());

    let dispatcher = Dispatcher::new(&registry);
    assert!(matches!(
        dispatcher.dispatch(MethodTag::Get, "a", &no_params()),
        DispatchOutcome::NoMatch
    ));
    assert!(matches!(
        dispatcher.dispatch(MethodTag::Get, "a/b/c", &no_params()),
        DispatchOutcome::NoMatch
    ));
}

#[test]
fn test_malformed_template_never_matches_and_never_errors() {
    let mut registry = RouteRegistry::new();
    registry.get("broken/{", |_| "broken", QueryRules::default());
    registry.get("broken/{x}", |_| "ok", QueryRules::default());

    let dispatcher = Dispatcher::new(&registry);
    // The malformed template is registered first but cannot match a
    // literal path segment, so the well-formed one wins.
    assert_eq!(
        handled(dispatcher.dispatch(MethodTag::Get, "broken/anything", &no_params())),
        "ok"
    );
}

#[test]
fn test_path_variables_are_sanitized() {
    let mut registry = RouteRegistry::new();
    registry.get(
        "echo/{value}",
        |request| request.path_variable("value").unwrap_or("").to_string(),
        QueryRules::default(),
    );

    let dispatcher = Dispatcher::new(&registry);
    let outcome = dispatcher.dispatch(MethodTag::Get, "echo/a<b>'c", &no_params());
    assert_eq!(handled(outcome), "abc");
}
