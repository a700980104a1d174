//! End-to-end dispatch through the router and the container.

use std::sync::Arc;
use std::thread;

use controller_router::app;
use controller_router::Component;
use controller_router::config::DiscoveryConfig;
use controller_router::container::ContainerError;
use controller_router::http::Response;
use controller_router::routing::RouterError;

mod common;

use common::{BlogController, Casual, Counter, Greeter, GREETER};

fn dispatch(router: &controller_router::Router, uri: &str, method: &str) -> Response {
    let mut response = Response::new();
    router.dispatch(uri, method, &mut response).unwrap();
    response
}

#[test]
fn test_home_page() {
    let router = app::bootstrap(&DiscoveryConfig::default()).unwrap();
    let response = dispatch(&router, "/", "GET");

    assert_eq!(response.status(), 200);
    assert!(response.body().starts_with("Welcome to the Home Page!"));
    assert_eq!(response.header("content-type"), Some("text/html; charset=utf-8"));
}

#[test]
fn test_user_lookup_by_capture() {
    let router = app::bootstrap(&DiscoveryConfig::default()).unwrap();
    let response = dispatch(&router, "/user/2", "GET");

    let user: serde_json::Value = serde_json::from_str(response.body()).unwrap();
    assert_eq!(user["id"], 2);
    assert_eq!(user["name"], "Bob");
    assert_eq!(response.header("Content-Type"), Some("application/json"));
}

#[test]
fn test_unknown_user_renders_null() {
    let router = app::bootstrap(&DiscoveryConfig::default()).unwrap();
    let response = dispatch(&router, "/user/99", "GET");
    assert_eq!(response.body(), "null");
}

#[test]
fn test_user_listing() {
    let router = app::bootstrap(&DiscoveryConfig::default()).unwrap();
    let response = dispatch(&router, "/users", "GET");

    let users: Vec<serde_json::Value> = serde_json::from_str(response.body()).unwrap();
    let names: Vec<&str> = users.iter().filter_map(|u| u["name"].as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Charlie"]);
}

#[test]
fn test_demo_not_found_hook() {
    let router = app::bootstrap(&DiscoveryConfig::default()).unwrap();
    let response = dispatch(&router, "/invalid-route", "GET");

    assert_eq!(response.status(), 404);
    assert_eq!(response.body(), "Route /invalid-route with method GET not found.");
}

#[test]
fn test_non_ascii_digits_do_not_match_numeric_route() {
    let router = app::bootstrap(&DiscoveryConfig::default()).unwrap();
    let response = dispatch(&router, "/user/\u{0662}", "GET");

    assert_eq!(response.status(), 404);
    assert_eq!(
        response.body(),
        "Route /user/\u{0662} with method GET not found."
    );
}

#[test]
fn test_method_mismatch_is_not_found() {
    let router = app::bootstrap(&DiscoveryConfig::default()).unwrap();
    let response = dispatch(&router, "/users", "POST");
    assert_eq!(response.status(), 404);
}

#[test]
fn test_first_registered_match_wins() {
    let router = common::blog_router();

    assert_eq!(dispatch(&router, "/blog/2024/hello-world", "GET").body(), "post 2024/hello-world");
    assert_eq!(dispatch(&router, "/blog/old-stuff/page", "GET").body(), "archive old-stuff/page");
}

#[test]
fn test_patterns_are_anchored() {
    let router = common::blog_router();

    let err = router
        .dispatch("/prefix/serial", "GET", &mut Response::new())
        .unwrap_err();
    assert!(err.is_not_found());

    let err = router
        .dispatch("/serial/suffix", "GET", &mut Response::new())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_route_not_found_without_hook() {
    let router = common::blog_router();
    let err = router
        .dispatch("/nowhere", "DELETE", &mut Response::new())
        .unwrap_err();

    assert!(matches!(
        err,
        RouterError::RouteNotFound { ref uri, ref method } if uri == "/nowhere" && method == "DELETE"
    ));
}

#[test]
fn test_declared_methods_only() {
    let router = common::blog_router();

    let response = dispatch(&router, "/submit", "PUT");
    assert_eq!(response.status(), 201);
    assert_eq!(response.body(), "created");

    assert!(router.dispatch("/submit", "GET", &mut Response::new()).is_err());
    // Methods compare exactly.
    assert!(router.dispatch("/submit", "post", &mut Response::new()).is_err());
}

#[test]
fn test_controller_is_a_singleton() {
    let router = common::blog_router();

    let first = dispatch(&router, "/serial", "GET").into_body();
    let second = dispatch(&router, "/serial", "GET").into_body();
    assert_eq!(first, second);

    let a = router.container().get(BlogController::ID).unwrap();
    let b = router.container().get(BlogController::ID).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_binding_selects_implementation() {
    let router = common::blog_router();
    assert_eq!(dispatch(&router, "/hello/ada", "GET").body(), "Good day, ada");

    // The factory runs on every resolution, but the controller captured its
    // greeter when it was built.
    common::bind_greeter::<Casual>(&router);
    assert_eq!(dispatch(&router, "/hello/ada", "GET").body(), "Good day, ada");

    let greeter = router.container().resolve::<Greeter>(GREETER).unwrap();
    assert_eq!(greeter.0.greet("ada"), "hey ada");
}

#[test]
fn test_rebinding_before_first_use() {
    let router = common::blog_router();
    common::bind_greeter::<Casual>(&router);

    assert_eq!(dispatch(&router, "/hello/grace", "GET").body(), "hey grace");
}

#[test]
fn test_registering_twice_appends_routes() {
    let mut router = common::blog_router();
    let before = router.routes().count_for(BlogController::ID);

    router.register_controller(BlogController::ID).unwrap();

    assert_eq!(router.routes().count_for(BlogController::ID), before * 2);
    assert_eq!(dispatch(&router, "/serial", "GET").status(), 200);
}

#[test]
fn test_handler_failure_is_reported() {
    let router = common::blog_router();
    let err = router
        .dispatch("/broken", "GET", &mut Response::new())
        .unwrap_err();

    assert!(!err.is_not_found());
    assert!(matches!(err, RouterError::Handler { ref action, .. } if action == "broken"));
}

#[test]
fn test_unbound_dependency_fails_at_dispatch() {
    let router = common::blog_router();
    router.container().bind(GREETER, "fixtures::Nowhere");

    let err = router
        .dispatch("/serial", "GET", &mut Response::new())
        .unwrap_err();
    assert!(matches!(
        err,
        RouterError::Container(ContainerError::Reflection { ref id, .. }) if id == "fixtures::Nowhere"
    ));
}

#[test]
fn test_concurrent_dispatch_shares_one_controller() {
    let router = Arc::new(common::blog_router());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let router = router.clone();
            thread::spawn(move || dispatch(&router, "/serial", "GET").into_body())
        })
        .collect();

    let bodies: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));

    let counter = router.container().component::<Counter>().unwrap();
    assert_eq!(bodies[0], counter.serial.to_string());
}
