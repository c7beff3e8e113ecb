//! Integration tests for rhtmx-routes
//!
//! Covers end-to-end path building over a realistic route set:
//! - Static, dynamic, catch-all and optional catch-all rendering
//! - Schema validation and inheritance
//! - Query string serialization
//! - Navigation edge cases

use pretty_assertions::assert_eq;
use rhtmx_routes::schema::from_fn;
use rhtmx_routes::*;
use rstest::rstest;
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn app_routes() -> Navigator {
    init_tracing();
    create_routes(
        [
            "/",
            "/dashboard",
            "/dashboard/settings",
            "/blog/[slug]",
            "/users/[id]/posts/[postId]",
            "/docs/[...path]",
            "/shop/[[...filters]]",
        ],
        Vec::<(&str, RouteConfig)>::new(),
    )
}

fn uppercase() -> ValueSpec {
    from_fn(|v: &Value| match v.as_str() {
        Some(s) => SchemaOutput::Value(Value::from(s.to_uppercase())),
        None => SchemaOutput::issue("Expected a string"),
    })
}

// ============================================================================
// End-to-end rendering
// ============================================================================

#[test]
fn test_static_routes() {
    let routes = app_routes();
    assert_eq!(routes.get_route().unwrap(), "/");
    assert_eq!(routes.child("dashboard").get_route().unwrap(), "/dashboard");
    assert_eq!(
        routes.child("dashboard").child("settings").get_route().unwrap(),
        "/dashboard/settings"
    );
}

#[test]
fn test_static_routes_are_idempotent() {
    let settings = app_routes().descend("dashboard/settings");
    let first = settings.get_route().unwrap();
    for _ in 0..3 {
        assert_eq!(settings.get_route().unwrap(), first);
    }
}

#[test]
fn test_dynamic_routes() {
    let routes = app_routes();
    assert_eq!(
        routes
            .child("blog")
            .child("slug")
            .get_route_with(&json!({"slug": "my-article"}), &Value::Null)
            .unwrap(),
        "/blog/my-article"
    );
    assert_eq!(
        routes
            .descend("users/id/posts/postId")
            .get_route_with(&json!({"id": "123", "postId": "456"}), &Value::Null)
            .unwrap(),
        "/users/123/posts/456"
    );
}

#[test]
fn test_dynamic_routes_are_injective() {
    let slug = app_routes().descend("blog/slug");
    let values = ["a", "b", "my-article", "my-article-2", "123", "12 3"];
    let mut seen = std::collections::HashSet::new();
    for v in values {
        let path = slug.get_route_with(&json!({ "slug": v }), &Value::Null).unwrap();
        assert!(seen.insert(path), "duplicate path for {}", v);
    }
}

#[test]
fn test_catch_all_routes() {
    let docs = app_routes().descend("docs/path");
    assert_eq!(
        docs.get_route_with(&json!({"path": ["api", "reference"]}), &Value::Null)
            .unwrap(),
        "/docs/api/reference"
    );
    assert_eq!(
        docs.get_route_with(&json!({"path": ["a"]}), &Value::Null).unwrap(),
        "/docs/a"
    );
}

#[test]
fn test_optional_catch_all_routes() {
    let shop = app_routes().descend("shop/filters");
    assert_eq!(
        shop.get_route_with(&json!({"filters": ["color", "red"]}), &Value::Null)
            .unwrap(),
        "/shop/color/red"
    );
    assert_eq!(
        shop.get_route_with(&json!({"filters": null}), &Value::Null).unwrap(),
        "/shop"
    );
    assert_eq!(shop.get_route().unwrap(), "/shop");
    assert_eq!(
        shop.get_route_with(&json!({"filters": ["x"]}), &Value::Null).unwrap(),
        "/shop/x"
    );
}

#[test]
fn test_missing_params_left_unresolved_by_default() {
    let routes = app_routes();
    assert_eq!(routes.descend("blog/slug").get_route().unwrap(), "/blog/[slug]");
    assert_eq!(routes.descend("docs/path").get_route().unwrap(), "/docs/[...path]");
}

#[test]
fn test_undeclared_child_renders_as_literal() {
    let routes = app_routes();
    assert!(!routes.children().iter().any(|c| c == "admin"));
    assert_eq!(routes.descend("admin/audit").get_route().unwrap(), "/admin/audit");
    assert_eq!(
        routes
            .descend("blog/slug/comments")
            .get_route_with(&json!({"slug": "hello"}), &Value::Null)
            .unwrap(),
        "/blog/hello/comments"
    );
}

#[test]
fn test_unused_params_are_ignored_in_path() {
    let routes = app_routes();
    assert_eq!(
        routes
            .child("dashboard")
            .get_route_with(&json!({"unused": "x"}), &Value::Null)
            .unwrap(),
        "/dashboard"
    );
}

// ============================================================================
// Query strings
// ============================================================================

#[test]
fn test_query_serialization() {
    let routes = app_routes();
    let path = routes
        .child("dashboard")
        .get_route_with(
            &Value::Null,
            &json!({"page": 1, "tags": ["a", "b"], "flag": true, "skip": null}),
        )
        .unwrap();
    assert_eq!(path, "/dashboard?page=1&tags=a&tags=b&flag=true");
    assert!(!path.contains("skip"));
}

#[test]
fn test_empty_query_not_appended() {
    let routes = app_routes();
    assert_eq!(
        routes
            .child("dashboard")
            .get_route_with(&Value::Null, &json!({"skip": null}))
            .unwrap(),
        "/dashboard"
    );
    assert_eq!(routes.get_route_with(&Value::Null, &json!({})).unwrap(), "/");
}

#[test]
fn test_query_on_dynamic_route() {
    let routes = app_routes();
    assert_eq!(
        routes
            .descend("blog/slug")
            .get_route_with(&json!({"slug": "x"}), &json!({"q": "a b"}))
            .unwrap(),
        "/blog/x?q=a%20b"
    );
}

// ============================================================================
// Schemas
// ============================================================================

#[test]
fn test_validation_failure_names_key_and_message() {
    let routes = RouteSet::builder()
        .configure(
            "/users/[id]",
            RouteConfig::new().param(
                "id",
                from_fn(|_: &Value| SchemaOutput::issue("Invalid id")),
            ),
        )
        .navigator();

    let err = routes
        .descend("users/id")
        .get_route_with(&json!({"id": "bad"}), &Value::Null)
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("id"));
    assert!(message.contains("Invalid id"));
    assert!(matches!(err, RouteError::Validation { .. }));
}

#[test]
fn test_async_schema_is_rejected() {
    let routes = RouteSet::builder()
        .configure(
            "/users/[id]",
            RouteConfig::new().param("id", from_fn(|_: &Value| SchemaOutput::Deferred)),
        )
        .navigator();

    let err = routes
        .descend("users/id")
        .get_route_with(&json!({"id": "1"}), &Value::Null)
        .unwrap_err();
    assert_eq!(
        err,
        RouteError::UnsupportedAsyncValidation {
            key: "id".to_string()
        }
    );
}

#[test]
fn test_schema_transforms_value() {
    let routes = RouteSet::builder()
        .configure("/users/[id]", RouteConfig::new().param("id", Constraint::Int))
        .navigator();
    assert_eq!(
        routes
            .descend("users/id")
            .get_route_with(&json!({"id": "0042"}), &Value::Null)
            .unwrap(),
        "/users/42"
    );
}

#[test]
fn test_parent_schema_is_inherited() {
    let routes = RouteSet::builder()
        .configure("/app/[locale]", RouteConfig::new().param("locale", uppercase()))
        .route("/app/[locale]/dashboard")
        .navigator();

    assert_eq!(
        routes
            .descend("app/locale/dashboard")
            .get_route_with(&json!({"locale": "en"}), &Value::Null)
            .unwrap(),
        "/app/EN/dashboard"
    );
}

#[test]
fn test_child_schema_overrides_parent() {
    let routes = RouteSet::builder()
        .configure("/app/[locale]", RouteConfig::new().param("locale", uppercase()))
        .configure(
            "/app/[locale]/dashboard",
            RouteConfig::new().param("locale", Constraint::Lowercase),
        )
        .navigator();

    assert_eq!(
        routes
            .descend("app/locale/dashboard")
            .get_route_with(&json!({"locale": "EN"}), &Value::Null)
            .unwrap(),
        "/app/en/dashboard"
    );
    assert_eq!(
        routes
            .descend("app/locale")
            .get_route_with(&json!({"locale": "en"}), &Value::Null)
            .unwrap(),
        "/app/EN"
    );
}

#[test]
fn test_search_param_schemas() {
    let routes = RouteSet::builder()
        .configure(
            "/products",
            RouteConfig::new().search_param("sort", Constraint::one_of(["asc", "desc"])),
        )
        .route("/products/[id]")
        .navigator();

    assert_eq!(
        routes
            .child("products")
            .get_route_with(&Value::Null, &json!({"sort": "asc"}))
            .unwrap(),
        "/products?sort=asc"
    );

    let err = routes
        .descend("products/id")
        .get_route_with(&json!({"id": 1}), &json!({"sort": "sideways"}))
        .unwrap_err();
    assert_eq!(err.key(), Some("sort"));
}

#[rstest]
#[case(json!({"a": "bad", "b": "bad"}), "a")]
#[case(json!({"b": "bad", "a": "bad"}), "b")]
fn test_fail_fast_in_insertion_order(#[case] params: Value, #[case] expected: &str) {
    let routes = RouteSet::builder()
        .configure(
            "/x/[a]/[b]",
            RouteConfig::new()
                .param("a", Constraint::Int)
                .param("b", Constraint::Int),
        )
        .navigator();

    let err = routes
        .descend("x/a/b")
        .get_route_with(&params, &Value::Null)
        .unwrap_err();
    assert_eq!(err.key(), Some(expected));
}

// ============================================================================
// Route set behaviour
// ============================================================================

#[test]
fn test_independent_route_sets_coexist() {
    let a = create_routes(["/a/[id]"], [("/a/[id]", RouteConfig::new().param("id", Constraint::Int))]);
    let b = create_routes(["/a/[id]"], Vec::<(&str, RouteConfig)>::new());

    assert!(a
        .descend("a/id")
        .get_route_with(&json!({"id": "x"}), &Value::Null)
        .is_err());
    assert_eq!(
        b.descend("a/id")
            .get_route_with(&json!({"id": "x"}), &Value::Null)
            .unwrap(),
        "/a/x"
    );
}

#[test]
fn test_route_set_is_shareable_across_threads() {
    let routes = app_routes();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let slug = routes.descend("blog/slug");
            std::thread::spawn(move || {
                slug.get_route_with(&json!({ "slug": format!("post-{}", i) }), &Value::Null)
                    .unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("/blog/post-{}", i));
    }
}

#[test]
fn test_every_declared_route_reachable_from_root() {
    let routes = app_routes();
    for pattern in routes.route_set().patterns() {
        let mut nav = routes.clone();
        for seg in parse_pattern(pattern) {
            assert!(nav.children().contains(&seg.name));
            nav = nav.child(seg.name);
        }
        assert_eq!(nav.pattern(), pattern);
    }
}

#[test]
fn test_conflicting_siblings_first_declared_wins() {
    let routes = create_routes(
        ["/files/[...path]", "/files/[path]"],
        Vec::<(&str, RouteConfig)>::new(),
    );
    let files = routes.descend("files/path");
    assert_eq!(files.pattern(), "/files/[...path]");
    assert_eq!(
        files
            .get_route_with(&json!({"path": ["a", "b"]}), &Value::Null)
            .unwrap(),
        "/files/a/b"
    );
}
