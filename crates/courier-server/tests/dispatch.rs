//! End-to-end dispatch: register, match, bind, invoke, render.

use std::sync::Arc;

use courier_config::DispatcherConfig;
use courier_core::{
    CourierError, DegradationKind, ErrorCategory, FieldShape, MemorySession, ModelView,
    ObjectSchema, ParamSpec, ParamKind, Reply, ScalarType, Session, Value,
};
use courier_extract::{Part, RenderInstruction, RequestData};
use courier_server::{DispatchRequest, Dispatcher, Outcome, RouteDefinition, RouteRegistry};
use http::StatusCode;
use indexmap::IndexMap;
use proptest::prelude::*;
use serde_json::json;

fn body_json(outcome: &Outcome) -> serde_json::Value {
    serde_json::from_slice(&outcome.body().unwrap()).unwrap()
}

fn body_text(outcome: &Outcome) -> String {
    String::from_utf8(outcome.body().unwrap().to_vec()).unwrap()
}

fn employee_schema() -> Arc<ObjectSchema> {
    let dept = ObjectSchema::builder("Departement")
        .field("name", FieldShape::Text)
        .build();
    ObjectSchema::builder("Employee")
        .field("name", FieldShape::Text)
        .field("age", FieldShape::Primitive(ScalarType::Int))
        .field("dept", FieldShape::List(dept))
        .build()
}

fn app() -> Dispatcher {
    let employee = employee_schema();

    let registry = RouteRegistry::builder()
        .route(RouteDefinition::new("/ping", |_| Ok("pong")).controller("Health", "ping"))
        .route(
            RouteDefinition::new("/user/{id}", |args| {
                Ok(format!("user:{}", args.str("id").unwrap_or("?")))
            })
            .controller("Users", "show")
            .param(ParamSpec::text("id")),
        )
        .route(
            RouteDefinition::new("/user/{name}", |_| Ok("shadowed"))
                .controller("Users", "byName"),
        )
        .route(
            RouteDefinition::new("/items", |_| Ok(vec!["a", "b", "c"]))
                .controller("Items", "list")
                .json(),
        )
        .route(
            RouteDefinition::new("/employees", |args| {
                Ok(args.get("e").cloned().unwrap_or_default())
            })
            .controller("Employees", "create")
            .post()
            .param(ParamSpec::object("e", &employee))
            .json(),
        )
        .route(
            RouteDefinition::new("/upload", |args| {
                let files = args.get("files").and_then(Value::as_map).map_or(0, IndexMap::len);
                Ok(format!("files:{files}"))
            })
            .post()
            .param(ParamSpec::new("files", ParamKind::FileMap)),
        )
        .route(
            RouteDefinition::new("/order/{id}", |args| {
                Ok(args.i64("id").unwrap_or_default() * 2)
            })
            .param(ParamSpec::primitive("id", ScalarType::Long))
            .json(),
        )
        .route(
            RouteDefinition::new("/fail", |_| -> anyhow::Result<Reply> {
                anyhow::bail!("database unavailable")
            })
            .controller("Broken", "fail"),
        )
        .route(
            RouteDefinition::new("/login", |args| {
                let user = args.str("user").unwrap_or("anonymous").to_string();
                if let Some(session) = args.get("session").and_then(Value::as_session) {
                    session.put("user", user.clone());
                }
                Ok(ModelView::new("welcome.jsp").with("user", user))
            })
            .post()
            .param(ParamSpec::text("user"))
            .param(ParamSpec::session("session")),
        )
        .route(
            RouteDefinition::new("/search", |args| {
                Ok(args.get("all").cloned().unwrap_or_default())
            })
            .param(ParamSpec::new("all", ParamKind::ValueMap))
            .json(),
        )
        .build()
        .unwrap();

    Dispatcher::with_defaults(registry)
}

#[test]
fn test_literal_route_case_insensitive_verb() {
    let app = app();

    for verb in ["GET", "get", "Get"] {
        let outcome = app.dispatch(&DispatchRequest::new(verb, "/ping"));
        assert_eq!(outcome.status(), StatusCode::OK);
        assert_eq!(body_text(&outcome), "pong");
    }

    let outcome = app.dispatch(&DispatchRequest::new("POST", "/ping"));
    assert_eq!(outcome.status(), StatusCode::NOT_FOUND);

    let outcome = app.dispatch(&DispatchRequest::new("GET", "/ping/"));
    assert_eq!(outcome.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_path_variable_binding() {
    let app = app();

    let outcome = app.dispatch(&DispatchRequest::new("GET", "/user/42"));
    assert_eq!(body_text(&outcome), "user:42");

    let outcome = app.dispatch(&DispatchRequest::new("GET", "/user/42/extra"));
    assert!(matches!(outcome, Outcome::NotFound { ref path, .. } if path == "/user/42/extra"));
}

#[test]
fn test_first_registered_route_wins() {
    let outcome = app().dispatch(&DispatchRequest::new("GET", "/user/ada"));
    match &outcome {
        Outcome::Rendered { route, .. } => assert_eq!(route, "/user/{id}"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(body_text(&outcome), "user:ada");
}

#[test]
fn test_json_list_envelope() {
    let outcome = app().dispatch(&DispatchRequest::new("GET", "/items"));
    assert_eq!(outcome.content_type(), Some("application/json;charset=UTF-8"));
    assert_eq!(
        body_json(&outcome),
        json!({
            "status": "success",
            "code": 200,
            "data": {"count": 3, "items": ["a", "b", "c"]}
        })
    );
}

#[test]
fn test_nested_object_binding() {
    let data = RequestData::new()
        .with_param("e.name", "Ada")
        .with_param("e.age", "36")
        .with_param("e.dept[1].name", "Eng")
        .with_param("e.dept[0].name", "R&D");
    let outcome = app().dispatch(&DispatchRequest::new("POST", "/employees").with_data(data));

    assert!(outcome.degradations().is_empty());
    assert_eq!(
        body_json(&outcome)["data"],
        json!({
            "name": "Ada",
            "age": 36,
            "dept": [{"name": "R&D"}, {"name": "Eng"}]
        })
    );
}

#[test]
fn test_object_without_keys_degrades() {
    let outcome = app().dispatch(&DispatchRequest::new("POST", "/employees"));
    assert_eq!(outcome.status(), StatusCode::OK);
    assert_eq!(outcome.degradations().len(), 1);
    assert_eq!(outcome.degradations()[0].kind, DegradationKind::Missing);
    assert_eq!(body_json(&outcome)["data"], serde_json::Value::Null);
}

#[test]
fn test_object_with_plain_text_fails() {
    let data = RequestData::new().with_param("e", "Ada");
    let outcome = app().dispatch(&DispatchRequest::new("POST", "/employees").with_data(data));
    assert_eq!(outcome.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(matches!(
        outcome.error(),
        Some(CourierError::UnbindableText { .. })
    ));
}

#[test]
fn test_file_map_without_multipart_is_empty() {
    let outcome = app().dispatch(&DispatchRequest::new("POST", "/upload"));
    assert_eq!(body_text(&outcome), "files:0");
}

#[test]
fn test_file_map_with_parts() {
    let data = RequestData::new().with_parts(vec![
        Part::file("avatar", "me.png", vec![1u8, 2, 3]),
        Part::file("cv", "cv.pdf", vec![4u8]),
        Part::text("note", "hello"),
    ]);
    let outcome = app().dispatch(&DispatchRequest::new("POST", "/upload").with_data(data));
    assert_eq!(body_text(&outcome), "files:2");
}

#[test]
fn test_scalar_coercion() {
    let outcome = app().dispatch(&DispatchRequest::new("GET", "/order/21"));
    assert_eq!(body_json(&outcome)["data"], json!(42));
}

#[test]
fn test_scalar_coercion_failure_hides_detail() {
    let outcome = app().dispatch(&DispatchRequest::new("GET", "/order/abc"));
    assert_eq!(outcome.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(outcome.content_type(), Some("text/plain;charset=UTF-8"));
    assert_eq!(body_text(&outcome), "Internal Server Error");

    let error = outcome.error().unwrap();
    assert_eq!(error.category(), ErrorCategory::Binding);
    assert!(matches!(error, CourierError::ScalarCoercion { value, .. } if value == "abc"));
}

#[test]
fn test_error_detail_exposed_when_configured() {
    let app = app();
    let config = DispatcherConfig {
        expose_error_detail: true,
        ..DispatcherConfig::default()
    };
    let registry = RouteRegistry::builder()
        .route(
            RouteDefinition::new("/fail", |_| -> anyhow::Result<Reply> {
                anyhow::bail!("database unavailable")
            }),
        )
        .build()
        .unwrap();
    let verbose = Dispatcher::new(registry, config);

    let hidden = app.dispatch(&DispatchRequest::new("GET", "/fail"));
    assert_eq!(body_text(&hidden), "Internal Server Error");

    let shown = verbose.dispatch(&DispatchRequest::new("GET", "/fail"));
    let text = body_text(&shown);
    assert!(text.contains("/fail"));
    assert!(text.contains("database unavailable"));
}

#[test]
fn test_handler_failure_carries_route() {
    let outcome = app().dispatch(&DispatchRequest::new("GET", "/fail"));
    assert_eq!(outcome.status(), StatusCode::INTERNAL_SERVER_ERROR);
    match outcome.error() {
        Some(CourierError::HandlerInvocation { route, .. }) => assert_eq!(route, "/fail"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_session_binding_and_view_forward() {
    let store = Arc::new(MemorySession::new());
    let session = Session::from_arc(store.clone());
    let request = DispatchRequest::new("POST", "/login")
        .with_data(RequestData::new().with_param("user", "ada"))
        .with_session(session.clone());

    let mut scope: IndexMap<String, Value> = IndexMap::new();
    let outcome = app().dispatch_into(&request, &mut scope);

    match outcome.instruction() {
        Some(RenderInstruction::ViewForward { view_path, .. }) => {
            assert_eq!(view_path, "welcome.jsp");
        }
        other => panic!("unexpected instruction: {other:?}"),
    }
    assert_eq!(outcome.content_type(), None);
    assert_eq!(scope.get("user"), Some(&Value::from("ada")));
    assert_eq!(session.get("user"), Some(Value::from("ada")));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_missing_session_degrades() {
    let request =
        DispatchRequest::new("POST", "/login").with_data(RequestData::new().with_param("user", "ada"));
    let outcome = app().dispatch(&request);

    assert!(outcome.is_rendered());
    let kinds: Vec<DegradationKind> = outcome.degradations().iter().map(|d| d.kind).collect();
    assert_eq!(kinds, [DegradationKind::NoSession]);
}

#[test]
fn test_value_map_coerces_every_value() {
    let data = RequestData::from_query("n=1&n=2&flag=on&q=rust").unwrap();
    let outcome = app().dispatch(&DispatchRequest::new("GET", "/search").with_data(data));
    assert_eq!(
        body_json(&outcome)["data"]["items"],
        json!({"n": [1, 2], "flag": [true], "q": ["rust"]})
    );
}

#[test]
fn test_custom_json_content_type() {
    let registry = RouteRegistry::builder()
        .route(RouteDefinition::new("/n", |_| Ok(1i64)).json())
        .build()
        .unwrap();
    let dispatcher = Dispatcher::new(
        registry,
        DispatcherConfig {
            json_content_type: "application/json".to_string(),
            ..DispatcherConfig::default()
        },
    );
    let outcome = dispatcher.dispatch(&DispatchRequest::new("GET", "/n"));
    assert_eq!(outcome.content_type(), Some("application/json"));
}

#[test]
fn test_concurrent_dispatch_shares_registry() {
    let app = app();
    std::thread::scope(|s| {
        for i in 0..8 {
            let app = &app;
            s.spawn(move || {
                let outcome = app.dispatch(&DispatchRequest::new("GET", format!("/user/{i}")));
                assert_eq!(body_text(&outcome), format!("user:{i}"));
            });
        }
    });
}

proptest! {
    #[test]
    fn test_dispatch_is_idempotent(id in "[a-z0-9]{1,12}") {
        let app = app();
        let request = DispatchRequest::new("GET", format!("/user/{id}"));
        let first = body_text(&app.dispatch(&request));
        let second = body_text(&app.dispatch(&request));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, format!("user:{id}"));
    }
}
