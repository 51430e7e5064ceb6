//! HTTP API tests, driven in-process through the router.

mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use propcrm::store::Store;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{TestEnv, standard_workspace};

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_workspace(app: &Router, token: &str, name: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/admin/workspaces",
        Some(token),
        Some(json!({ "display_name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

#[tokio::test]
async fn test_health() {
    let env = TestEnv::new();
    let app = env.router();

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let env = TestEnv::new();
    let app = env.router();

    let (status, _) = send(&app, Method::GET, "/api/v1/admin/workspaces", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/admin/workspaces",
        Some("propcrm_deadbeef_000000000000000000000000"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_workspace_returns_prefill_report() {
    let env = TestEnv::new();
    let app = env.router();

    let data = create_workspace(&app, &env.admin_token, "Agence Centrale").await;

    assert_eq!(data["workspace"]["display_name"], "Agence Centrale");
    assert_eq!(data["workspace"]["is_template"], false);
    assert!(!data["workspace"]["prefilled_at"].is_null());
    assert_eq!(data["prefill"]["template_workspace_id"], env.template.id);
    assert!(data["prefill"]["views"]["views_copied"].as_u64().unwrap() > 0);
    assert_eq!(data["prefill"]["favorites"]["favorites_copied"], 2);
}

#[tokio::test]
async fn test_create_workspace_rejects_empty_name() {
    let env = TestEnv::new();
    let app = env.router();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/admin/workspaces",
        Some(&env.admin_token),
        Some(json!({ "display_name": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"].is_null());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_and_list_workspaces() {
    let env = TestEnv::new();
    let app = env.router();

    let data = create_workspace(&app, &env.admin_token, "Agence Centrale").await;
    let id = data["workspace"]["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/admin/workspaces/{id}"),
        Some(&env.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert!(!body["data"]["prefilled_at"].is_null());

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/admin/workspaces",
        Some(&env.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["has_more"], false);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/admin/workspaces/00000000-0000-0000-0000-000000000000",
        Some(&env.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_prefill_endpoint() {
    let env = TestEnv::new();
    let app = env.router();
    let ws = standard_workspace(env.store.as_ref(), "Agence du Port");
    let uri = format!("/api/v1/admin/workspaces/{}/prefill", ws.id);

    let (status, body) = send(&app, Method::POST, &uri, Some(&env.admin_token), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["workspace_id"], ws.id);

    let (status, body) = send(&app, Method::POST, &uri, Some(&env.admin_token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains(&ws.id));
}

#[tokio::test]
async fn test_prefill_template_is_bad_request() {
    let env = TestEnv::new();
    let app = env.router();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/admin/workspaces/{}/prefill", env.template.id),
        Some(&env.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_workspace_views() {
    let env = TestEnv::new();
    let app = env.router();

    let data = create_workspace(&app, &env.admin_token, "Agence Centrale").await;
    let id = data["workspace"]["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/admin/workspaces/{id}/views"),
        Some(&env.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let views = body["data"].as_array().unwrap();
    assert_eq!(
        views.len() as u64,
        data["prefill"]["views"]["views_copied"].as_u64().unwrap()
    );
    let kanban = views.iter().find(|v| v["type"] == "kanban").unwrap();
    assert!(!kanban["groups"].as_array().unwrap().is_empty());
    assert!(!kanban["kanban_field_metadata_id"].is_null());
}

#[tokio::test]
async fn test_list_views_without_schema_is_not_found() {
    let env = TestEnv::new();
    let app = env.router();

    let ws = standard_workspace(env.store.as_ref(), "Agence du Port");
    env.store.drop_workspace_schema(&ws.schema_name).unwrap();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/admin/workspaces/{}/views", ws.id),
        Some(&env.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["data"].is_null());
}
