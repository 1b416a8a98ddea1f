use super::{app_router, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use devlink_core::{PostManager, ProfileManager, UserManager};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn test_app(dir: &TempDir) -> Router {
    let users = Arc::new(UserManager::new(dir.path(), "test-secret".into()));
    let profiles = Arc::new(ProfileManager::new(dir.path()));
    let posts = Arc::new(PostManager::new(dir.path()));
    let state = AppState {
        users,
        profiles,
        posts,
    };
    app_router(state, Vec::new())
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
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
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register_and_login(app: &Router, name: &str, email: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "name": name, "email": email, "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": email, "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_ok_without_auth() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}

#[tokio::test]
async fn register_returns_user_without_password_field() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "name": "A", "email": "a@x.com", "password": "secret1" })),
    )
    .await;

    // "A" 不满足名字长度下限
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["name"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "name": "Ada", "email": "a@x.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], json!("Ada"));
    assert!(!body["avatar"].as_str().unwrap().is_empty());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn register_duplicate_email_conflict() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    register_and_login(&app, "Ada", "ada@x.com").await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "name": "Eve", "email": "ada@x.com", "password": "secret2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("AlreadyExists"));
}

#[tokio::test]
async fn register_missing_fields_lists_each_error() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, "POST", "/api/v1/auth/register", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("ValidationFailed"));
    assert_eq!(body["errors"]["name"], json!("Name field is required"));
    assert_eq!(body["errors"]["email"], json!("Email field is required"));
    assert_eq!(
        body["errors"]["password"],
        json!("Password field is required")
    );
}

#[tokio::test]
async fn login_token_grants_access_to_me() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let token = register_and_login(&app, "Ada", "ada@x.com").await;
    let (status, body) = send(&app, "GET", "/api/v1/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], json!("Ada"));
    assert_eq!(body["user"]["email"], json!("ada@x.com"));
    assert!(!body["user"]["avatar"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn login_wrong_password_returns_no_token() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    register_and_login(&app, "Ada", "ada@x.com").await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "ada@x.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn me_without_token_unauthorized() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, _) = send(&app, "GET", "/api/v1/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_routes_ignore_invalid_token() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let (status, _) = send(&app, "GET", "/api/v1/posts", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn second_profile_is_conflict() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    let token = register_and_login(&app, "Ada", "ada@x.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/profiles",
        Some(&token),
        Some(json!({ "profile": { "handle": "ada", "skills": "rust,http" } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["profile"]["handle"], json!("ada"));
    assert_eq!(body["profile"]["user"]["name"], json!("Ada"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/profiles",
        Some(&token),
        Some(json!({ "profile": { "handle": "ada2", "skills": "rust" } })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // 原档案保持可见
    let (status, body) = send(&app, "GET", "/api/v1/profiles/handle/ada", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["handle"], json!("ada"));
}

#[tokio::test]
async fn like_twice_is_conflict() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    let token = register_and_login(&app, "Ada", "ada@x.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/posts",
        Some(&token),
        Some(json!({ "text": "a long enough post body" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let post_id = body["id"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/posts/{}/like", post_id);
    let (status, body) = send(&app, "PUT", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["likes"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "PUT", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("AlreadyLiked"));
}

#[tokio::test]
async fn delete_post_requires_owner() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    let ada = register_and_login(&app, "Ada", "ada@x.com").await;
    let eve = register_and_login(&app, "Eve", "eve@x.com").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/posts",
        Some(&ada),
        Some(json!({ "text": "a long enough post body" })),
    )
    .await;
    let uri = format!("/api/v1/posts/{}", body["id"].as_str().unwrap());

    let (status, _) = send(&app, "DELETE", &uri, Some(&eve), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "DELETE", &uri, Some(&ada), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn deleting_missing_comment_keeps_list() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);
    let token = register_and_login(&app, "Ada", "ada@x.com").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/posts",
        Some(&token),
        Some(json!({ "text": "a long enough post body" })),
    )
    .await;
    let post_id = body["id"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/posts/{}/comments", post_id);
    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(&token),
        Some(json!({ "text": "a perfectly fine comment" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let missing = format!("/api/v1/posts/{}/comments/nope", post_id);
    let (status, _) = send(&app, "DELETE", &missing, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}
