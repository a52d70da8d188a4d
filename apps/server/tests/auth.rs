use std::time::Duration;

use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rand::{rngs::OsRng, RngCore};
use storefront_server::{api::app_router, build_state, config::Config};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin-password";

fn test_config(dir: &TempDir, with_auth: bool) -> Config {
    let (jwt_secret, admin_email, admin_password_hash) = if with_auth {
        let mut secret = [0u8; 32];
        OsRng.fill_bytes(&mut secret);
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(ADMIN_PASSWORD.as_bytes(), &salt)
            .unwrap()
            .to_string();
        (
            Some(secret.to_vec()),
            Some(ADMIN_EMAIL.to_string()),
            Some(hash),
        )
    } else {
        (None, None, None)
    };

    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().into_owned(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        jwt_secret,
        token_ttl: Duration::from_secs(3600),
        admin_email,
        admin_password_hash,
    }
}

async fn build_test_router(dir: &TempDir, with_auth: bool) -> Router {
    let config = test_config(dir, with_auth);
    let state = build_state(&config).await.unwrap();
    app_router(state, &config)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await
}

#[tokio::test]
async fn admin_routes_reject_anonymous_and_customers() {
    let dir = tempdir().unwrap();
    let app = build_test_router(&dir, true).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/admin/dashboard/stats", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let (status, signup) = send(
        &app,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(serde_json::json!({ "email": "Shopper@Example.com", "password": "hunter2hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(signup["user"]["role"], "customer");
    assert!(signup["user"].get("passwordHash").is_none());
    let customer_token = signup["accessToken"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/admin/dashboard/stats",
        Some(&customer_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, admin) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin["tokenType"], "Bearer");
    let admin_token = admin["accessToken"].as_str().unwrap().to_string();

    let (status, stats) = send(
        &app,
        Method::GET,
        "/api/v1/admin/dashboard/stats",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalCustomers"], 1);
    assert_eq!(stats["totalProducts"], 0);
}

#[tokio::test]
async fn admin_deletes_categories_by_id() {
    let dir = tempdir().unwrap();
    let app = build_test_router(&dir, true).await;
    let (_, admin) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let token = admin["accessToken"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/v1/admin/categories/ghost",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/admin/categories",
        Some(&token),
        Some(serde_json::json!({ "name": "Cameras" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/v1/admin/categories/{}", created["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn signup_login_and_me() {
    let dir = tempdir().unwrap();
    let app = build_test_router(&dir, true).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/auth/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authEnabled"], true);

    let signup = serde_json::json!({ "email": "new@example.com", "password": "short" });
    let (status, _) = send(&app, Method::POST, "/api/v1/auth/signup", None, Some(signup)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let signup = serde_json::json!({ "email": "new@example.com", "password": "long-enough" });
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(signup.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/api/v1/auth/signup", None, Some(signup)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = login(&app, "new@example.com", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = login(&app, "nobody@example.com", "long-enough").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = login(&app, "NEW@example.com", "long-enough").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["accessToken"].as_str().unwrap().to_string();

    let (status, me) = send(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "new@example.com");

    let (status, _) = send(&app, Method::GET, "/api/v1/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn auth_routes_are_hidden_without_a_secret() {
    let dir = tempdir().unwrap();
    let app = build_test_router(&dir, false).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/auth/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authEnabled"], false);

    let (status, _) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/v1/admin/dashboard/stats", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/v1/categories", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
