use serde_json::{Value, json};

use super::*;
use crate::config::ApiConfig;
use crate::http::{Body, Method, MockTransport};

// =============================================================
// Helpers
// =============================================================

fn user_json() -> Value {
    json!({
        "id": "u-1",
        "userType": "customer",
        "fname": "Ada",
        "lname": "Lovelace",
        "username": "ada",
        "email": "ada@example.com",
        "profile": null
    })
}

fn api(mock: &MockTransport) -> AuthApi<MockTransport> {
    let config = ApiConfig::new(Some("http://api.test/v1")).unwrap();
    AuthApi::new(HttpClient::new(config, mock.clone()))
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn login_posts_credentials() {
    let mock = MockTransport::new();
    mock.respond_json(200, &json!({ "message": "Logged in", "user": user_json() }));

    let credentials = LoginRequest { username: "ada".to_owned(), password: "engine".to_owned() };
    let resp = api(&mock).login(&credentials).await.unwrap();
    assert_eq!(resp.message, "Logged in");
    assert_eq!(resp.user.username, "ada");

    let sent = &mock.requests()[0];
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "http://api.test/v1/login");
    let Body::Json(bytes) = &sent.body else { panic!("expected JSON body") };
    let body: Value = serde_json::from_slice(bytes).unwrap();
    assert_eq!(body, json!({ "username": "ada", "password": "engine" }));
}

#[tokio::test]
async fn login_rejected_surfaces_server_message() {
    let mock = MockTransport::new();
    mock.respond_json(401, &json!({ "message": "Invalid username or password" }));

    let credentials = LoginRequest { username: "ada".to_owned(), password: "nope".to_owned() };
    let err = api(&mock).login(&credentials).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid username or password");
}

// =============================================================
// logout / me
// =============================================================

#[tokio::test]
async fn logout_sends_delete_without_body() {
    let mock = MockTransport::new();
    mock.respond(204, "");

    api(&mock).logout().await.unwrap();

    let sent = &mock.requests()[0];
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.url, "http://api.test/v1/logout");
    assert_eq!(sent.body, Body::Empty);
}

#[tokio::test]
async fn logout_accepts_json_body_on_200() {
    let mock = MockTransport::new();
    mock.respond_json(200, &json!({ "message": "Logged out" }));

    api(&mock).logout().await.unwrap();
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn logout_accepts_empty_200() {
    let mock = MockTransport::new();
    mock.respond(200, "");

    api(&mock).logout().await.unwrap();
}

#[tokio::test]
async fn logout_rejected_is_http_error() {
    let mock = MockTransport::new();
    mock.respond_json(500, &json!({ "message": "boom" }));

    let err = api(&mock).logout().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "boom");
}

#[tokio::test]
async fn current_user_decodes_user() {
    let mock = MockTransport::new();
    mock.respond_json(200, &user_json());

    let user = api(&mock).current_user().await.unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(mock.requests()[0].url, "http://api.test/v1/me");
}

#[tokio::test]
async fn current_user_unauthenticated_is_401() {
    let mock = MockTransport::new();
    mock.respond_json(401, &json!({ "message": "Not authenticated" }));

    let err = api(&mock).current_user().await.unwrap_err();
    assert!(err.is_unauthorized());
}

// =============================================================
// register
// =============================================================

#[tokio::test]
async fn register_returns_verification_flag() {
    let mock = MockTransport::new();
    mock.respond_json(
        201,
        &json!({ "message": "Account created", "user": user_json(), "verification_sent": true }),
    );

    let request = RegisterRequest {
        fname: "Ada".to_owned(),
        lname: "Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        username: "ada".to_owned(),
        password: "engine1".to_owned(),
    };
    let resp = api(&mock).register(&request).await.unwrap();
    assert!(resp.verification_sent);
    assert_eq!(mock.requests()[0].url, "http://api.test/v1/register");
}

#[tokio::test]
async fn register_validation_failure_keeps_field_errors() {
    let mock = MockTransport::new();
    mock.respond_json(
        422,
        &json!({ "message": "Validation failed", "errors": { "username": "Username already taken" } }),
    );

    let request = RegisterRequest {
        fname: "Ada".to_owned(),
        lname: "Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        username: "ada".to_owned(),
        password: "engine1".to_owned(),
    };
    let err = api(&mock).register(&request).await.unwrap_err();
    assert_eq!(err.field_errors().unwrap()["username"], "Username already taken");
}
