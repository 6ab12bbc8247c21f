mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use common::{ALICE_PASSWORD, BOB_PASSWORD, SECRET, spawn_app, token_service};
use crm_identity::service::token_service::TokenServiceTrait;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::json;
use uuid::Uuid;

fn forge(claims: serde_json::Value, secret: &str) -> String {
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

#[tokio::test]
async fn test_happy_login() {
    let app = spawn_app().await;

    let response = app.login("alice", ALICE_PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body["access_token"].as_str().unwrap().is_empty());
    assert!(!response.body["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(response.body["user_id"], app.alice.id.to_string());
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_expires_in_is_access_minus_refresh_expiry() {
    let app = spawn_app().await;

    let response = app.login("bob", BOB_PASSWORD).await;

    assert_eq!(response.body["expires_in"], json!(15 * 60 - 7 * 24 * 60 * 60));
}

#[tokio::test]
async fn test_bad_password_and_unknown_user_are_indistinguishable() {
    let app = spawn_app().await;

    let wrong_password = app.login("alice", "wrong").await;
    let unknown_user = app.login("no-such-user", "wrong").await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, json!({ "error": "Invalid credentials" }));
    assert_eq!(unknown_user.status, wrong_password.status);
    assert_eq!(unknown_user.raw, wrong_password.raw);
}

#[tokio::test]
async fn test_inactive_user_cannot_log_in_or_use_old_tokens() {
    let app = spawn_app().await;
    let alice = app.alice_token().await;
    let bob = app.bob_token().await;

    let deactivate = app
        .request(
            Method::PATCH,
            &format!("/api/v1/users/{}", app.bob.id),
            Some(&alice),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(deactivate.status, StatusCode::OK);
    assert_eq!(deactivate.body["is_active"], false);

    let login = app.login("bob", BOB_PASSWORD).await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
    assert_eq!(login.body, json!({ "error": "Invalid credentials" }));

    let me = app.request(Method::GET, "/api/v1/users/me", Some(&bob), None).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.body, json!({ "error": "User account is disabled" }));
}

#[tokio::test]
async fn test_login_validation() {
    let app = spawn_app().await;

    let missing = app
        .request(Method::POST, "/api/v1/auth/login", None, Some(json!({ "username": "alice" })))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body, json!({ "error": "Username and password are required" }));

    let malformed = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"username\":"))
                .unwrap(),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body, json!({ "error": "Invalid request payload" }));
}

#[tokio::test]
async fn test_refresh_rotation() {
    let app = spawn_app().await;
    let login = app.login("bob", BOB_PASSWORD).await;
    let refresh_token = login.body["refresh_token"].as_str().unwrap();

    let response = app
        .request(
            Method::POST,
            "/api/v1/auth/refresh-token",
            None,
            Some(json!({ "refresh_token": refresh_token })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let codec = token_service();
    let access = codec.validate(response.body["access_token"].as_str().unwrap()).unwrap();
    let refresh = codec.validate(response.body["refresh_token"].as_str().unwrap()).unwrap();
    assert_eq!(access.sub, app.bob.id.to_string());
    assert_eq!(refresh.sub, app.bob.id.to_string());
    assert_ne!(response.body["refresh_token"], login.body["refresh_token"]);
    assert!(response.body["expires_in"].is_i64());
}

#[tokio::test]
async fn test_refresh_failures() {
    let app = spawn_app().await;

    let garbage = app
        .request(
            Method::POST,
            "/api/v1/auth/refresh-token",
            None,
            Some(json!({ "refresh_token": "not-a-token" })),
        )
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body, json!({ "error": "Invalid refresh token" }));

    let stranger = token_service().mint(&Uuid::new_v4().to_string()).unwrap();
    let unknown_subject = app
        .request(
            Method::POST,
            "/api/v1/auth/refresh-token",
            None,
            Some(json!({ "refresh_token": stranger.refresh_token })),
        )
        .await;
    assert_eq!(unknown_subject.raw, garbage.raw);

    let missing = app
        .request(Method::POST, "/api/v1/auth/refresh-token", None, Some(json!({})))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body, json!({ "error": "Refresh token is required" }));
}

#[tokio::test]
async fn test_bearer_rejections() {
    let app = spawn_app().await;
    let now = chrono::Utc::now().timestamp();

    let missing = app.request(Method::GET, "/api/v1/users/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body, json!({ "error": "Authorization header is required" }));

    let basic = app
        .send(
            Request::builder()
                .uri("/api/v1/users/me")
                .header(header::AUTHORIZATION, "Basic YWxpY2U6cGFzcw==")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(basic.status, StatusCode::UNAUTHORIZED);
    assert_eq!(basic.body, json!({ "error": "Authorization header format must be Bearer {token}" }));

    let foreign_key = forge(
        json!({ "sub": app.bob.id.to_string(), "exp": now + 600, "jti": "x" }),
        "someone-elses-secret",
    );
    let expired = forge(
        json!({ "sub": app.bob.id.to_string(), "exp": now - 10, "jti": "x" }),
        SECRET,
    );
    for token in [foreign_key.as_str(), expired.as_str(), "garbage"] {
        let response = app.request(Method::GET, "/api/v1/users/me", Some(token), None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, json!({ "error": "Invalid or expired token" }));
    }

    let bad_subject = forge(json!({ "sub": "bob", "exp": now + 600, "jti": "x" }), SECRET);
    let response = app.request(Method::GET, "/api/v1/users/me", Some(&bad_subject), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "error": "Invalid user ID in token" }));

    let ghost = forge(
        json!({ "sub": Uuid::new_v4().to_string(), "exp": now + 600, "jti": "x" }),
        SECRET,
    );
    let response = app.request(Method::GET, "/api/v1/users/me", Some(&ghost), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "error": "User not found" }));
}

#[tokio::test]
async fn test_logout_and_password_reset_stubs() {
    let app = spawn_app().await;

    let anonymous = app.request(Method::POST, "/api/v1/auth/logout", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let bob = app.bob_token().await;
    let logout = app.request(Method::POST, "/api/v1/auth/logout", Some(&bob), None).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.body, json!({ "message": "Logged out successfully" }));

    // No revocation: the token keeps working
    let me = app.request(Method::GET, "/api/v1/users/me", Some(&bob), None).await;
    assert_eq!(me.status, StatusCode::OK);

    for uri in ["/api/v1/auth/forgot-password", "/api/v1/auth/reset-password"] {
        let response = app.request(Method::POST, uri, None, None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body,
            json!({ "message": "Password reset functionality not implemented yet" })
        );
    }
}

#[tokio::test]
async fn test_request_id_and_cors() {
    let app = spawn_app().await;

    let response = app.login("alice", ALICE_PASSWORD).await;
    assert!(response.headers.contains_key("x-request-id"));

    let preflight = app
        .send(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/v1/auth/login")
                .header(header::ORIGIN, "https://crm.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(preflight.status, StatusCode::OK);
    assert_eq!(
        preflight.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://crm.example.com"
    );
    assert_eq!(preflight.headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(preflight.headers[header::ACCESS_CONTROL_MAX_AGE], "300");
}
