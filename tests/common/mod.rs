#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use crm_identity::entity::user::{NewUser, User};
use crm_identity::repository::memory_repository::InMemoryUserRepository;
use crm_identity::repository::user_repository::UserRepositoryTrait;
use crm_identity::routes::root;
use crm_identity::service::role_cache::RoleCache;
use crm_identity::service::token_service::TokenService;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "integration-test-secret";
pub const ALICE_PASSWORD: &str = "Pa55w0rd!";
pub const BOB_PASSWORD: &str = "Bob12345";

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<InMemoryUserRepository>,
    pub alice: User,
    pub bob: User,
    pub admin_role_id: Uuid,
    pub sales_role_id: Uuid,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub raw: String,
    pub body: Value,
}

pub fn token_service() -> TokenService {
    TokenService::with_settings(SECRET, 15, 7).unwrap()
}

/// Router over an in-memory store holding alice (Admin) and bob (Sales).
pub async fn spawn_app() -> TestApp {
    let repo = InMemoryUserRepository::new_shared();
    let admin = repo.insert_role("Admin").await;
    let sales = repo.insert_role("Sales").await;

    let alice = repo
        .create(draft("alice", "alice@example.com", admin.id), ALICE_PASSWORD)
        .await
        .unwrap();
    let bob = repo
        .create(draft("bob", "bob@example.com", sales.id), BOB_PASSWORD)
        .await
        .unwrap();

    let router = root::routes(
        repo.clone(),
        token_service(),
        RoleCache::disabled(),
        Duration::from_secs(60),
    );

    TestApp {
        router,
        repo,
        alice,
        bob,
        admin_role_id: admin.id,
        sales_role_id: sales.id,
    }
}

/// Drive one request through `router` and collect the whole body.
pub async fn call(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let raw = String::from_utf8(bytes.to_vec()).unwrap();
    let body = serde_json::from_str(&raw).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        raw,
        body,
    }
}

fn draft(username: &str, email: &str, role_id: Uuid) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        first_name: username.to_string(),
        last_name: "Example".to_string(),
        role_id,
        department: None,
        is_active: true,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        call(self.router.clone(), request).await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Access token for a user known to log in successfully.
    pub async fn access_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.raw);
        response.body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn alice_token(&self) -> String {
        self.access_token("alice", ALICE_PASSWORD).await
    }

    pub async fn bob_token(&self) -> String {
        self.access_token("bob", BOB_PASSWORD).await
    }
}
