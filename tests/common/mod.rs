#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bookshelf::modules::books::catalog::{BookCatalog, CatalogError};
use bookshelf::router::init_router;
use bookshelf::state::AppState;
use bookshelf_config::{CorsConfig, JwtConfig, RateLimitConfig};
use bookshelf_db::{InMemoryUserRepository, UserRepository};
use bookshelf_models::{Book, User};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new("integration-test-secret", 7200)
}

/// Catalog double that answers every query with `books`, or fails.
#[derive(Default)]
pub struct StubCatalog {
    pub books: Vec<Book>,
    pub fail: bool,
}

#[async_trait]
impl BookCatalog for StubCatalog {
    async fn search(&self, _query: &str) -> Result<Vec<Book>, CatalogError> {
        if self.fail {
            return Err(CatalogError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(self.books.clone())
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// The user as held in storage, bypassing the HTTP layer.
    pub async fn stored_user(&self, id: Uuid) -> User {
        self.users.find_by_id(id).await.unwrap().unwrap()
    }
}

fn build_test_app(catalog: StubCatalog, rate_limit_config: RateLimitConfig) -> TestApp {
    let users = Arc::new(InMemoryUserRepository::new());
    let state = AppState {
        users: users.clone(),
        catalog: Arc::new(catalog),
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        rate_limit_config,
    };

    TestApp {
        router: init_router(state),
        users,
    }
}

pub fn setup_test_app_with_catalog(catalog: StubCatalog) -> TestApp {
    build_test_app(catalog, RateLimitConfig::disabled())
}

/// App with throttling on. Requests must carry a `ConnectInfo<SocketAddr>`
/// extension, as the server adds when serving with connect info.
pub fn setup_test_app_with_rate_limit(rate_limit_config: RateLimitConfig) -> TestApp {
    build_test_app(StubCatalog::default(), rate_limit_config)
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_catalog(StubCatalog::default())
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_username() -> String {
    format!("reader-{}", Uuid::new_v4().simple())
}

pub fn sample_book(book_id: &str) -> Value {
    json!({
        "book_id": book_id,
        "title": "The Left Hand of Darkness",
        "authors": ["Ursula K. Le Guin"],
        "description": "Winter",
        "image": "http://example.com/cover.jpg",
        "link": "http://example.com/book"
    })
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn authed_request(method: &str, uri: &str, token: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token));

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends `request` and returns the status with the body parsed as JSON
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Registers a fresh account and returns `(token, user)`.
pub async fn register_user(app: &Router) -> (String, Value) {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            &json!({
                "username": generate_unique_username(),
                "email": generate_unique_email(),
                "password": TEST_PASSWORD
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let token = body["token"].as_str().unwrap().to_string();
    (token, body["user"].clone())
}
