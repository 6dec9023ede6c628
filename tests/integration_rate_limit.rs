mod common;

use std::net::SocketAddr;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use bookshelf_config::RateLimitConfig;
use common::{json_request, setup_test_app_with_rate_limit};
use serde_json::json;
use tower::ServiceExt;

const BURST: u32 = 3;

/// Only `BURST` requests per peer; refills far slower than a test runs.
fn strict_rate_limit_config() -> RateLimitConfig {
    RateLimitConfig {
        enabled: true,
        auth_per_second: 60,
        auth_burst_size: BURST,
    }
}

fn peer(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([203, 0, 113, last_octet], 40000))
}

fn bad_login(from: SocketAddr, forwarded_for: Option<String>) -> Request<Body> {
    let mut request = json_request(
        "POST",
        "/api/auth/login",
        &json!({ "email": "nobody@example.com", "password": "wrong-password" }),
    );
    if let Some(forwarded_for) = forwarded_for {
        request
            .headers_mut()
            .insert("x-forwarded-for", forwarded_for.parse().unwrap());
    }
    request.extensions_mut().insert(ConnectInfo(from));
    request
}

async fn status_of(app: &Router, request: Request<Body>) -> StatusCode {
    app.clone().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_login_burst_from_one_peer_is_throttled() {
    let app = setup_test_app_with_rate_limit(strict_rate_limit_config());

    let mut statuses = Vec::new();
    for _ in 0..BURST + 3 {
        statuses.push(status_of(&app.router, bad_login(peer(7), None)).await);
    }

    let (allowed, throttled) = statuses.split_at(BURST as usize);
    assert!(allowed.iter().all(|s| *s == StatusCode::UNAUTHORIZED));
    assert!(throttled.iter().all(|s| *s == StatusCode::TOO_MANY_REQUESTS));
}

#[tokio::test]
async fn test_forged_forwarded_for_does_not_reset_limit() {
    let app = setup_test_app_with_rate_limit(strict_rate_limit_config());

    let mut statuses = Vec::new();
    for i in 0..BURST + 3 {
        let forged = format!("198.51.100.{}", i + 1);
        statuses.push(status_of(&app.router, bad_login(peer(7), Some(forged))).await);
    }

    let throttled = statuses
        .iter()
        .filter(|s| **s == StatusCode::TOO_MANY_REQUESTS)
        .count();
    assert_eq!(throttled, 3);
}

#[tokio::test]
async fn test_different_peers_have_separate_limits() {
    let app = setup_test_app_with_rate_limit(strict_rate_limit_config());

    for _ in 0..BURST {
        status_of(&app.router, bad_login(peer(7), None)).await;
    }
    assert_eq!(
        status_of(&app.router, bad_login(peer(7), None)).await,
        StatusCode::TOO_MANY_REQUESTS
    );

    assert_eq!(
        status_of(&app.router, bad_login(peer(8), None)).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_non_auth_routes_are_not_throttled() {
    let app = setup_test_app_with_rate_limit(strict_rate_limit_config());

    for _ in 0..BURST + 3 {
        let mut request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        request.extensions_mut().insert(ConnectInfo(peer(7)));
        assert_eq!(status_of(&app.router, request).await, StatusCode::OK);
    }
}
