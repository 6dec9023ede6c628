use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use bookshelf_observability::{logging_middleware, metrics_middleware};
use serde_json::{Value, json};
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::middleware::auth::authenticate_request;
use crate::modules::auth::router::init_auth_router;
use crate::modules::books::router::init_books_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let mut auth_router = init_auth_router();
    if state.rate_limit_config.enabled {
        auth_router = auth_router.layer(GovernorLayer::new(Arc::new(
            state.rate_limit_config.auth_governor_config(),
        )));
    }

    let api = Router::new()
        .nest("/auth", auth_router)
        .nest("/users", init_users_router())
        .nest("/books", init_books_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate_request,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
