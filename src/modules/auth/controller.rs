use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use bookshelf_core::AppError;
use bookshelf_models::{AuthResponse, CreateAccountRequest, LoginRequest};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create an account and receive a token
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn create_account(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response =
        AuthService::create_account(state.users.as_ref(), dto, &state.jwt_config).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::login(state.users.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(response))
}
