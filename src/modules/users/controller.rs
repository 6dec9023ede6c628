use axum::Json;
use axum::extract::{Path, State};
use bookshelf_core::AppError;
use bookshelf_models::{SaveBookRequest, User};
use tracing::instrument;

use super::service::UserService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// The authenticated user's summary and saved books
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id()))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = UserService::current_user(state.users.as_ref(), auth_user.user_id()).await?;
    Ok(Json(user))
}

/// Save a book to the authenticated user's list
#[utoipa::path(
    post,
    path = "/api/users/me/books",
    request_body = SaveBookRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto), fields(user_id = %auth_user.user_id()))]
pub async fn save_book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SaveBookRequest>,
) -> Result<Json<User>, AppError> {
    let user =
        UserService::save_book(state.users.as_ref(), auth_user.user_id(), dto.into()).await?;
    Ok(Json(user))
}

/// Remove a book from the authenticated user's list
#[utoipa::path(
    delete,
    path = "/api/users/me/books/{book_id}",
    params(("book_id" = String, Path, description = "Catalog identifier of the book")),
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id()))]
pub async fn remove_book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(book_id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user =
        UserService::remove_book(state.users.as_ref(), auth_user.user_id(), &book_id).await?;
    Ok(Json(user))
}
