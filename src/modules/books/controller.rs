use axum::Json;
use axum::extract::{Query, State};
use bookshelf_core::AppError;
use bookshelf_models::{Book, BookSearchParams};
use tracing::instrument;

use super::service::BookService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// Search the book catalog
#[utoipa::path(
    get,
    path = "/api/books/search",
    params(BookSearchParams),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<BookSearchParams>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = BookService::search(state.catalog.as_ref(), &params.q).await?;
    Ok(Json(books))
}
