use axum::{
    Router,
    routing::{delete, get, post},
};

use super::controller::{get_me, remove_book, save_book};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/me/books", post(save_book))
        .route("/me/books/{book_id}", delete(remove_book))
}
