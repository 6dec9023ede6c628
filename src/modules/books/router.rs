use axum::{Router, routing::get};

use super::controller::search_books;
use crate::state::AppState;

pub fn init_books_router() -> Router<AppState> {
    Router::new().route("/search", get(search_books))
}
