use axum::{Router, routing::post};

use super::controller::{create_account, login};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(create_account))
        .route("/login", post(login))
}
