//! Request authentication middleware and the extractors handlers use to read it.
//!
//! # Flow
//!
//! 1. [`auth::authenticate_request`] runs over every `/api` route, turns the
//!    presented credential (if any) into a `RequestContext` and stores it in
//!    the request extensions. It never rejects for a bad credential.
//! 2. Handlers that act on user-owned data take [`auth::AuthUser`], which
//!    applies the authorization gate and rejects anonymous requests with 401.
//! 3. Handlers that only want to look take [`auth::AuthContext`].
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn get_me(State(state): State<AppState>, auth_user: AuthUser) -> impl IntoResponse {
//!     let user_id = auth_user.user_id();
//!     // ...
//! }
//! ```

pub mod auth;
