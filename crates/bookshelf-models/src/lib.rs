//! # Bookshelf Models
//!
//! Data structures shared by the storage layer and the HTTP handlers.
//!
//! - [`auth`]: account creation and login payloads
//! - [`books`]: saved book entries and catalog search parameters
//! - [`users`]: user summaries and stored credentials
//!
//! Request DTOs derive [`validator::Validate`]; response types derive
//! [`utoipa::ToSchema`] for the OpenAPI document.

pub mod auth;
pub mod books;
pub mod users;

pub use auth::{AuthResponse, CreateAccountRequest, LoginRequest};
pub use books::{Book, BookSearchParams, SaveBookRequest};
pub use users::{NewUser, User, UserCredentials};
