//! Account creation and login payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::User;

#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    #[schema(example = "reader")]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "reader@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    #[schema(example = "password123")]
    pub password: String,
}

impl fmt::Debug for CreateAccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateAccountRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "reader@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Credential plus user summary, returned by account creation and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
