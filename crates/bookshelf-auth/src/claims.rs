//! Claim structures embedded in credentials.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The minimal projection of a user needed downstream of authentication.
///
/// A claim is immutable once issued; changing the username or email of an
/// account requires a new credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdentityClaim {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl IdentityClaim {
    pub fn new(id: Uuid, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Signed payload of a credential.
///
/// The identity sits under `data`; `iat` and `exp` are Unix timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub data: IdentityClaim,
    pub exp: usize,
    pub iat: usize,
}
