//! Credential issuance and verification.
//!
//! Credentials are HS256 JSON Web Tokens whose payload is a [`TokenClaims`].
//! They are valid only while the signature matches the configured secret
//! and the current time is before `exp`; no clock leeway is granted.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use bookshelf_config::JwtConfig;
use bookshelf_core::AppError;

use crate::claims::{IdentityClaim, TokenClaims};

/// Why a presented credential was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("credential has expired")]
    Expired,
    #[error("credential signature does not match")]
    BadSignature,
    #[error("credential is malformed")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for TokenRejection {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenRejection::Expired,
            ErrorKind::InvalidSignature => TokenRejection::BadSignature,
            _ => TokenRejection::Malformed,
        }
    }
}

/// Issues a signed credential for an identity that was just created or
/// authenticated.
///
/// The credential expires `jwt_config.expiry_seconds` after issuance.
///
/// # Errors
///
/// Encoding only fails when the signing key itself is unusable, which is a
/// server fault and surfaces as a 500.
pub fn sign_token(claim: &IdentityClaim, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.expiry_seconds;

    let claims = TokenClaims {
        data: claim.clone(),
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to sign credential: {}", e)))
}

/// Verifies a credential's signature and expiry and returns its payload.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<TokenClaims, TokenRejection> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let claims = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(TokenRejection::from)?;

    // jsonwebtoken only rejects `exp < now`; the expiry second itself is already invalid.
    if claims.exp <= Utc::now().timestamp() as usize {
        return Err(TokenRejection::Expired);
    }

    Ok(claims)
}
