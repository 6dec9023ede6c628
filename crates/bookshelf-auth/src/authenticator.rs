//! Request authentication.
//!
//! A credential may arrive in three places, checked in this order:
//!
//! 1. the `Authorization` header (`Bearer <credential>`, or a bare credential)
//! 2. a `token` field in the request body
//! 3. a `token` query-string parameter
//!
//! The first non-empty candidate wins. Anything that goes wrong while
//! verifying it downgrades the request to anonymous; the decision is returned
//! as an explicit [`AuthOutcome`] instead of an error.

use tracing::debug;

use bookshelf_config::JwtConfig;

use crate::claims::IdentityClaim;
use crate::jwt::{TokenRejection, verify_token};

/// Raw credential candidates pulled from an inbound request.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialSources<'a> {
    pub authorization: Option<&'a str>,
    pub body_token: Option<&'a str>,
    pub query_token: Option<&'a str>,
}

impl<'a> CredentialSources<'a> {
    pub fn from_header(authorization: Option<&'a str>) -> Self {
        Self {
            authorization,
            ..Self::default()
        }
    }

    /// The credential to verify, honouring header > body > query precedence.
    pub fn credential(&self) -> Option<&'a str> {
        self.authorization
            .and_then(bearer_credential)
            .or_else(|| self.body_token.and_then(non_empty))
            .or_else(|| self.query_token.and_then(non_empty))
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn bearer_credential(header: &str) -> Option<&str> {
    let header = header.trim();
    match header.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => non_empty(rest),
        // Some other scheme, e.g. Basic.
        Some(_) => None,
        None if header.eq_ignore_ascii_case("bearer") => None,
        None => non_empty(header),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnonymousReason {
    NoCredential,
    Rejected(TokenRejection),
}

impl AnonymousReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnonymousReason::NoCredential => "no_credential",
            AnonymousReason::Rejected(TokenRejection::Expired) => "expired",
            AnonymousReason::Rejected(TokenRejection::BadSignature) => "bad_signature",
            AnonymousReason::Rejected(TokenRejection::Malformed) => "malformed",
        }
    }
}

/// Result of authenticating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Anonymous(AnonymousReason),
    Claim(IdentityClaim),
}

impl AuthOutcome {
    pub fn claim(&self) -> Option<&IdentityClaim> {
        match self {
            AuthOutcome::Claim(claim) => Some(claim),
            AuthOutcome::Anonymous(_) => None,
        }
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            AuthOutcome::Claim(_) => "authenticated",
            AuthOutcome::Anonymous(reason) => reason.as_str(),
        }
    }
}

/// Authenticates a request from its credential sources.
///
/// CPU-bound only: a signature and expiry check, no I/O. Never fails.
pub fn authenticate(sources: &CredentialSources<'_>, jwt_config: &JwtConfig) -> AuthOutcome {
    let Some(credential) = sources.credential() else {
        return AuthOutcome::Anonymous(AnonymousReason::NoCredential);
    };

    match verify_token(credential, jwt_config) {
        Ok(claims) => AuthOutcome::Claim(claims.data),
        Err(rejection) => {
            debug!(reason = %rejection, "Credential not accepted, continuing anonymously");
            AuthOutcome::Anonymous(AnonymousReason::Rejected(rejection))
        }
    }
}
