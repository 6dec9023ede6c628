//! Per-request processing context and the authorization gate.

use thiserror::Error;
use tracing::warn;

use bookshelf_core::AppError;

use crate::authenticator::AuthOutcome;
use crate::claims::IdentityClaim;

/// Message shared by every authentication failure so that a rejected login
/// does not reveal whether the email or the password was wrong.
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// An operation that needs an identity ran without one.
    #[error("{}", NOT_AUTHENTICATED)]
    Unauthenticated,
    /// Unknown email or wrong password at login.
    #[error("{}", NOT_AUTHENTICATED)]
    CredentialRejected,
}

impl AuthFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthFailure::Unauthenticated => "unauthenticated",
            AuthFailure::CredentialRejected => "credential_rejected",
        }
    }
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        warn!(kind = failure.as_str(), "Authentication failure");
        AppError::unauthorized(failure.to_string())
    }
}

/// Zero-or-one identity claim attached to a single request.
///
/// Built once by the authenticator and read by handlers; it is never
/// mutated afterwards nor shared between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    identity: Option<IdentityClaim>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn authenticated(claim: IdentityClaim) -> Self {
        Self {
            identity: Some(claim),
        }
    }

    pub fn identity(&self) -> Option<&IdentityClaim> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// The authorization gate.
    ///
    /// Returns the claim unchanged when present. Every operation that reads
    /// or writes user-owned state calls this before touching storage.
    pub fn require_identity(&self) -> Result<&IdentityClaim, AuthFailure> {
        self.identity.as_ref().ok_or(AuthFailure::Unauthenticated)
    }
}

impl From<AuthOutcome> for RequestContext {
    fn from(outcome: AuthOutcome) -> Self {
        match outcome {
            AuthOutcome::Claim(claim) => RequestContext::authenticated(claim),
            AuthOutcome::Anonymous(_) => RequestContext::anonymous(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::AnonymousReason;
    use crate::jwt::TokenRejection;
    use uuid::Uuid;

    fn claim() -> IdentityClaim {
        IdentityClaim::new(Uuid::new_v4(), "reader", "reader@example.com")
    }

    #[test]
    fn test_require_identity_returns_claim_unchanged() {
        let claim = claim();
        let context = RequestContext::authenticated(claim.clone());
        assert_eq!(context.require_identity(), Ok(&claim));
        assert!(context.is_authenticated());
    }

    #[test]
    fn test_require_identity_fails_when_anonymous() {
        let context = RequestContext::anonymous();
        assert_eq!(
            context.require_identity(),
            Err(AuthFailure::Unauthenticated)
        );
        assert!(context.identity().is_none());
    }

    #[test]
    fn test_default_context_is_anonymous() {
        assert_eq!(RequestContext::default(), RequestContext::anonymous());
    }

    #[test]
    fn test_context_from_outcome() {
        let claim = claim();
        let context = RequestContext::from(AuthOutcome::Claim(claim.clone()));
        assert_eq!(context.identity(), Some(&claim));

        let context = RequestContext::from(AuthOutcome::Anonymous(AnonymousReason::Rejected(
            TokenRejection::Expired,
        )));
        assert!(!context.is_authenticated());
    }

    #[test]
    fn test_failures_share_one_message_and_status() {
        let unauthenticated = AppError::from(AuthFailure::Unauthenticated);
        let rejected = AppError::from(AuthFailure::CredentialRejected);

        assert_eq!(unauthenticated.status, rejected.status);
        assert_eq!(unauthenticated.status.as_u16(), 401);
        assert_eq!(unauthenticated.message(), NOT_AUTHENTICATED);
        assert_eq!(rejected.message(), NOT_AUTHENTICATED);
    }
}
