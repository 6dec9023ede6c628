//! # Bookshelf Auth
//!
//! Identity core of the Bookshelf API.
//!
//! - [`claims`]: the [`IdentityClaim`] carried inside every credential
//! - [`jwt`]: the token issuer ([`sign_token`]) and verifier ([`verify_token`])
//! - [`authenticator`]: turns the credential sources of an inbound request
//!   into an [`AuthOutcome`]
//! - [`context`]: the per-request [`RequestContext`] and the authorization
//!   gate ([`RequestContext::require_identity`])
//!
//! # Flow
//!
//! ```text
//! request ──► authenticate() ──► AuthOutcome ──► RequestContext ──► handler
//!                                                      │
//!                                         require_identity() ──► claim | AuthFailure
//! ```
//!
//! Verification problems never surface from the authenticator: a missing,
//! malformed, expired or foreign-signed credential all yield an anonymous
//! context. Handlers that touch user-owned state must go through the gate.
//!
//! # Example
//!
//! ```ignore
//! use bookshelf_auth::{CredentialSources, IdentityClaim, RequestContext, authenticate, sign_token};
//! use bookshelf_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = sign_token(&IdentityClaim::new(user_id, "reader", "reader@example.com"), &config)?;
//!
//! let header = format!("Bearer {token}");
//! let sources = CredentialSources::from_header(Some(&header));
//! let context = RequestContext::from(authenticate(&sources, &config));
//! let claim = context.require_identity()?;
//! ```

pub mod authenticator;
pub mod claims;
pub mod context;
pub mod jwt;

pub use authenticator::{AnonymousReason, AuthOutcome, CredentialSources, authenticate};
pub use claims::{IdentityClaim, TokenClaims};
pub use context::{AuthFailure, NOT_AUTHENTICATED, RequestContext};
pub use jwt::{TokenRejection, sign_token, verify_token};
