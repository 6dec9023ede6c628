use std::collections::HashMap;
use std::convert::Infallible;

use anyhow::anyhow;
use axum::{
    body::{Body, Bytes},
    extract::{FromRequestParts, Query, Request, State},
    http::{HeaderMap, StatusCode, Uri, header, request::Parts},
    middleware::Next,
    response::Response,
};
use bookshelf_auth::{CredentialSources, IdentityClaim, RequestContext, authenticate};
use bookshelf_core::AppError;
use bookshelf_observability::{track_authorization_denied, track_request_authentication};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;

/// Largest body the authenticator will buffer while looking for a `token` field.
pub const MAX_BUFFERED_BODY: usize = 1024 * 1024;

#[derive(Deserialize)]
struct BodyToken {
    token: Option<String>,
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let mime = value.split(';').next().unwrap_or("").trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

fn body_token(bytes: &Bytes) -> Option<String> {
    serde_json::from_slice::<BodyToken>(bytes)
        .ok()
        .and_then(|body| body.token)
}

fn query_token(uri: &Uri) -> Option<String> {
    Query::<HashMap<String, String>>::try_from_uri(uri)
        .ok()
        .and_then(|Query(mut params)| params.remove("token"))
}

/// Request authenticator.
///
/// Looks for a credential in the `Authorization` header, then a top-level
/// `token` field of a JSON body, then the `token` query parameter, and
/// inserts the resulting [`RequestContext`] into the request extensions.
/// Never rejects a request for a bad or missing credential: such requests
/// continue anonymously and the gate decides later. A JSON body is buffered
/// and handed on unchanged.
pub async fn authenticate_request(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let (body, body_token) = if is_json(&parts.headers) {
        let bytes = axum::body::to_bytes(body, MAX_BUFFERED_BODY)
            .await
            .map_err(|_| {
                AppError::new(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    anyhow!("Request body exceeds {} bytes", MAX_BUFFERED_BODY),
                )
            })?;
        let token = body_token(&bytes);
        (Body::from(bytes), token)
    } else {
        (body, None)
    };
    let query_token = query_token(&parts.uri);

    let sources = CredentialSources {
        authorization: parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
        body_token: body_token.as_deref(),
        query_token: query_token.as_deref(),
    };
    let outcome = authenticate(&sources, &state.jwt_config);
    track_request_authentication(outcome.label());

    parts.extensions.insert(RequestContext::from(outcome));

    Ok(next.run(Request::from_parts(parts, body)).await)
}

fn request_context(parts: &Parts) -> RequestContext {
    parts
        .extensions
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default()
}

/// The request's [`RequestContext`]; anonymous when the authenticator did not run.
#[derive(Debug, Clone, Default)]
pub struct AuthContext(pub RequestContext);

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AuthContext(request_context(parts)))
    }
}

/// Extractor that passes the request through the authorization gate.
///
/// Rejects with 401 when the request carries no identity.
#[derive(Debug, Clone)]
pub struct AuthUser(pub IdentityClaim);

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.0.id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = request_context(parts);
        match context.require_identity() {
            Ok(claim) => Ok(AuthUser(claim.clone())),
            Err(failure) => {
                track_authorization_denied(failure.as_str());
                Err(failure.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_is_json() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(is_json(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        assert!(!is_json(&headers));
    }

    #[test]
    fn test_body_token() {
        let bytes = Bytes::from_static(br#"{"book_id":"abc","token":"a.b.c"}"#);
        assert_eq!(body_token(&bytes).as_deref(), Some("a.b.c"));

        assert_eq!(body_token(&Bytes::from_static(br#"{"book_id":"abc"}"#)), None);
        assert_eq!(body_token(&Bytes::from_static(br#"{"token":42}"#)), None);
        assert_eq!(body_token(&Bytes::from_static(b"not json")), None);
        assert_eq!(body_token(&Bytes::new()), None);
    }

    #[test]
    fn test_query_token() {
        let uri: Uri = "/api/users/me?token=a.b.c&x=1".parse().unwrap();
        assert_eq!(query_token(&uri).as_deref(), Some("a.b.c"));

        let uri: Uri = "/api/users/me".parse().unwrap();
        assert_eq!(query_token(&uri), None);
    }

    #[tokio::test]
    async fn test_auth_user_rejects_anonymous_context() {
        let (mut parts, _) = Request::new(Body::empty()).into_parts();
        parts.extensions.insert(RequestContext::anonymous());

        let err = AuthUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Not authenticated");
    }

    #[tokio::test]
    async fn test_auth_user_returns_claim() {
        let claim = IdentityClaim::new(Uuid::new_v4(), "reader", "reader@example.com");
        let (mut parts, _) = Request::new(Body::empty()).into_parts();
        parts
            .extensions
            .insert(RequestContext::authenticated(claim.clone()));

        let AuthUser(extracted) = AuthUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(extracted, claim);
    }

    #[tokio::test]
    async fn test_auth_context_defaults_to_anonymous() {
        let (mut parts, _) = Request::new(Body::empty()).into_parts();
        let AuthContext(context) = AuthContext::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(!context.is_authenticated());
    }
}
