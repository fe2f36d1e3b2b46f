//! Session Middleware
//!
//! Middleware for requiring a valid access token on protected routes.
//! Verification is purely cryptographic; no store round trip happens
//! on the request path.

use axum::body::Body;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::error::SessionError;
use crate::token::{Claims, TokenCodec, TokenType};

/// Middleware state
#[derive(Clone)]
pub struct SessionMiddlewareState {
    pub codec: Arc<TokenCodec>,
}

/// Extract the bearer token from the Authorization header
fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Verify the bearer access token on the request
fn verify_request(state: &SessionMiddlewareState, req: &Request<Body>) -> Option<Claims> {
    let token = bearer_token(req)?;
    state.codec.verify(token, TokenType::Access).ok()
}

/// Middleware that requires a valid access token.
///
/// On success the verified claims are attached to request extensions
/// for downstream handlers.
pub async fn require_auth(
    state: SessionMiddlewareState,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(claims) = verify_request(&state, &req) else {
        return Err(SessionError::InvalidToken.into_response());
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware that requires a valid access token carrying the admin role
pub async fn require_admin(
    state: SessionMiddlewareState,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(claims) = verify_request(&state, &req) else {
        return Err(SessionError::InvalidToken.into_response());
    };

    if !claims.role.is_admin() {
        return Err(SessionError::Forbidden.into_response());
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
