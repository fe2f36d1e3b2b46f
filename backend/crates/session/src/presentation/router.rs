//! Session Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::SessionConfig;
use crate::application::mailer::{Mailer, TracingMailer};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::infra::postgres::PgSessionRepository;
use crate::presentation::handlers::{self, SessionAppState};
use crate::presentation::middleware::{SessionMiddlewareState, require_auth};
use crate::token::TokenCodec;

/// Create the session router with PostgreSQL repository and the
/// logging dev mailer
pub fn session_router(repo: PgSessionRepository, config: SessionConfig) -> Router {
    session_router_generic(repo, TracingMailer, config)
}

/// Create a generic session router for any repository and mailer
pub fn session_router_generic<R, M>(repo: R, mailer: M, config: SessionConfig) -> Router
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let codec = Arc::new(TokenCodec::new(&config));

    let state = SessionAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
        codec: codec.clone(),
    };

    let mw_state = SessionMiddlewareState { codec };

    Router::new()
        .route("/login", post(handlers::login::<R, M>))
        .route("/refresh", post(handlers::refresh::<R, M>))
        .route("/logout", post(handlers::logout::<R, M>))
        .route("/password/forgot", post(handlers::forgot_password::<R, M>))
        .route("/password/reset", post(handlers::reset_password::<R, M>))
        .route(
            "/password/verify",
            post(handlers::verify_reset_token::<R, M>),
        )
        .route(
            "/me",
            get(handlers::me).route_layer(middleware::from_fn(move |req, next| {
                require_auth(mw_state.clone(), req, next)
            })),
        )
        .with_state(state)
}
