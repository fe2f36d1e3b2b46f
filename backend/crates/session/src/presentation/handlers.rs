//! HTTP Handlers

use axum::extract::State;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::config::SessionConfig;
use crate::application::mailer::Mailer;
use crate::application::{
    LoginInput, LoginUseCase, LogoutInput, LogoutUseCase, PasswordResetUseCase, RefreshInput,
    RefreshUseCase,
};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::error::SessionResult;
use crate::presentation::dto::{
    ForgotPasswordRequest, LoginRequest, LogoutRequest, MessageResponse, RefreshRequest,
    ResetPasswordRequest, TokenPairResponse, UserInfo, VerifyResetTokenRequest,
    VerifyResetTokenResponse,
};
use crate::token::{Claims, TokenCodec};

/// Shared state for session handlers
pub struct SessionAppState<R, M>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<SessionConfig>,
    pub codec: Arc<TokenCodec>,
}

// Manual impl: every field is an Arc, so the mailer itself does not
// have to be Clone for the state to be.
impl<R, M> Clone for SessionAppState<R, M>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
            codec: self.codec.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R, M>(
    State(state): State<SessionAppState<R, M>>,
    Json(req): Json<LoginRequest>,
) -> SessionResult<Json<TokenPairResponse>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenPairResponse {
        access_token: output.access_token,
        refresh_token: output.refresh_token,
        user: UserInfo::from_user(&output.user),
    }))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
pub async fn refresh<R, M>(
    State(state): State<SessionAppState<R, M>>,
    Json(req): Json<RefreshRequest>,
) -> SessionResult<Json<TokenPairResponse>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = RefreshUseCase::new(state.repo.clone(), state.repo.clone(), state.codec.clone());

    let output = use_case
        .execute(RefreshInput {
            refresh_token: req.refresh_token,
        })
        .await?;

    Ok(Json(TokenPairResponse {
        access_token: output.access_token,
        refresh_token: output.refresh_token,
        user: UserInfo::from_user(&output.user),
    }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R, M>(
    State(state): State<SessionAppState<R, M>>,
    Json(req): Json<LogoutRequest>,
) -> SessionResult<Json<MessageResponse>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone());

    use_case
        .execute(LogoutInput {
            refresh_token: req.refresh_token,
        })
        .await?;

    Ok(Json(MessageResponse::new("Logged out")))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/auth/password/forgot
pub async fn forgot_password<R, M>(
    State(state): State<SessionAppState<R, M>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> SessionResult<Json<MessageResponse>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case.request(&req.email).await?;

    // Same response for registered and unknown emails
    Ok(Json(MessageResponse::new(
        "If the email is registered, a reset link has been sent",
    )))
}

/// POST /api/auth/password/reset
pub async fn reset_password<R, M>(
    State(state): State<SessionAppState<R, M>>,
    Json(req): Json<ResetPasswordRequest>,
) -> SessionResult<Json<MessageResponse>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case.reset(&req.token, req.password).await?;

    Ok(Json(MessageResponse::new("Password has been reset")))
}

/// POST /api/auth/password/verify
pub async fn verify_reset_token<R, M>(
    State(state): State<SessionAppState<R, M>>,
    Json(req): Json<VerifyResetTokenRequest>,
) -> SessionResult<Json<VerifyResetTokenResponse>>
where
    R: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let valid = use_case.verify(&req.token).await?;

    Ok(Json(VerifyResetTokenResponse { valid }))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me
///
/// Answered straight from the verified access-token claims set by the
/// auth middleware; no database round trip.
pub async fn me(Extension(claims): Extension<Claims>) -> Json<UserInfo> {
    Json(UserInfo::from_claims(&claims))
}
