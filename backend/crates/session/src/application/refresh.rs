//! Refresh Use Case
//!
//! Rotates a refresh token: verifies the presented token, revokes its
//! store record, and issues a replacement pair. Revocation happens
//! before issuance, so a crash between the two steps loses a session
//! instead of leaving two live tokens for one grant.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entity::refresh_token::RefreshToken;
use crate::domain::entity::user::User;
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::error::{SessionError, SessionResult};
use crate::token::{TokenCodec, TokenType};

/// Refresh input
pub struct RefreshInput {
    pub refresh_token: String,
}

/// Refresh output
#[derive(Debug)]
pub struct RefreshOutput {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh (token rotation) use case
pub struct RefreshUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    refresh_repo: Arc<R>,
    codec: Arc<TokenCodec>,
}

impl<U, R> RefreshUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    pub fn new(user_repo: Arc<U>, refresh_repo: Arc<R>, codec: Arc<TokenCodec>) -> Self {
        Self {
            user_repo,
            refresh_repo,
            codec,
        }
    }

    /// Rotate a refresh token into a new access + refresh pair.
    ///
    /// Every failure mode (bad signature, expired, unknown, revoked,
    /// wrong type) surfaces as the same `InvalidToken`.
    pub async fn execute(&self, input: RefreshInput) -> SessionResult<RefreshOutput> {
        let claims = self.codec.verify(&input.refresh_token, TokenType::Refresh)?;

        let fingerprint = RefreshToken::fingerprint(&input.refresh_token);
        let record = self
            .refresh_repo
            .find_by_token_hash(&fingerprint)
            .await?
            .ok_or(SessionError::InvalidToken)?;

        if record.revoked || record.is_expired_at(Utc::now()) {
            return Err(SessionError::InvalidToken);
        }

        if record.user_id != claims.user_id() {
            return Err(SessionError::InvalidToken);
        }

        let user = self
            .user_repo
            .find_by_id(&record.user_id)
            .await?
            .ok_or(SessionError::InvalidToken)?;

        // Conditional revoke: when two requests race on the same token,
        // exactly one sees the row transition and proceeds
        if !self.refresh_repo.revoke(&fingerprint).await? {
            return Err(SessionError::InvalidToken);
        }

        let access_token = self
            .codec
            .issue_access(&user)
            .map_err(|e| SessionError::Internal(e.to_string()))?;

        let issued = self
            .codec
            .issue_refresh(&user)
            .map_err(|e| SessionError::Internal(e.to_string()))?;

        let replacement = RefreshToken::new(&issued.token, user.user_id, issued.expires_at);
        self.refresh_repo.create(&replacement).await?;

        tracing::info!(user_id = %user.user_id, "Refresh token rotated");

        Ok(RefreshOutput {
            user,
            access_token,
            refresh_token: issued.token,
        })
    }
}
