//! Logout Use Case
//!
//! Best-effort revocation of a presented refresh token. Logout is
//! idempotent and never fails for token-state reasons: logging out an
//! already-revoked, expired, or unknown token succeeds quietly.

use std::sync::Arc;

use crate::domain::entity::refresh_token::RefreshToken;
use crate::domain::repository::RefreshTokenRepository;
use crate::error::SessionResult;

/// Logout input
pub struct LogoutInput {
    pub refresh_token: String,
}

/// Logout use case
pub struct LogoutUseCase<R>
where
    R: RefreshTokenRepository,
{
    refresh_repo: Arc<R>,
}

impl<R> LogoutUseCase<R>
where
    R: RefreshTokenRepository,
{
    pub fn new(refresh_repo: Arc<R>) -> Self {
        Self { refresh_repo }
    }

    /// Revoke the token record if one exists. Storage errors still
    /// propagate; an unknown or already-dead token does not.
    pub async fn execute(&self, input: LogoutInput) -> SessionResult<()> {
        let fingerprint = RefreshToken::fingerprint(&input.refresh_token);

        let transitioned = self.refresh_repo.revoke(&fingerprint).await?;
        if transitioned {
            tracing::info!("Refresh token revoked on logout");
        } else {
            tracing::debug!("Logout for unknown or already-revoked token");
        }

        Ok(())
    }
}
