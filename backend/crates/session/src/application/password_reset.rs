//! Password Reset Use Case
//!
//! Three-step reset flow: request a token, optionally verify it from
//! the reset form, then consume it to set a new password. Requesting a
//! reset never discloses whether the email is registered.

use std::sync::Arc;

use crate::application::config::SessionConfig;
use crate::application::mailer::Mailer;
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    reset_token::ResetToken,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{SessionError, SessionResult};

/// Password reset use case
pub struct PasswordResetUseCase<U, R, M>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    refresh_repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<SessionConfig>,
}

impl<U, R, M> PasswordResetUseCase<U, R, M>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    M: Mailer + Send + Sync + 'static,
{
    pub fn new(
        user_repo: Arc<U>,
        refresh_repo: Arc<R>,
        mailer: Arc<M>,
        config: Arc<SessionConfig>,
    ) -> Self {
        Self {
            user_repo,
            refresh_repo,
            mailer,
            config,
        }
    }

    /// Issue a reset token for the account, if one exists.
    ///
    /// Returns success for unknown and malformed emails alike; the
    /// response never reveals whether an account is registered. A new
    /// request replaces any previously pending token.
    pub async fn request(&self, email: &str) -> SessionResult<()> {
        let Ok(email) = Email::new(email) else {
            tracing::debug!("Password reset requested for malformed email");
            return Ok(());
        };

        let Some(mut user) = self.user_repo.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let (raw_token, token) = ResetToken::generate(self.config.reset_token_ttl_chrono());
        user.set_reset_token(token);
        self.user_repo.update(&user).await?;

        // Fire and forget: delivery failure must not fail the request
        let mailer = Arc::clone(&self.mailer);
        let recipient = user.email.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_password_reset(&recipient, &raw_token).await {
                tracing::warn!(error = %e, "Password reset mail delivery failed");
            }
        });

        tracing::info!(user_id = %user.user_id, "Password reset token issued");
        Ok(())
    }

    /// Consume a reset token and set a new password.
    ///
    /// The token is single use: consumption clears it, and every
    /// outstanding refresh token of the account is revoked so stolen
    /// sessions do not survive the reset.
    pub async fn reset(&self, raw_token: &str, new_password: String) -> SessionResult<()> {
        let fingerprint = ResetToken::fingerprint_of(raw_token);
        let mut user = self
            .user_repo
            .find_by_reset_token(&fingerprint)
            .await?
            .ok_or(SessionError::InvalidResetToken)?;

        if !user.reset_token_matches(raw_token) {
            return Err(SessionError::InvalidResetToken);
        }

        // Validate before consuming: a policy rejection leaves the
        // token pending so the user can retry from the same link
        let raw = RawPassword::new(new_password)?;
        let hash = UserPassword::from_raw(&raw, self.config.pepper())?;

        user.set_password(hash);
        user.clear_reset_token();
        self.user_repo.update(&user).await?;

        match self.refresh_repo.revoke_all_for_user(&user.user_id).await {
            Ok(revoked) => {
                tracing::info!(
                    user_id = %user.user_id,
                    revoked,
                    "Password reset completed, outstanding sessions revoked"
                );
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user.user_id,
                    error = %e,
                    "Password reset completed but session revocation failed"
                );
            }
        }

        let mailer = Arc::clone(&self.mailer);
        let recipient = user.email.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_password_reset_confirmation(&recipient).await {
                tracing::warn!(error = %e, "Password reset confirmation mail delivery failed");
            }
        });

        Ok(())
    }

    /// Check whether a reset token is currently redeemable, without
    /// consuming it. Used by reset forms before showing the password
    /// fields.
    pub async fn verify(&self, raw_token: &str) -> SessionResult<bool> {
        let fingerprint = ResetToken::fingerprint_of(raw_token);

        match self.user_repo.find_by_reset_token(&fingerprint).await? {
            Some(user) => Ok(user.reset_token_matches(raw_token)),
            None => Ok(false),
        }
    }
}
