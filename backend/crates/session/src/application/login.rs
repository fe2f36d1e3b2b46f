//! Login Use Case
//!
//! Authenticates a user against the credential store and issues an
//! access + refresh token pair, persisting the refresh token record.

use std::sync::Arc;

use crate::application::config::SessionConfig;
use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{SessionError, SessionResult};
use crate::token::TokenCodec;

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Login use case
pub struct LoginUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    refresh_repo: Arc<R>,
    codec: Arc<TokenCodec>,
    config: Arc<SessionConfig>,
}

impl<U, R> LoginUseCase<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        refresh_repo: Arc<R>,
        codec: Arc<TokenCodec>,
        config: Arc<SessionConfig>,
    ) -> Self {
        Self {
            user_repo,
            refresh_repo,
            codec,
            config,
        }
    }

    /// Authenticate and mint a token pair.
    ///
    /// Unknown email and wrong password both return
    /// `InvalidCredentials`; the caller cannot tell which happened, by
    /// value or by timing.
    pub async fn execute(&self, input: LoginInput) -> SessionResult<LoginOutput> {
        let email = Email::new(&input.email).map_err(|_| SessionError::InvalidCredentials)?;

        // Shape checks only; the password policy applies when a
        // password is set, not when one is verified
        let raw_password =
            RawPassword::for_login(input.password).map_err(|_| SessionError::InvalidCredentials)?;

        let Some(mut user) = self.user_repo.find_by_email(&email).await? else {
            // Unknown accounts still pay a full Argon2 verification,
            // so this path is not measurably faster than a mismatch
            let _ = UserPassword::dummy().verify(&raw_password, self.config.pepper());
            return Err(SessionError::InvalidCredentials);
        };

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(SessionError::InvalidCredentials);
        }

        // Transparent upgrade of hashes set under superseded
        // parameters; the login itself never fails on this
        if user.password_hash.needs_rehash() {
            match UserPassword::from_raw(&raw_password, self.config.pepper()) {
                Ok(rehashed) => {
                    user.set_password(rehashed);
                    if let Err(e) = self.user_repo.update(&user).await {
                        tracing::warn!(
                            user_id = %user.user_id,
                            error = %e,
                            "Rehashed password could not be saved"
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        user_id = %user.user_id,
                        error = %e,
                        "Password rehash failed"
                    );
                }
            }
        }

        let access_token = self
            .codec
            .issue_access(&user)
            .map_err(|e| SessionError::Internal(e.to_string()))?;

        let issued = self
            .codec
            .issue_refresh(&user)
            .map_err(|e| SessionError::Internal(e.to_string()))?;

        let record = RefreshToken::new(&issued.token, user.user_id, issued.expires_at);
        self.refresh_repo.create(&record).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User logged in"
        );

        Ok(LoginOutput {
            user,
            access_token,
            refresh_token: issued.token,
        })
    }
}
