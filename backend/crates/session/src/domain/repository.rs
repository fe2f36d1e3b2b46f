//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::SessionResult;

/// User (credential store) repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> SessionResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> SessionResult<Option<User>>;

    /// Find user by normalized email
    async fn find_by_email(&self, email: &Email) -> SessionResult<Option<User>>;

    /// Find the user holding a reset token with this fingerprint
    async fn find_by_reset_token(&self, fingerprint: &str) -> SessionResult<Option<User>>;

    /// Update user (credential, role, reset-token fields)
    async fn update(&self, user: &User) -> SessionResult<()>;
}

/// Refresh token store repository trait
#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    /// Persist a freshly issued token record
    async fn create(&self, token: &RefreshToken) -> SessionResult<()>;

    /// Find a record by token fingerprint
    async fn find_by_token_hash(&self, token_hash: &str) -> SessionResult<Option<RefreshToken>>;

    /// Conditionally revoke one token: flips `revoked` only if it is
    /// currently false. Returns whether a row actually transitioned,
    /// which makes concurrent rotation of the same token a
    /// single-winner race.
    async fn revoke(&self, token_hash: &str) -> SessionResult<bool>;

    /// Revoke every outstanding token for a user in one bulk
    /// conditional update. Returns the number of tokens revoked.
    async fn revoke_all_for_user(&self, user_id: &UserId) -> SessionResult<u64>;

    /// Delete expired records (maintenance; expiry alone already makes
    /// them invalid)
    async fn cleanup_expired(&self) -> SessionResult<u64>;
}
