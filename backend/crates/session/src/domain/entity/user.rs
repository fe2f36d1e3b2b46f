//! User Entity
//!
//! Account record for the portfolio backend: login identity, hashed
//! credential, role, and the optional pending password-reset token.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, reset_token::ResetToken, user_id::UserId, user_password::UserPassword,
    user_role::UserRole,
};

/// User entity
///
/// The password is stored only in hashed form. Hashing happens at the
/// `set_password` call sites, never implicitly on save, so persisting
/// an unchanged entity can never re-hash an already-hashed value.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Unique login email (lowercase-normalized)
    pub email: Email,
    /// Argon2id password hash
    pub password_hash: UserPassword,
    /// Role (User or Admin)
    pub role: UserRole,
    /// Pending password-reset token, if one was requested
    pub reset_token: Option<ResetToken>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an already-hashed password
    pub fn new(email: Email, password_hash: UserPassword, role: UserRole) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            role,
            reset_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored credential with a new hash
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Attach a pending reset token, replacing any previous one
    pub fn set_reset_token(&mut self, token: ResetToken) {
        self.reset_token = Some(token);
        self.updated_at = Utc::now();
    }

    /// Clear the reset token (single use: called on consumption)
    pub fn clear_reset_token(&mut self) {
        self.reset_token = None;
        self.updated_at = Utc::now();
    }

    /// Whether a presented raw reset token is valid for this user
    pub fn reset_token_matches(&self, raw: &str) -> bool {
        self.reset_token
            .as_ref()
            .is_some_and(|token| token.matches(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;
    use chrono::Duration;

    fn test_user() -> User {
        let raw = RawPassword::new("InitialPass#2024".to_string()).unwrap();
        let hash = UserPassword::from_raw(&raw, None).unwrap();
        User::new(Email::new("a@x.com").unwrap(), hash, UserRole::Admin)
    }

    #[test]
    fn test_set_password_replaces_hash() {
        let mut user = test_user();
        let before = user.password_hash.as_phc_string().to_string();

        let raw = RawPassword::new("ReplacedPass#2024".to_string()).unwrap();
        user.set_password(UserPassword::from_raw(&raw, None).unwrap());

        assert_ne!(user.password_hash.as_phc_string(), before);
        assert!(user.password_hash.verify(&raw, None));
    }

    #[test]
    fn test_reset_token_lifecycle() {
        let mut user = test_user();
        assert!(!user.reset_token_matches("anything"));

        let (raw, token) = ResetToken::generate(Duration::hours(1));
        user.set_reset_token(token);
        assert!(user.reset_token_matches(&raw));

        user.clear_reset_token();
        assert!(!user.reset_token_matches(&raw));
    }

    #[test]
    fn test_expired_reset_token_never_matches() {
        let mut user = test_user();
        let (raw, token) = ResetToken::generate(Duration::zero());
        user.set_reset_token(token);
        assert!(!user.reset_token_matches(&raw));
    }
}
