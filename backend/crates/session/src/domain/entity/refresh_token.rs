//! Refresh Token Entity
//!
//! Persisted, revocable record backing one refresh token. The record
//! is keyed by a SHA-256 fingerprint of the raw JWT, so a database
//! leak does not disclose usable tokens.
//!
//! Lineage per token: Issued -> Active -> {Rotated | Revoked | Expired}.
//! A token that leaves Active never becomes usable again; rotation and
//! logout both land on the `revoked` flag, expiry is passive.

use chrono::{DateTime, Utc};
use platform::crypto::{sha256, to_base64};

use crate::domain::value_object::user_id::UserId;

/// Refresh token record
#[derive(Debug, Clone)]
pub struct RefreshToken {
    /// SHA-256 fingerprint of the raw token (base64)
    pub token_hash: String,
    /// Owning user
    pub user_id: UserId,
    /// Hard expiry; expired records are treated as invalid in place
    pub expires_at: DateTime<Utc>,
    /// Set by logout, rotation, or bulk revocation on password reset
    pub revoked: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Create a record for a freshly issued raw token
    pub fn new(raw_token: &str, user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_hash: Self::fingerprint(raw_token),
            user_id,
            expires_at,
            revoked: false,
            created_at: Utc::now(),
        }
    }

    /// Fingerprint of a raw token for store lookups
    pub fn fingerprint(raw_token: &str) -> String {
        to_base64(&sha256(raw_token.as_bytes()))
    }

    /// Fail closed at the boundary: `now == expires_at` is expired
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Usable for a refresh: neither revoked nor expired
    pub fn is_active(&self) -> bool {
        !self.revoked && !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_token_is_active() {
        let token = RefreshToken::new("raw.jwt.token", UserId::new(), Utc::now() + Duration::days(7));
        assert!(token.is_active());
        assert!(!token.revoked);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_fingerprint_deterministic() {
        assert_eq!(
            RefreshToken::fingerprint("raw.jwt.token"),
            RefreshToken::fingerprint("raw.jwt.token")
        );
        assert_ne!(
            RefreshToken::fingerprint("raw.jwt.token"),
            RefreshToken::fingerprint("raw.jwt.other")
        );
    }

    #[test]
    fn test_revoked_token_not_active() {
        let mut token =
            RefreshToken::new("raw.jwt.token", UserId::new(), Utc::now() + Duration::days(7));
        token.revoked = true;
        assert!(!token.is_active());
    }

    #[test]
    fn test_expiry_boundary() {
        let token = RefreshToken::new("raw.jwt.token", UserId::new(), Utc::now() + Duration::days(7));
        let at_expiry = token.expires_at;

        assert!(token.is_expired_at(at_expiry));
        assert!(!token.is_expired_at(at_expiry - Duration::seconds(1)));
    }
}
