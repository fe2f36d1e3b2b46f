//! Reset Token Value Object
//!
//! Single-use password-reset credential. Only a SHA-256 fingerprint of
//! the raw token is ever persisted; the raw form exists exactly twice,
//! in the generating call and in the outgoing email.

use chrono::{DateTime, Duration, Utc};
use platform::crypto::{constant_time_eq, random_bytes, sha256, to_base64};

/// Entropy of the raw token in bytes
const RESET_TOKEN_BYTES: usize = 32;

/// Stored password-reset token: fingerprint + expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetToken {
    fingerprint: String,
    expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Generate a fresh token, returning the raw form (for delivery)
    /// and the storable form.
    pub fn generate(ttl: Duration) -> (String, Self) {
        use base64::Engine;
        let raw =
            base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes(RESET_TOKEN_BYTES));
        let token = Self {
            fingerprint: Self::fingerprint_of(&raw),
            expires_at: Utc::now() + ttl,
        };
        (raw, token)
    }

    /// Fingerprint of a raw token as presented by a client.
    pub fn fingerprint_of(raw: &str) -> String {
        to_base64(&sha256(raw.as_bytes()))
    }

    /// Reconstruct from database columns
    pub fn from_db(fingerprint: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            fingerprint,
            expires_at,
        }
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Fail closed: a token presented exactly at its expiry instant is
    /// already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check a presented raw token: fingerprint match and not expired.
    pub fn matches(&self, raw: &str) -> bool {
        let presented = Self::fingerprint_of(raw);
        constant_time_eq(presented.as_bytes(), self.fingerprint.as_bytes()) && !self.is_expired()
    }
}
