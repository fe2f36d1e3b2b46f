//! Application Configuration
//!
//! Configuration for the session application layer. TTLs are
//! environment-supplied; production deployments run with shorter
//! access-token lifetimes than development ones.

use std::time::Duration;

/// Session application configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HS256 signing secret for both token types
    pub jwt_secret: Vec<u8>,
    /// Issuer claim stamped into every token
    pub issuer: String,
    /// Access token TTL (15 minutes in production, up to 1 hour in dev)
    pub access_token_ttl: Duration,
    /// Refresh token TTL (1 week)
    pub refresh_token_ttl: Duration,
    /// Password-reset token TTL (1 hour)
    pub reset_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            issuer: "portfolio-api".to_string(),
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
            reset_token_ttl: Duration::from_secs(3600),
            password_pepper: None,
        }
    }
}

impl SessionConfig {
    /// Create config with an explicit signing secret
    pub fn with_secret(jwt_secret: Vec<u8>) -> Self {
        Self {
            jwt_secret,
            ..Default::default()
        }
    }

    /// Create config with a random signing secret (for development;
    /// tokens do not survive a restart)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::with_secret(secret)
    }

    /// Development profile: random secret, relaxed access-token TTL
    pub fn development() -> Self {
        Self {
            access_token_ttl: Duration::from_secs(3600),
            ..Self::with_random_secret()
        }
    }

    /// Get reset-token TTL as a chrono duration
    pub fn reset_token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.reset_token_ttl)
            .unwrap_or_else(|_| chrono::Duration::hours(1))
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
