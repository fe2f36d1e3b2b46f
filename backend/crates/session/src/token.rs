//! Token Codec
//!
//! Stateless signing and verification of HS256 JWTs. Access tokens are
//! short-lived and verified without touching the store; refresh tokens
//! are long-lived and additionally checked against the refresh token
//! store by the application layer. The codec itself has no side
//! effects: given the same key and clock it is a pure function.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::application::config::SessionConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// Codec errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Signature check failed or the token is not a parseable JWT
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token past its expiry (verified with zero leeway)
    #[error("Token expired")]
    Expired,

    /// Access token presented where a refresh token is required, or
    /// the other way around
    #[error("Wrong token type")]
    WrongType,

    /// Signing failed (key misconfiguration)
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::InvalidSignature,
        }
    }
}

/// Token type discriminator carried in the claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// User email at issuance
    pub email: String,
    /// Role code at issuance
    pub role: UserRole,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Unique token ID; two tokens minted in the same second still get
    /// distinct store fingerprints
    pub jti: Uuid,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}

/// Freshly issued refresh token plus the expiry the store must record
#[derive(Debug, Clone)]
pub struct IssuedRefresh {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Stateless token codec
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            issuer: config.issuer.clone(),
            access_ttl: Duration::from_std(config.access_token_ttl)
                .unwrap_or_else(|_| Duration::minutes(15)),
            refresh_ttl: Duration::from_std(config.refresh_token_ttl)
                .unwrap_or_else(|_| Duration::days(7)),
        }
    }

    /// Issue a short-lived access token
    pub fn issue_access(&self, user: &User) -> Result<String, TokenError> {
        let (token, _) = self.issue(user, TokenType::Access, self.access_ttl)?;
        Ok(token)
    }

    /// Issue a long-lived refresh token; the caller persists the
    /// returned expiry alongside the token fingerprint
    pub fn issue_refresh(&self, user: &User) -> Result<IssuedRefresh, TokenError> {
        let (token, expires_at) = self.issue(user, TokenType::Refresh, self.refresh_ttl)?;
        Ok(IssuedRefresh { token, expires_at })
    }

    fn issue(
        &self,
        user: &User,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<(String, DateTime<Utc>), TokenError> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = Claims {
            sub: *user.user_id.as_uuid(),
            email: user.email.as_str().to_string(),
            role: user.role,
            token_type,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        // Report the expiry actually encoded (second precision)
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .unwrap_or(expires_at);

        Ok((token, expires_at))
    }

    /// Verify signature, expiry, and token type, returning the claims
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        // Zero leeway: a token at its expiry instant is rejected
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        if data.claims.token_type != expected {
            return Err(TokenError::WrongType);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        email::Email,
        user_password::{RawPassword, UserPassword},
    };

    fn test_codec() -> TokenCodec {
        TokenCodec::new(&SessionConfig::with_secret(
            b"test_secret_key_for_codec_tests!".to_vec(),
        ))
    }

    fn test_user() -> User {
        let raw = RawPassword::new("CodecTest#2024".to_string()).unwrap();
        let hash = UserPassword::from_raw(&raw, None).unwrap();
        User::new(Email::new("a@x.com").unwrap(), hash, UserRole::Admin)
    }

    #[test]
    fn test_access_token_roundtrip() {
        let codec = test_codec();
        let user = test_user();

        let token = codec.issue_access(&user).unwrap();
        let claims = codec.verify(&token, TokenType::Access).unwrap();

        assert_eq!(claims.sub, *user.user_id.as_uuid());
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let codec = test_codec();
        let user = test_user();

        let issued = codec.issue_refresh(&user).unwrap();
        let claims = codec.verify(&issued.token, TokenType::Refresh).unwrap();

        assert_eq!(claims.user_id(), user.user_id);
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let codec = test_codec();
        let user = test_user();

        let access = codec.issue_access(&user).unwrap();
        let refresh = codec.issue_refresh(&user).unwrap();

        assert_eq!(
            codec.verify(&access, TokenType::Refresh).unwrap_err(),
            TokenError::WrongType
        );
        assert_eq!(
            codec.verify(&refresh.token, TokenType::Access).unwrap_err(),
            TokenError::WrongType
        );
    }

    #[test]
    fn test_tampered_token_rejected() {
        let codec = test_codec();
        let user = test_user();

        let mut token = codec.issue_access(&user).unwrap();
        // Flip a character in the payload segment
        let mid = token.len() / 2;
        let replacement = if token.as_bytes()[mid] == b'A' { 'B' } else { 'A' };
        token.replace_range(mid..mid + 1, &replacement.to_string());

        assert_eq!(
            codec.verify(&token, TokenType::Access).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec1 = test_codec();
        let codec2 = TokenCodec::new(&SessionConfig::with_secret(
            b"a_completely_different_secret_key".to_vec(),
        ));
        let user = test_user();

        let token = codec1.issue_access(&user).unwrap();
        assert_eq!(
            codec2.verify(&token, TokenType::Access).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = SessionConfig::with_secret(b"test_secret_key_for_codec_tests!".to_vec());
        let codec = TokenCodec::new(&config);
        let user = test_user();

        // Hand-craft a token whose expiry is in the past
        let now = Utc::now();
        let claims = Claims {
            sub: *user.user_id.as_uuid(),
            email: user.email.as_str().to_string(),
            role: user.role,
            token_type: TokenType::Access,
            iat: now.timestamp() - 300,
            exp: now.timestamp() - 120,
            iss: config.issuer.clone(),
            jti: Uuid::new_v4(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&config.jwt_secret),
        )
        .unwrap();

        assert_eq!(
            codec.verify(&token, TokenType::Access).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_garbage_token_rejected() {
        let codec = test_codec();
        assert_eq!(
            codec
                .verify("not.a.jwt", TokenType::Access)
                .unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_jti_unique_per_issue() {
        let codec = test_codec();
        let user = test_user();

        let t1 = codec.issue_refresh(&user).unwrap();
        let t2 = codec.issue_refresh(&user).unwrap();
        assert_ne!(t1.token, t2.token);
    }
}
