//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;
use crate::token::Claims;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login / refresh response: fresh token pair plus user summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

/// User summary embedded in token responses and `/me`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl UserInfo {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: *user.user_id.as_uuid(),
            email: user.email.as_str().to_string(),
            role: user.role,
        }
    }

    /// Build from verified access-token claims, without a store lookup
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email.clone(),
            role: claims.role,
        }
    }
}

// ============================================================================
// Refresh / Logout
// ============================================================================

/// Refresh request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Logout request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: String,
}

// ============================================================================
// Password Reset
// ============================================================================

/// Forgot-password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Reset-password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// Verify-reset-token request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResetTokenRequest {
    pub token: String,
}

/// Verify-reset-token response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResetTokenResponse {
    pub valid: bool,
}

// ============================================================================
// Generic
// ============================================================================

/// Plain message response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_camel_case() {
        let json = r#"{"email":"a@x.com","password":"pw"}"#;
        let req: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.email, "a@x.com");
        assert_eq!(req.password, "pw");
    }

    #[test]
    fn test_refresh_request_camel_case() {
        let json = r#"{"refreshToken":"abc.def.ghi"}"#;
        let req: RefreshRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.refresh_token, "abc.def.ghi");
    }

    #[test]
    fn test_token_pair_response_shape() {
        let response = TokenPairResponse {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            user: UserInfo {
                id: Uuid::nil(),
                email: "a@x.com".to_string(),
                role: UserRole::Admin,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["accessToken"], "at");
        assert_eq!(json["refreshToken"], "rt");
        assert_eq!(json["user"]["email"], "a@x.com");
        assert_eq!(json["user"]["role"], "admin");
    }

    #[test]
    fn test_verify_response_shape() {
        let json = serde_json::to_value(VerifyResetTokenResponse { valid: false }).unwrap();
        assert_eq!(json["valid"], false);
    }
}
