//! Session Error Types
//!
//! Session-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. The externally visible taxonomy
//! deliberately collapses causes: invalid email and wrong password are
//! one error, and missing/revoked/expired/malformed tokens are one
//! error, so callers cannot enumerate accounts or probe token state.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Session-specific result type alias
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-specific error variants
#[derive(Debug, Error)]
pub enum SessionError {
    /// Malformed input (bad email format, password policy violation)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Login failed; unknown email and wrong password are indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Refresh/access token missing, revoked, expired, or malformed
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Password-reset token absent, expired, or already consumed
    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    /// Admin-only route accessed by a non-admin principal
    #[error("Insufficient permissions")]
    Forbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SessionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SessionError::Validation(_) => StatusCode::BAD_REQUEST,
            SessionError::InvalidCredentials
            | SessionError::InvalidToken
            | SessionError::InvalidResetToken => StatusCode::UNAUTHORIZED,
            SessionError::Forbidden => StatusCode::FORBIDDEN,
            SessionError::Database(_) | SessionError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Validation(_) => ErrorKind::BadRequest,
            SessionError::InvalidCredentials
            | SessionError::InvalidToken
            | SessionError::InvalidResetToken => ErrorKind::Unauthorized,
            SessionError::Forbidden => ErrorKind::Forbidden,
            SessionError::Database(_) | SessionError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            SessionError::Database(e) => {
                tracing::error!(error = %e, "Session database error");
            }
            SessionError::Internal(msg) => {
                tracing::error!(message = %msg, "Session internal error");
            }
            SessionError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            SessionError::InvalidToken => {
                tracing::warn!("Invalid token presented");
            }
            SessionError::InvalidResetToken => {
                tracing::warn!("Invalid password-reset token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Session error");
            }
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for SessionError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => SessionError::Validation(err.message().to_string()),
            _ => SessionError::Internal(err.to_string()),
        }
    }
}

impl From<crate::token::TokenError> for SessionError {
    fn from(_err: crate::token::TokenError) -> Self {
        // All codec failures collapse into one externally visible kind
        SessionError::InvalidToken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases: Vec<(SessionError, StatusCode)> = vec![
            (
                SessionError::Validation("bad email".into()),
                StatusCode::BAD_REQUEST,
            ),
            (SessionError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (SessionError::InvalidToken, StatusCode::UNAUTHORIZED),
            (SessionError::InvalidResetToken, StatusCode::UNAUTHORIZED),
            (SessionError::Forbidden, StatusCode::FORBIDDEN),
            (
                SessionError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected);
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_token_error_collapses() {
        let err: SessionError = crate::token::TokenError::Expired.into();
        assert!(matches!(err, SessionError::InvalidToken));

        let err: SessionError = crate::token::TokenError::WrongType.into();
        assert!(matches!(err, SessionError::InvalidToken));
    }

    #[test]
    fn test_display_does_not_leak_cause() {
        // Unknown email and wrong password must read identically
        assert_eq!(
            SessionError::InvalidCredentials.to_string(),
            SessionError::InvalidCredentials.to_string()
        );
        assert!(!SessionError::InvalidToken.to_string().contains("revoked"));
    }
}
