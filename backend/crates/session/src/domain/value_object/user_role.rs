use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role. The portfolio backend serves a single operator, so
/// the hierarchy is intentionally flat: regular users and the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    User = 0,
    Admin = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Self {
        match id {
            0 => UserRole::User,
            1 => UserRole::Admin,
            _ => {
                tracing::error!("Invalid UserRole id: {}", id);
                unreachable!("Invalid UserRole id: {}", id)
            }
        }
    }

    /// Parse a role code. Unknown codes fall back to the least
    /// privileged role rather than panicking, since codes travel
    /// inside token claims.
    #[inline]
    pub fn from_code(code: &str) -> Self {
        match code {
            "admin" => UserRole::Admin,
            "user" => UserRole::User,
            other => {
                tracing::warn!("Unknown UserRole code: {}", other);
                UserRole::User
            }
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(0), UserRole::User);
        assert_eq!(UserRole::from_id(1), UserRole::Admin);
    }

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("user"), UserRole::User);
        assert_eq!(UserRole::from_code("admin"), UserRole::Admin);
        // Unknown codes degrade to User
        assert_eq!(UserRole::from_code("superuser"), UserRole::User);
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::User.to_string(), "user");
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_is_admin() {
        assert!(!UserRole::User.is_admin());
        assert!(UserRole::Admin.is_admin());
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, r#""admin""#);
        let role: UserRole = serde_json::from_str(&json).unwrap();
        assert_eq!(role, UserRole::Admin);
    }
}
