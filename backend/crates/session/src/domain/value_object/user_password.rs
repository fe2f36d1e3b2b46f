//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. `UserPassword::from_raw`
//! is the only place in the crate where a raw password becomes a hash;
//! entities store the hashed form and never re-hash on save.

use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword` with domain-specific error handling.
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// Validation rules follow NIST SP 800-63B: 8..=128 characters,
    /// no control characters, no trivially predictable patterns,
    /// Unicode NFKC normalized.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
                "Password must be at least {} characters (got {})",
                min, actual
            ))
            .with_action("Please choose a longer password"),

            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Password must be at most {} characters (got {})",
                max, actual
            ))
            .with_action("Please choose a shorter password"),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }

            PasswordPolicyError::CommonPattern => {
                AppError::bad_request("Password is too common or follows a predictable pattern")
                    .with_action("Please choose a more unique password")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Create a raw password for verification only
    ///
    /// Applies shape checks (non-empty, length cap, NFKC) but not the
    /// full policy. A password set before a policy tightening must
    /// still verify at login.
    pub fn for_login(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::for_verification(raw)
            .map_err(|_| AppError::bad_request("Password is empty or too long"))?;
        Ok(Self(clear_text))
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
///
/// Argon2id PHC string. Safe to store and log.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password for storage.
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            _ => AppError::internal("Unexpected error during password hashing"),
        })?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(|_| {
            AppError::new(
                ErrorKind::InternalServerError,
                "Invalid password hash in database",
            )
        })?;

        Ok(Self(hashed))
    }

    /// Fixed hash that matches no password
    ///
    /// Used to equalize verification cost on paths that have no stored
    /// hash to check against.
    pub fn dummy() -> Self {
        Self(HashedPassword::dummy())
    }

    /// Whether the stored hash predates the current hashing parameters
    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// Argon2 performs the comparison in constant time, so a mismatch
    /// is not distinguishable from a match by timing.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}
