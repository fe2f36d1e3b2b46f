//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, reset_token::ResetToken, user_id::UserId, user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::{SessionError, SessionResult};

/// PostgreSQL-backed session repository
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgSessionRepository {
    async fn create(&self, user: &User) -> SessionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                user_role,
                reset_token_hash,
                reset_token_expires_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.id())
        .bind(user.reset_token.as_ref().map(|t| t.fingerprint()))
        .bind(user.reset_token.as_ref().map(|t| t.expires_at()))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> SessionResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                user_role,
                reset_token_hash,
                reset_token_expires_at,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> SessionResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                user_role,
                reset_token_hash,
                reset_token_expires_at,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_reset_token(&self, fingerprint: &str) -> SessionResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                user_role,
                reset_token_hash,
                reset_token_expires_at,
                created_at,
                updated_at
            FROM users
            WHERE reset_token_hash = $1
            "#,
        )
        .bind(fingerprint)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update(&self, user: &User) -> SessionResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                password_hash = $3,
                user_role = $4,
                reset_token_hash = $5,
                reset_token_expires_at = $6,
                updated_at = $7
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.id())
        .bind(user.reset_token.as_ref().map(|t| t.fingerprint()))
        .bind(user.reset_token.as_ref().map(|t| t.expires_at()))
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Refresh Token Repository Implementation
// ============================================================================

impl RefreshTokenRepository for PgSessionRepository {
    async fn create(&self, token: &RefreshToken) -> SessionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (
                token_hash,
                user_id,
                expires_at,
                revoked,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&token.token_hash)
        .bind(token.user_id.as_uuid())
        .bind(token.expires_at)
        .bind(token.revoked)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> SessionResult<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT
                token_hash,
                user_id,
                expires_at,
                revoked,
                created_at
            FROM refresh_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RefreshTokenRow::into_refresh_token))
    }

    async fn revoke(&self, token_hash: &str) -> SessionResult<bool> {
        // Conditional update: concurrent callers race, one wins
        let updated = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE token_hash = $1 AND revoked = FALSE
            "#,
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn revoke_all_for_user(&self, user_id: &UserId) -> SessionResult<u64> {
        let revoked = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE user_id = $1 AND revoked = FALSE
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(revoked)
    }

    async fn cleanup_expired(&self) -> SessionResult<u64> {
        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(tokens_deleted = deleted, "Cleaned up expired refresh tokens");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    user_role: i16,
    reset_token_hash: Option<String>,
    reset_token_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> SessionResult<User> {
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| SessionError::Internal(format!("Invalid password hash: {}", e)))?;

        // Both columns set together; a lone fingerprint without an
        // expiry is treated as no pending token
        let reset_token = match (self.reset_token_hash, self.reset_token_expires_at) {
            (Some(fingerprint), Some(expires_at)) => {
                Some(ResetToken::from_db(fingerprint, expires_at))
            }
            _ => None,
        };

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            role: UserRole::from_id(self.user_role),
            reset_token,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    token_hash: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    revoked: bool,
    created_at: DateTime<Utc>,
}

impl RefreshTokenRow {
    fn into_refresh_token(self) -> RefreshToken {
        RefreshToken {
            token_hash: self.token_hash,
            user_id: UserId::from_uuid(self.user_id),
            expires_at: self.expires_at,
            revoked: self.revoked,
            created_at: self.created_at,
        }
    }
}
