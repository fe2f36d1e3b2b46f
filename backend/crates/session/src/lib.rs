//! Session (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Email + password login issuing JWT access/refresh token pairs
//! - Refresh token rotation with single-use revocable store records
//! - Single-use, expiring password-reset tokens
//! - Role-based access (User, Admin)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Refresh and reset tokens stored only as SHA-256 fingerprints
//! - Stateless HS256 access tokens verified with zero leeway
//! - Credential and token failures collapse to uniform errors

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;
pub mod token;


// Re-exports for convenience
pub use application::config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use infra::postgres::PgSessionRepository;
pub use presentation::router::session_router;
pub use token::TokenCodec;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgSessionRepository as SessionStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
