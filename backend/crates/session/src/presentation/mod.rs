//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::SessionAppState;
pub use middleware::{SessionMiddlewareState, require_admin, require_auth};
pub use router::{session_router, session_router_generic};
