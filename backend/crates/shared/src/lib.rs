//! Shared Kernel - Domain-crossing minimal core
//!
//! The smallest vocabulary shared by every backend crate:
//! - Unified error type, result alias, and HTTP error classification
//! - Typed ID wrappers for entity identifiers
//!
//! **Design Principle**: only things that are hard to change and mean
//! the same thing in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
