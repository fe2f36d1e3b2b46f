//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64, random bytes)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)

pub mod crypto;
pub mod password;
