//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod logout;
pub mod mailer;
pub mod password_reset;
pub mod refresh;

// Re-exports
pub use config::SessionConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::{LogoutInput, LogoutUseCase};
pub use mailer::{Mailer, MailerError, TracingMailer};
pub use password_reset::PasswordResetUseCase;
pub use refresh::{RefreshInput, RefreshOutput, RefreshUseCase};
