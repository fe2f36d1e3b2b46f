//! Mailer Seam
//!
//! Email delivery is an external collaborator. The session core only
//! needs a fire-and-forget seam: delivery failures are logged and never
//! fail the operation that triggered them.

use thiserror::Error;

use crate::domain::value_object::email::Email;

/// Mailer errors (logged by callers, never propagated to clients)
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// Outbound mail trait
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Deliver the password-reset link carrying the raw token
    async fn send_password_reset(&self, email: &Email, raw_token: &str)
    -> Result<(), MailerError>;

    /// Confirm a completed password reset
    async fn send_password_reset_confirmation(&self, email: &Email) -> Result<(), MailerError>;
}

/// Development mailer: logs instead of sending. The raw token appears
/// in the log so local flows can be completed by hand.
#[derive(Debug, Clone, Default)]
pub struct TracingMailer;

impl Mailer for TracingMailer {
    async fn send_password_reset(
        &self,
        email: &Email,
        raw_token: &str,
    ) -> Result<(), MailerError> {
        tracing::info!(
            email = %email,
            token = %raw_token,
            "Password reset requested (dev mailer, not sent)"
        );
        Ok(())
    }

    async fn send_password_reset_confirmation(&self, email: &Email) -> Result<(), MailerError> {
        tracing::info!(email = %email, "Password reset confirmed (dev mailer, not sent)");
        Ok(())
    }
}
