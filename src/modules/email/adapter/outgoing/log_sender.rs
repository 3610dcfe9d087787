use crate::email::application::ports::outgoing::email_sender::{EmailSendError, EmailSender};
use async_trait::async_trait;

/// Sender that never leaves the process: every mail is written to the log
/// and dropped. Selected with `MAIL_TRANSPORT=log` during local development.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEmailSender;

impl LogEmailSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailSendError> {
        tracing::info!(to = %to, subject = %subject, "Email captured by log transport");
        tracing::debug!(body = %body, "Captured email body");
        Ok(())
    }
}
