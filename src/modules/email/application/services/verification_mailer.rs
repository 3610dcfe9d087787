use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::email::application::ports::incoming::{MailError, MailService};
use crate::email::application::ports::outgoing::EmailSender;
use crate::email::application::services::template::VerificationTemplate;

#[derive(Clone)]
pub struct VerificationMailer {
    sender: Arc<dyn EmailSender + Send + Sync>,
    template: VerificationTemplate,
    subject: String,
    expiry_hours: i64,
}

impl fmt::Debug for VerificationMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationMailer")
            .field("sender", &"<dyn EmailSender>")
            .field("subject", &self.subject)
            .field("expiry_hours", &self.expiry_hours)
            .finish()
    }
}

impl VerificationMailer {
    pub fn new(
        sender: Arc<dyn EmailSender + Send + Sync>,
        template: VerificationTemplate,
        subject: impl Into<String>,
        expiry_hours: i64,
    ) -> Self {
        Self {
            sender,
            template,
            subject: subject.into(),
            expiry_hours,
        }
    }
}

#[async_trait]
impl MailService for VerificationMailer {
    async fn send_email_verification(
        &self,
        confirmation_url: &str,
        recipient: &str,
    ) -> Result<(), MailError> {
        let body = self.template.render(confirmation_url, self.expiry_hours)?;

        self.sender
            .send_email(recipient, &self.subject, &body)
            .await
            .map_err(MailError::from)?;

        tracing::info!(recipient = %recipient, "Verification email sent");
        Ok(())
    }
}
