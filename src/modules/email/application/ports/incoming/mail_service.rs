use async_trait::async_trait;

use crate::email::application::ports::outgoing::EmailSendError;

/// Failures a mail delivery can end with, grouped the way callers care about:
/// the body could not be produced, the message could not be assembled, or the
/// transport refused it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailError {
    #[error("Template error: {0}")]
    Template(String),

    #[error("Messaging error: {0}")]
    Messaging(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<EmailSendError> for MailError {
    fn from(err: EmailSendError) -> Self {
        match err {
            EmailSendError::InvalidAddress(msg) | EmailSendError::MessageBuild(msg) => {
                MailError::Messaging(msg)
            }
            EmailSendError::Transport(msg) => MailError::Transport(msg),
        }
    }
}

#[async_trait]
pub trait MailService: Send + Sync {
    async fn send_email_verification(
        &self,
        confirmation_url: &str,
        recipient: &str,
    ) -> Result<(), MailError>;
}
