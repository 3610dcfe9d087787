/// Label carried by every failure of the verification mail flow.
pub const EMAIL_VERIFICATION_LABEL: &str = "Email Verification";

/// Raised by the registration listeners when a verification mail could not be
/// sent, whatever the underlying cause (token storage, template, transport).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error sending [{label}] for user [{recipient}]")]
pub struct MailSendError {
    pub recipient: String,
    pub label: String,
}

impl MailSendError {
    pub fn new(recipient: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            label: label.into(),
        }
    }

    pub fn email_verification(recipient: impl Into<String>) -> Self {
        Self::new(recipient, EMAIL_VERIFICATION_LABEL)
    }
}
