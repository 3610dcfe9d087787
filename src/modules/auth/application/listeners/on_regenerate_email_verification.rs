use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::events::{ApplicationListener, OnRegenerateEmailVerificationEvent};
use crate::email::application::errors::MailSendError;
use crate::email::application::ports::incoming::MailService;

/// Resends the verification email for a token the user already holds.
#[derive(Clone)]
pub struct OnRegenerateEmailVerificationListener {
    mail_service: Arc<dyn MailService + Send + Sync>,
}

impl OnRegenerateEmailVerificationListener {
    pub fn new(mail_service: Arc<dyn MailService + Send + Sync>) -> Self {
        Self { mail_service }
    }

    async fn resend_email_verification(
        &self,
        event: &OnRegenerateEmailVerificationEvent,
    ) -> Result<(), MailSendError> {
        let recipient = event.user.email.as_str();

        let confirmation_url = event
            .redirect_url
            .clone()
            .query_param("token", &event.token.token)
            .to_uri_string();

        self.mail_service
            .send_email_verification(&confirmation_url, recipient)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %event.user.id,
                    error = %e,
                    "Failed to resend verification email"
                );
                MailSendError::email_verification(recipient)
            })
    }
}

#[async_trait]
impl ApplicationListener<OnRegenerateEmailVerificationEvent>
    for OnRegenerateEmailVerificationListener
{
    async fn on_application_event(
        &self,
        event: &OnRegenerateEmailVerificationEvent,
    ) -> Result<(), MailSendError> {
        self.resend_email_verification(event).await
    }
}
