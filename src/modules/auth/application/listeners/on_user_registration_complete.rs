use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::events::{ApplicationListener, OnUserRegistrationCompleteEvent};
use crate::auth::application::services::EmailVerificationTokenService;
use crate::email::application::errors::MailSendError;
use crate::email::application::ports::incoming::MailService;

/// Sends the first verification email once a user has registered.
#[derive(Clone)]
pub struct OnUserRegistrationCompleteListener {
    token_service: Arc<dyn EmailVerificationTokenService + Send + Sync>,
    mail_service: Arc<dyn MailService + Send + Sync>,
}

impl OnUserRegistrationCompleteListener {
    pub fn new(
        token_service: Arc<dyn EmailVerificationTokenService + Send + Sync>,
        mail_service: Arc<dyn MailService + Send + Sync>,
    ) -> Self {
        Self {
            token_service,
            mail_service,
        }
    }

    /// Stores a new token for the user, then mails the confirmation link.
    async fn send_email_verification(
        &self,
        event: &OnUserRegistrationCompleteEvent,
    ) -> Result<(), MailSendError> {
        let user = &event.user;
        let recipient = user.email.as_str();

        let token = self.token_service.generate_new_token();
        self.token_service
            .create_verification_token(user, &token)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Failed to store verification token");
                MailSendError::email_verification(recipient)
            })?;

        let confirmation_url = event
            .redirect_url
            .clone()
            .query_param("token", &token)
            .to_uri_string();

        self.mail_service
            .send_email_verification(&confirmation_url, recipient)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Failed to send verification email");
                MailSendError::email_verification(recipient)
            })
    }
}

#[async_trait]
impl ApplicationListener<OnUserRegistrationCompleteEvent> for OnUserRegistrationCompleteListener {
    async fn on_application_event(
        &self,
        event: &OnUserRegistrationCompleteEvent,
    ) -> Result<(), MailSendError> {
        self.send_email_verification(event).await
    }
}
