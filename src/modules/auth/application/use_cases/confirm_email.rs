use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::auth::application::ports::outgoing::{UserRepository, UserRepositoryError};
use crate::auth::application::services::EmailVerificationTokenService;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfirmEmailError {
    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Email already verified")]
    AlreadyVerified,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait IConfirmEmailUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<(), ConfirmEmailError>;
}

pub struct ConfirmEmailUseCase<R>
where
    R: UserRepository,
{
    repository: R,
    token_service: Arc<dyn EmailVerificationTokenService + Send + Sync>,
}

impl<R> ConfirmEmailUseCase<R>
where
    R: UserRepository,
{
    pub fn new(
        repository: R,
        token_service: Arc<dyn EmailVerificationTokenService + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            token_service,
        }
    }
}

#[async_trait]
impl<R> IConfirmEmailUseCase for ConfirmEmailUseCase<R>
where
    R: UserRepository,
{
    async fn execute(&self, token: &str) -> Result<(), ConfirmEmailError> {
        let verification_token = self
            .token_service
            .find_by_token(token)
            .await
            .map_err(|e| ConfirmEmailError::DatabaseError(e.to_string()))?
            .ok_or(ConfirmEmailError::TokenInvalid)?;

        if verification_token.is_confirmed() {
            return Err(ConfirmEmailError::AlreadyVerified);
        }
        if verification_token.is_expired(Utc::now()) {
            return Err(ConfirmEmailError::TokenExpired);
        }

        // Activate first: if confirming the token fails afterwards the user can
        // simply follow the same link again.
        self.repository
            .activate_user(verification_token.user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => ConfirmEmailError::UserNotFound,
                other => ConfirmEmailError::DatabaseError(other.to_string()),
            })?;

        self.token_service
            .confirm_token(&verification_token)
            .await
            .map_err(|e| ConfirmEmailError::DatabaseError(e.to_string()))?;

        tracing::info!(user_id = %verification_token.user_id, "Email verified");
        Ok(())
    }
}
