use crate::auth::application::domain::{EmailVerificationToken, TokenStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenRepositoryError {
    #[error("Token not found")]
    TokenNotFound,

    #[error("Token already exists")]
    DuplicateToken,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Storage for email verification tokens, keyed by the opaque token value.
#[async_trait]
pub trait EmailVerificationTokenRepository: Send + Sync {
    async fn save(
        &self,
        token: EmailVerificationToken,
    ) -> Result<EmailVerificationToken, TokenRepositoryError>;

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<EmailVerificationToken>, TokenRepositoryError>;

    async fn update_expiry(
        &self,
        id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<EmailVerificationToken, TokenRepositoryError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: TokenStatus,
    ) -> Result<EmailVerificationToken, TokenRepositoryError>;
}
