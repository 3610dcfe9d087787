use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::application::domain::{EmailVerificationToken, TokenStatus, User};
use crate::auth::application::ports::outgoing::{
    EmailVerificationTokenRepository, TokenRepositoryError,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenServiceError {
    #[error("Verification token not found")]
    TokenNotFound,

    #[error("Token storage failed: {0}")]
    Storage(String),

    #[error("Token expiry is out of range")]
    ExpiryOutOfRange,
}

impl From<TokenRepositoryError> for TokenServiceError {
    fn from(err: TokenRepositoryError) -> Self {
        match err {
            TokenRepositoryError::TokenNotFound => TokenServiceError::TokenNotFound,
            other => TokenServiceError::Storage(other.to_string()),
        }
    }
}

#[async_trait]
pub trait EmailVerificationTokenService: Send + Sync {
    /// A new opaque token value. Nothing is stored.
    fn generate_new_token(&self) -> String;

    async fn create_verification_token(
        &self,
        user: &User,
        token: &str,
    ) -> Result<EmailVerificationToken, TokenServiceError>;

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<EmailVerificationToken>, TokenServiceError>;

    /// Keeps the token value and pushes its expiry one full period from now.
    async fn update_existing_token_with_expiry(
        &self,
        token: &EmailVerificationToken,
    ) -> Result<EmailVerificationToken, TokenServiceError>;

    async fn confirm_token(
        &self,
        token: &EmailVerificationToken,
    ) -> Result<EmailVerificationToken, TokenServiceError>;
}

#[derive(Debug, Clone)]
pub struct EmailVerificationTokenManager<R>
where
    R: EmailVerificationTokenRepository,
{
    repository: R,
    expiry: Duration,
}

impl<R> EmailVerificationTokenManager<R>
where
    R: EmailVerificationTokenRepository,
{
    pub fn new(repository: R, expiry: Duration) -> Self {
        Self { repository, expiry }
    }
}

#[async_trait]
impl<R> EmailVerificationTokenService for EmailVerificationTokenManager<R>
where
    R: EmailVerificationTokenRepository,
{
    fn generate_new_token(&self) -> String {
        Uuid::new_v4().to_string()
    }

    async fn create_verification_token(
        &self,
        user: &User,
        token: &str,
    ) -> Result<EmailVerificationToken, TokenServiceError> {
        let verification_token =
            EmailVerificationToken::issue(user.id, token.to_string(), self.expiry, Utc::now())
                .ok_or(TokenServiceError::ExpiryOutOfRange)?;

        let saved = self.repository.save(verification_token).await?;
        tracing::debug!(user_id = %user.id, token_id = %saved.id, "Verification token stored");
        Ok(saved)
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<EmailVerificationToken>, TokenServiceError> {
        Ok(self.repository.find_by_token(token).await?)
    }

    async fn update_existing_token_with_expiry(
        &self,
        token: &EmailVerificationToken,
    ) -> Result<EmailVerificationToken, TokenServiceError> {
        let expires_at = Utc::now()
            .checked_add_signed(self.expiry)
            .ok_or(TokenServiceError::ExpiryOutOfRange)?;
        Ok(self.repository.update_expiry(token.id, expires_at).await?)
    }

    async fn confirm_token(
        &self,
        token: &EmailVerificationToken,
    ) -> Result<EmailVerificationToken, TokenServiceError> {
        Ok(self
            .repository
            .update_status(token.id, TokenStatus::Confirmed)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use mockall::{mock, predicate::*};

    mock! {
        pub TokenRepo {}
        #[async_trait]
        impl EmailVerificationTokenRepository for TokenRepo {
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
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            full_name: "Jane Doe".to_string(),
            is_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn pending_token(user_id: Uuid) -> EmailVerificationToken {
        EmailVerificationToken::issue(
            user_id,
            "existing-token".to_string(),
            Duration::hours(24),
            Utc::now() - Duration::hours(30),
        )
        .unwrap()
    }

    #[test]
    fn test_generate_new_token_is_unique_uuid() {
        let manager = EmailVerificationTokenManager::new(MockTokenRepo::new(), Duration::hours(24));

        let first = manager.generate_new_token();
        let second = manager.generate_new_token();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[tokio::test]
    async fn test_create_verification_token_persists_pending_token_for_user() {
        let user = user();
        let user_id = user.id;
        let mut repo = MockTokenRepo::new();
        repo.expect_save()
            .withf(move |t| {
                t.user_id == user_id
                    && t.token == "abc-123"
                    && t.status == TokenStatus::Pending
                    && t.expires_at - t.created_at == Duration::hours(24)
            })
            .times(1)
            .returning(Ok);

        let manager = EmailVerificationTokenManager::new(repo, Duration::hours(24));

        let saved = manager
            .create_verification_token(&user, "abc-123")
            .await
            .expect("token should be stored");

        assert_eq!(saved.token, "abc-123");
        assert_eq!(saved.user_id, user.id);
    }

    #[tokio::test]
    async fn test_create_verification_token_maps_storage_failure() {
        let mut repo = MockTokenRepo::new();
        repo.expect_save()
            .times(1)
            .returning(|_| Err(TokenRepositoryError::DatabaseError("down".to_string())));

        let manager = EmailVerificationTokenManager::new(repo, Duration::hours(24));

        let result = manager.create_verification_token(&user(), "abc").await;

        assert_eq!(
            result,
            Err(TokenServiceError::Storage("Database error: down".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_existing_token_keeps_value_and_extends_expiry() {
        let existing = pending_token(Uuid::new_v4());
        let id = existing.id;
        let before = Utc::now();

        let mut repo = MockTokenRepo::new();
        let returned = existing.clone();
        repo.expect_update_expiry()
            .withf(move |token_id, expires_at| {
                *token_id == id && *expires_at >= before + Duration::hours(24)
            })
            .times(1)
            .returning(move |_, expires_at| {
                Ok(EmailVerificationToken {
                    expires_at,
                    ..returned.clone()
                })
            });

        let manager = EmailVerificationTokenManager::new(repo, Duration::hours(24));

        let refreshed = manager
            .update_existing_token_with_expiry(&existing)
            .await
            .unwrap();

        assert_eq!(refreshed.token, existing.token);
        assert!(!refreshed.is_expired(Utc::now()));
    }

    #[tokio::test]
    async fn test_update_existing_token_not_found() {
        let mut repo = MockTokenRepo::new();
        repo.expect_update_expiry()
            .times(1)
            .returning(|_, _| Err(TokenRepositoryError::TokenNotFound));

        let manager = EmailVerificationTokenManager::new(repo, Duration::hours(24));

        let result = manager
            .update_existing_token_with_expiry(&pending_token(Uuid::new_v4()))
            .await;

        assert_eq!(result, Err(TokenServiceError::TokenNotFound));
    }

    #[tokio::test]
    async fn test_unrepresentable_expiry_is_an_error_not_a_panic() {
        let mut repo = MockTokenRepo::new();
        repo.expect_save().times(0);
        repo.expect_update_expiry().times(0);

        let manager = EmailVerificationTokenManager::new(repo, Duration::MAX);

        assert_eq!(
            manager.create_verification_token(&user(), "abc").await,
            Err(TokenServiceError::ExpiryOutOfRange)
        );
        assert_eq!(
            manager
                .update_existing_token_with_expiry(&pending_token(Uuid::new_v4()))
                .await,
            Err(TokenServiceError::ExpiryOutOfRange)
        );
    }

    #[tokio::test]
    async fn test_confirm_token_sets_confirmed_status() {
        let existing = pending_token(Uuid::new_v4());
        let mut repo = MockTokenRepo::new();
        let returned = existing.clone();
        repo.expect_update_status()
            .with(eq(existing.id), eq(TokenStatus::Confirmed))
            .times(1)
            .returning(move |_, status| {
                Ok(EmailVerificationToken {
                    status,
                    ..returned.clone()
                })
            });

        let manager = EmailVerificationTokenManager::new(repo, Duration::hours(24));

        let confirmed = manager.confirm_token(&existing).await.unwrap();

        assert!(confirmed.is_confirmed());
    }

    #[tokio::test]
    async fn test_find_by_token_passes_through() {
        let existing = pending_token(Uuid::new_v4());
        let mut repo = MockTokenRepo::new();
        let returned = existing.clone();
        repo.expect_find_by_token()
            .with(eq("existing-token"))
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let manager = EmailVerificationTokenManager::new(repo, Duration::hours(24));

        let found = manager.find_by_token("existing-token").await.unwrap();

        assert_eq!(found, Some(existing));
    }
}
