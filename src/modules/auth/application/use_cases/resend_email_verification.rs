use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::domain::RedirectUrl;
use crate::auth::application::events::{
    ApplicationEventPublisher, OnRegenerateEmailVerificationEvent,
};
use crate::auth::application::ports::outgoing::UserRepository;
use crate::auth::application::services::{EmailVerificationTokenService, TokenServiceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendEmailVerificationOutput {
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResendEmailVerificationError {
    #[error("Invalid token")]
    TokenInvalid,

    #[error("Email already verified")]
    AlreadyVerified,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<TokenServiceError> for ResendEmailVerificationError {
    fn from(err: TokenServiceError) -> Self {
        match err {
            TokenServiceError::TokenNotFound => ResendEmailVerificationError::TokenInvalid,
            other => ResendEmailVerificationError::DatabaseError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait IResendEmailVerificationUseCase: Send + Sync {
    async fn execute(
        &self,
        existing_token: &str,
    ) -> Result<ResendEmailVerificationOutput, ResendEmailVerificationError>;
}

/// Re-arms an existing verification token and asks for the mail to be sent
/// again with [`OnRegenerateEmailVerificationEvent`]. The token value does not
/// change, so links already in the user's inbox keep working.
pub struct ResendEmailVerificationUseCase<R>
where
    R: UserRepository,
{
    repository: R,
    token_service: Arc<dyn EmailVerificationTokenService + Send + Sync>,
    publisher: ApplicationEventPublisher<OnRegenerateEmailVerificationEvent>,
    confirmation_url: RedirectUrl,
}

impl<R> ResendEmailVerificationUseCase<R>
where
    R: UserRepository,
{
    pub fn new(
        repository: R,
        token_service: Arc<dyn EmailVerificationTokenService + Send + Sync>,
        publisher: ApplicationEventPublisher<OnRegenerateEmailVerificationEvent>,
        confirmation_url: RedirectUrl,
    ) -> Self {
        Self {
            repository,
            token_service,
            publisher,
            confirmation_url,
        }
    }
}

#[async_trait]
impl<R> IResendEmailVerificationUseCase for ResendEmailVerificationUseCase<R>
where
    R: UserRepository,
{
    async fn execute(
        &self,
        existing_token: &str,
    ) -> Result<ResendEmailVerificationOutput, ResendEmailVerificationError> {
        let token = self
            .token_service
            .find_by_token(existing_token)
            .await?
            .ok_or(ResendEmailVerificationError::TokenInvalid)?;

        if token.is_confirmed() {
            return Err(ResendEmailVerificationError::AlreadyVerified);
        }

        let user = self
            .repository
            .find_by_id(token.user_id)
            .await
            .map_err(|e| ResendEmailVerificationError::DatabaseError(e.to_string()))?
            .ok_or(ResendEmailVerificationError::UserNotFound)?;

        if user.is_verified {
            return Err(ResendEmailVerificationError::AlreadyVerified);
        }

        let refreshed = self
            .token_service
            .update_existing_token_with_expiry(&token)
            .await?;

        tracing::info!(user_id = %user.id, "Verification token re-issued");

        let output = ResendEmailVerificationOutput {
            email: user.email.clone(),
            message: "A new verification email has been sent. Please check your inbox."
                .to_string(),
        };

        self.publisher.publish(OnRegenerateEmailVerificationEvent::new(
            user,
            self.confirmation_url.clone(),
            refreshed,
        ));

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::{EmailVerificationToken, TokenStatus, User};
    use crate::auth::application::ports::outgoing::{CreateUserData, UserRepositoryError};
    use crate::tests::support::stubs::RecordingListener;
    use chrono::{Duration, Utc};
    use mockall::{mock, predicate::*};
    use uuid::Uuid;

    mock! {
        pub UserRepo {}
        #[async_trait]
        impl UserRepository for UserRepo {
            async fn create_user(&self, user: CreateUserData) -> Result<User, UserRepositoryError>;
            async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserRepositoryError>;
            async fn activate_user(&self, user_id: Uuid) -> Result<User, UserRepositoryError>;
        }
    }

    mock! {
        pub TokenService {}
        #[async_trait]
        impl EmailVerificationTokenService for TokenService {
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
            async fn update_existing_token_with_expiry(
                &self,
                token: &EmailVerificationToken,
            ) -> Result<EmailVerificationToken, TokenServiceError>;
            async fn confirm_token(
                &self,
                token: &EmailVerificationToken,
            ) -> Result<EmailVerificationToken, TokenServiceError>;
        }
    }

    fn user(id: Uuid, is_verified: bool) -> User {
        User {
            id,
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            full_name: "Jane Doe".to_string(),
            is_verified,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn expired_token(user_id: Uuid) -> EmailVerificationToken {
        EmailVerificationToken::issue(
            user_id,
            "existing-token".to_string(),
            Duration::hours(24),
            Utc::now() - Duration::hours(48),
        )
        .unwrap()
    }

    fn use_case(
        repo: MockUserRepo,
        token_service: MockTokenService,
        listener: Arc<RecordingListener<OnRegenerateEmailVerificationEvent>>,
    ) -> ResendEmailVerificationUseCase<MockUserRepo> {
        ResendEmailVerificationUseCase::new(
            repo,
            Arc::new(token_service),
            ApplicationEventPublisher::<OnRegenerateEmailVerificationEvent>::new()
                .with_listener(listener),
            RedirectUrl::parse("https://app.test/api/auth/registration-confirmation").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_resend_reuses_token_and_publishes_event() {
        let user_id = Uuid::new_v4();
        let existing = expired_token(user_id);

        let mut token_service = MockTokenService::new();
        let found = existing.clone();
        token_service
            .expect_find_by_token()
            .with(eq("existing-token"))
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        token_service
            .expect_update_existing_token_with_expiry()
            .times(1)
            .returning(|t| {
                Ok(EmailVerificationToken {
                    expires_at: Utc::now() + Duration::hours(24),
                    ..t.clone()
                })
            });
        token_service.expect_generate_new_token().times(0);
        token_service.expect_create_verification_token().times(0);

        let mut repo = MockUserRepo::new();
        repo.expect_find_by_id()
            .with(eq(user_id))
            .times(1)
            .returning(|id| Ok(Some(user(id, false))));

        let listener = Arc::new(RecordingListener::new());
        let use_case = use_case(repo, token_service, listener.clone());

        let output = use_case.execute("existing-token").await.unwrap();
        assert_eq!(output.email, "jane@example.com");

        let event = listener
            .wait_for_event(std::time::Duration::from_secs(1))
            .await
            .expect("regenerate event should be delivered");
        assert_eq!(event.token.token, "existing-token");
        assert_eq!(event.token.id, existing.id);
        assert!(!event.token.is_expired(Utc::now()));
        assert_eq!(event.user.id, user_id);
    }

    #[tokio::test]
    async fn test_resend_unknown_token() {
        let mut token_service = MockTokenService::new();
        token_service
            .expect_find_by_token()
            .returning(|_| Ok(None));
        let listener = Arc::new(RecordingListener::new());

        let use_case = use_case(MockUserRepo::new(), token_service, listener.clone());

        assert_eq!(
            use_case.execute("nope").await,
            Err(ResendEmailVerificationError::TokenInvalid)
        );
        assert!(listener.events().is_empty());
    }

    #[tokio::test]
    async fn test_resend_confirmed_token_is_rejected() {
        let mut confirmed = expired_token(Uuid::new_v4());
        confirmed.status = TokenStatus::Confirmed;

        let mut token_service = MockTokenService::new();
        token_service
            .expect_find_by_token()
            .returning(move |_| Ok(Some(confirmed.clone())));
        token_service
            .expect_update_existing_token_with_expiry()
            .times(0);

        let use_case = use_case(
            MockUserRepo::new(),
            token_service,
            Arc::new(RecordingListener::new()),
        );

        assert_eq!(
            use_case.execute("existing-token").await,
            Err(ResendEmailVerificationError::AlreadyVerified)
        );
    }

    #[tokio::test]
    async fn test_resend_for_verified_user_is_rejected() {
        let user_id = Uuid::new_v4();
        let existing = expired_token(user_id);

        let mut token_service = MockTokenService::new();
        token_service
            .expect_find_by_token()
            .returning(move |_| Ok(Some(existing.clone())));
        token_service
            .expect_update_existing_token_with_expiry()
            .times(0);

        let mut repo = MockUserRepo::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(user(id, true))));

        let use_case = use_case(repo, token_service, Arc::new(RecordingListener::new()));

        assert_eq!(
            use_case.execute("existing-token").await,
            Err(ResendEmailVerificationError::AlreadyVerified)
        );
    }

    #[tokio::test]
    async fn test_resend_user_missing() {
        let existing = expired_token(Uuid::new_v4());

        let mut token_service = MockTokenService::new();
        token_service
            .expect_find_by_token()
            .returning(move |_| Ok(Some(existing.clone())));

        let mut repo = MockUserRepo::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let use_case = use_case(repo, token_service, Arc::new(RecordingListener::new()));

        assert_eq!(
            use_case.execute("existing-token").await,
            Err(ResendEmailVerificationError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn test_resend_storage_failure() {
        let user_id = Uuid::new_v4();
        let existing = expired_token(user_id);

        let mut token_service = MockTokenService::new();
        token_service
            .expect_find_by_token()
            .returning(move |_| Ok(Some(existing.clone())));
        token_service
            .expect_update_existing_token_with_expiry()
            .returning(|_| Err(TokenServiceError::Storage("db down".to_string())));

        let mut repo = MockUserRepo::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(user(id, false))));

        let use_case = use_case(repo, token_service, Arc::new(RecordingListener::new()));

        assert!(matches!(
            use_case.execute("existing-token").await,
            Err(ResendEmailVerificationError::DatabaseError(_))
        ));
    }
}
