use async_trait::async_trait;
use email_address::EmailAddress;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use uuid::Uuid;

use crate::auth::application::domain::RedirectUrl;
use crate::auth::application::events::{
    ApplicationEventPublisher, OnUserRegistrationCompleteEvent,
};
use crate::auth::application::ports::outgoing::{
    CreateUserData, PasswordHasher, UserRepository, UserRepositoryError,
};

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,30}$").expect("username pattern is valid"));

const MIN_PASSWORD_LEN: usize = 8;
const MAX_FULL_NAME_LEN: usize = 100;

#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserOutput {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterUserError {
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid full name: {0}")]
    InvalidFullName(String),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IRegisterUserUseCase: Send + Sync {
    async fn execute(
        &self,
        input: RegisterUserInput,
    ) -> Result<RegisterUserOutput, RegisterUserError>;
}

/// Stores a new unverified user and announces it with
/// [`OnUserRegistrationCompleteEvent`]. Returns before the verification mail
/// goes out.
pub struct RegisterUserUseCase<R>
where
    R: UserRepository,
{
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    publisher: ApplicationEventPublisher<OnUserRegistrationCompleteEvent>,
    confirmation_url: RedirectUrl,
}

impl<R> RegisterUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
        publisher: ApplicationEventPublisher<OnUserRegistrationCompleteEvent>,
        confirmation_url: RedirectUrl,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            publisher,
            confirmation_url,
        }
    }
}

fn validate(input: RegisterUserInput) -> Result<RegisterUserInput, RegisterUserError> {
    let username = input.username.trim().to_string();
    if !USERNAME_PATTERN.is_match(&username) {
        return Err(RegisterUserError::InvalidUsername(
            "Username must be 3-30 characters of letters, digits or underscores".to_string(),
        ));
    }

    let email = input.email.trim().to_lowercase();
    if !EmailAddress::is_valid(&email) {
        return Err(RegisterUserError::InvalidEmail(
            "Invalid email format".to_string(),
        ));
    }

    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(RegisterUserError::InvalidPassword(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let full_name = input.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(RegisterUserError::InvalidFullName(
            "Full name is required".to_string(),
        ));
    }
    if full_name.chars().count() > MAX_FULL_NAME_LEN {
        return Err(RegisterUserError::InvalidFullName(format!(
            "Full name must be at most {} characters",
            MAX_FULL_NAME_LEN
        )));
    }

    Ok(RegisterUserInput {
        username,
        email,
        password: input.password,
        full_name,
    })
}

#[async_trait]
impl<R> IRegisterUserUseCase for RegisterUserUseCase<R>
where
    R: UserRepository,
{
    async fn execute(
        &self,
        input: RegisterUserInput,
    ) -> Result<RegisterUserOutput, RegisterUserError> {
        let input = validate(input)?;

        let password_hash = self
            .password_hasher
            .hash_password(&input.password)
            .await
            .map_err(|e| RegisterUserError::HashingFailed(e.to_string()))?;

        let user = self
            .repository
            .create_user(CreateUserData {
                username: input.username,
                email: input.email,
                password_hash,
                full_name: input.full_name,
            })
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => RegisterUserError::UserAlreadyExists,
                other => RegisterUserError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        let output = RegisterUserOutput {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            message: "User created successfully. Please check your email to verify your account."
                .to_string(),
        };

        // Fire-and-forget: the mail is sent by the listeners on their own tasks.
        self.publisher.publish(OnUserRegistrationCompleteEvent::new(
            user,
            self.confirmation_url.clone(),
        ));

        Ok(output)
    }
}
