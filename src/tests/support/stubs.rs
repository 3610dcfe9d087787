use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::auth::application::events::ApplicationListener;
use crate::auth::application::use_cases::{
    ConfirmEmailError, IConfirmEmailUseCase, IRegisterUserUseCase,
    IResendEmailVerificationUseCase, RegisterUserError, RegisterUserInput, RegisterUserOutput,
    ResendEmailVerificationError, ResendEmailVerificationOutput,
};
use crate::email::application::errors::MailSendError;

// ============================================================================
// Event listeners
// ============================================================================

/// Keeps every event it receives. Publishing happens on spawned tasks, so
/// tests wait with [`RecordingListener::wait_for_event`] instead of reading
/// right after `publish`.
pub struct RecordingListener<E> {
    events: Mutex<Vec<E>>,
    notify: Notify,
}

impl<E> RecordingListener<E>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            notify: Notify::new(),
        }
    }

    pub fn events(&self) -> Vec<E> {
        self.events.lock().unwrap().clone()
    }

    /// First recorded event, waiting up to `timeout` for it to arrive.
    pub async fn wait_for_event(&self, timeout: Duration) -> Option<E> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let notified = self.notify.notified();
            if let Some(event) = self.events.lock().unwrap().first().cloned() {
                return Some(event);
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return self.events.lock().unwrap().first().cloned();
            }
        }
    }
}

#[async_trait]
impl<E> ApplicationListener<E> for RecordingListener<E>
where
    E: Clone + Send + Sync + 'static,
{
    async fn on_application_event(&self, event: &E) -> Result<(), MailSendError> {
        self.events.lock().unwrap().push(event.clone());
        self.notify.notify_waiters();
        Ok(())
    }
}

// ============================================================================
// Use cases
// ============================================================================

#[derive(Clone)]
pub struct StubRegisterUserUseCase {
    result: Result<(), RegisterUserError>,
}

impl StubRegisterUserUseCase {
    pub fn success() -> Self {
        Self { result: Ok(()) }
    }

    pub fn failing(err: RegisterUserError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl IRegisterUserUseCase for StubRegisterUserUseCase {
    async fn execute(
        &self,
        input: RegisterUserInput,
    ) -> Result<RegisterUserOutput, RegisterUserError> {
        self.result.clone().map(|()| RegisterUserOutput {
            user_id: Uuid::new_v4(),
            username: input.username,
            email: input.email,
            full_name: input.full_name,
            message: "User created successfully. Please check your email to verify your account."
                .to_string(),
        })
    }
}

#[derive(Clone)]
pub struct StubConfirmEmailUseCase {
    result: Result<(), ConfirmEmailError>,
    received: Arc<Mutex<Vec<String>>>,
}

impl StubConfirmEmailUseCase {
    pub fn succeeding() -> Self {
        Self {
            result: Ok(()),
            received: Arc::default(),
        }
    }

    pub fn failing(err: ConfirmEmailError) -> Self {
        Self {
            result: Err(err),
            received: Arc::default(),
        }
    }

    pub fn received_tokens(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl IConfirmEmailUseCase for StubConfirmEmailUseCase {
    async fn execute(&self, token: &str) -> Result<(), ConfirmEmailError> {
        self.received.lock().unwrap().push(token.to_string());
        self.result.clone()
    }
}

#[derive(Clone)]
pub struct StubResendEmailVerificationUseCase {
    result: Result<ResendEmailVerificationOutput, ResendEmailVerificationError>,
}

impl StubResendEmailVerificationUseCase {
    pub fn success(email: &str) -> Self {
        Self {
            result: Ok(ResendEmailVerificationOutput {
                email: email.to_string(),
                message: "A new verification email has been sent. Please check your inbox."
                    .to_string(),
            }),
        }
    }

    pub fn failing(err: ResendEmailVerificationError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl IResendEmailVerificationUseCase for StubResendEmailVerificationUseCase {
    async fn execute(
        &self,
        _existing_token: &str,
    ) -> Result<ResendEmailVerificationOutput, ResendEmailVerificationError> {
        self.result.clone()
    }
}
