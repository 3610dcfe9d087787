use crate::auth::application::use_cases::{
    ConfirmEmailError, IConfirmEmailUseCase, IRegisterUserUseCase,
    IResendEmailVerificationUseCase, RegisterUserError, ResendEmailVerificationError,
};
use crate::tests::support::stubs::*;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

/// Builds an [`AppState`] where every use case is a stub. Tests replace only
/// the one their route calls.
pub struct TestAppStateBuilder {
    register_user: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    confirm_email: Arc<dyn IConfirmEmailUseCase + Send + Sync>,
    resend_email_verification: Arc<dyn IResendEmailVerificationUseCase + Send + Sync>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            register_user: Arc::new(StubRegisterUserUseCase::failing(
                RegisterUserError::RepositoryError("not used in this test".to_string()),
            )),
            confirm_email: Arc::new(StubConfirmEmailUseCase::failing(
                ConfirmEmailError::DatabaseError("not used in this test".to_string()),
            )),
            resend_email_verification: Arc::new(StubResendEmailVerificationUseCase::failing(
                ResendEmailVerificationError::DatabaseError("not used in this test".to_string()),
            )),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_register_user(
        mut self,
        uc: impl IRegisterUserUseCase + Send + Sync + 'static,
    ) -> Self {
        self.register_user = Arc::new(uc);
        self
    }

    pub fn with_confirm_email(
        mut self,
        uc: impl IConfirmEmailUseCase + Send + Sync + 'static,
    ) -> Self {
        self.confirm_email = Arc::new(uc);
        self
    }

    pub fn with_resend_email_verification(
        mut self,
        uc: impl IResendEmailVerificationUseCase + Send + Sync + 'static,
    ) -> Self {
        self.resend_email_verification = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            register_user_use_case: self.register_user,
            confirm_email_use_case: self.confirm_email,
            resend_email_verification_use_case: self.resend_email_verification,
        })
    }
}
