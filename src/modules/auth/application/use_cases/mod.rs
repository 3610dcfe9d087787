pub mod confirm_email;
pub mod register_user;
pub mod resend_email_verification;

pub use confirm_email::{ConfirmEmailError, ConfirmEmailUseCase, IConfirmEmailUseCase};
pub use register_user::{
    IRegisterUserUseCase, RegisterUserError, RegisterUserInput, RegisterUserOutput,
    RegisterUserUseCase,
};
pub use resend_email_verification::{
    IResendEmailVerificationUseCase, ResendEmailVerificationError, ResendEmailVerificationOutput,
    ResendEmailVerificationUseCase,
};
