pub mod on_regenerate_email_verification;
pub mod on_user_registration_complete;

pub use on_regenerate_email_verification::OnRegenerateEmailVerificationListener;
pub use on_user_registration_complete::OnUserRegistrationCompleteListener;
