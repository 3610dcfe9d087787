pub mod template;
pub mod verification_mailer;

pub use template::VerificationTemplate;
pub use verification_mailer::VerificationMailer;
