pub mod email_verification_token_service;

pub use email_verification_token_service::{
    EmailVerificationTokenManager, EmailVerificationTokenService, TokenServiceError,
};
