pub mod email_verification_token_repository;
pub mod password_hasher;
pub mod user_repository;

pub use email_verification_token_repository::{
    EmailVerificationTokenRepository, TokenRepositoryError,
};
pub use password_hasher::{HashError, PasswordHasher};
pub use user_repository::{CreateUserData, UserRepository, UserRepositoryError};
