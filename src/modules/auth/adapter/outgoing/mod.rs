pub mod email_verification_token_postgres;
pub mod sea_orm_entity;
pub mod security;
pub mod user_repository_postgres;

pub use email_verification_token_postgres::EmailVerificationTokenRepositoryPostgres;
pub use security::Argon2Hasher;
pub use user_repository_postgres::UserRepositoryPostgres;
