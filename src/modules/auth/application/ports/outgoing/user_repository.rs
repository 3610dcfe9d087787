use crate::auth::application::domain::User;
use async_trait::async_trait;
use uuid::Uuid;

/// Input for persisting a freshly registered (unverified) user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserData {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: CreateUserData) -> Result<User, UserRepositoryError>;
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserRepositoryError>;
    /// Marks the user's email as verified.
    async fn activate_user(&self, user_id: Uuid) -> Result<User, UserRepositoryError>;
}
