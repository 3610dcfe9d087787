use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::User;
use crate::auth::application::ports::outgoing::{
    CreateUserData, UserRepository, UserRepositoryError,
};

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_user(model: UserModel) -> User {
        User {
            id: model.id,
            username: model.username,
            email: model.email,
            full_name: model.full_name,
            is_verified: model.is_verified,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }

    fn map_db_err(e: DbErr) -> UserRepositoryError {
        UserRepositoryError::DatabaseError(e.to_string())
    }

    async fn find_model(&self, user_id: Uuid) -> Result<UserModel, UserRepositoryError> {
        UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .ok_or(UserRepositoryError::UserNotFound)
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: CreateUserData) -> Result<User, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            full_name: Set(user.full_name),
            is_verified: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("23505")
                || err_str.contains("duplicate key")
                || err_str.contains("unique constraint")
            {
                return UserRepositoryError::UserAlreadyExists;
            }
            Self::map_db_err(e)
        })?;

        Ok(Self::map_to_user(inserted))
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        let found = UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        Ok(found.map(Self::map_to_user))
    }

    async fn activate_user(&self, user_id: Uuid) -> Result<User, UserRepositoryError> {
        let user = self.find_model(user_id).await?;
        if user.is_verified {
            return Ok(Self::map_to_user(user));
        }

        let mut active_user: UserActiveModel = user.into();
        active_user.is_verified = Set(true);

        let activated = active_user
            .update(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        Ok(Self::map_to_user(activated))
    }
}
