use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::{EmailVerificationToken, TokenStatus};
use crate::auth::application::ports::outgoing::{
    EmailVerificationTokenRepository, TokenRepositoryError,
};

use super::sea_orm_entity::email_verification_tokens::{
    ActiveModel as TokenActiveModel, Column as TokenColumn, Entity as TokenEntity,
    Model as TokenModel,
};

#[derive(Clone, Debug)]
pub struct EmailVerificationTokenRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl EmailVerificationTokenRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_token(model: TokenModel) -> Result<EmailVerificationToken, TokenRepositoryError> {
        let status = TokenStatus::parse(&model.status).ok_or_else(|| {
            TokenRepositoryError::DatabaseError(format!(
                "Unknown token status '{}'",
                model.status
            ))
        })?;

        Ok(EmailVerificationToken {
            id: model.id,
            user_id: model.user_id,
            token: model.token,
            status,
            expires_at: model.expires_at.into(),
            created_at: model.created_at.into(),
        })
    }

    fn map_db_err(e: DbErr) -> TokenRepositoryError {
        TokenRepositoryError::DatabaseError(e.to_string())
    }

    async fn find_model(&self, id: Uuid) -> Result<TokenModel, TokenRepositoryError> {
        TokenEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .ok_or(TokenRepositoryError::TokenNotFound)
    }
}

#[async_trait]
impl EmailVerificationTokenRepository for EmailVerificationTokenRepositoryPostgres {
    async fn save(
        &self,
        token: EmailVerificationToken,
    ) -> Result<EmailVerificationToken, TokenRepositoryError> {
        let active_token = TokenActiveModel {
            id: Set(token.id),
            user_id: Set(token.user_id),
            token: Set(token.token),
            status: Set(token.status.as_str().to_string()),
            expires_at: Set(token.expires_at.into()),
            created_at: Set(token.created_at.into()),
        };

        let inserted = active_token.insert(&*self.db).await.map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("23505") || err_str.contains("duplicate key") {
                return TokenRepositoryError::DuplicateToken;
            }
            Self::map_db_err(e)
        })?;

        Self::map_to_token(inserted)
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<EmailVerificationToken>, TokenRepositoryError> {
        let found = TokenEntity::find()
            .filter(TokenColumn::Token.eq(token))
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        found.map(Self::map_to_token).transpose()
    }

    async fn update_expiry(
        &self,
        id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<EmailVerificationToken, TokenRepositoryError> {
        let mut active_token: TokenActiveModel = self.find_model(id).await?.into();
        active_token.expires_at = Set(expires_at.into());

        let updated = active_token
            .update(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        Self::map_to_token(updated)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TokenStatus,
    ) -> Result<EmailVerificationToken, TokenRepositoryError> {
        let mut active_token: TokenActiveModel = self.find_model(id).await?.into();
        active_token.status = Set(status.as_str().to_string());

        let updated = active_token
            .update(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        Self::map_to_token(updated)
    }
}
