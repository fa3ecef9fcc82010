//! Refresh token persistence.
//!
//! Only SHA-256 hashes of refresh tokens are stored; the plain token never touches the
//! database.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};
use uuid::Uuid;

pub struct RefreshTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RefreshTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new refresh token hash for a user.
    pub async fn create(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<entity::refresh_token::Model, DbErr> {
        entity::refresh_token::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            token_hash: ActiveValue::Set(token_hash),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    /// Finds a refresh token row by hash, regardless of expiry.
    pub async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<entity::refresh_token::Model>, DbErr> {
        entity::prelude::RefreshToken::find()
            .filter(entity::refresh_token::Column::TokenHash.eq(token_hash))
            .one(self.db)
            .await
    }

    /// Deletes a refresh token row by ID.
    ///
    /// # Returns
    /// - `Ok(true)` - Row was deleted
    /// - `Ok(false)` - No row with that ID (already rotated by a concurrent request)
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::RefreshToken::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes the refresh token with the given hash, if any.
    pub async fn delete_by_hash(&self, token_hash: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::RefreshToken::delete_many()
            .filter(entity::refresh_token::Column::TokenHash.eq(token_hash))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every refresh token that expired at or before `now`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows removed
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::RefreshToken::delete_many()
            .filter(entity::refresh_token::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
