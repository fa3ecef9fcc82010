//! Refresh token factory.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::factory::helpers::next_id;

/// Inserts a refresh token row with the given hash and expiry.
pub async fn create_refresh_token_with(
    db: &DatabaseConnection,
    user_id: Uuid,
    token_hash: impl Into<String>,
    expires_at: DateTime<Utc>,
) -> Result<entity::refresh_token::Model, DbErr> {
    entity::refresh_token::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        user_id: ActiveValue::Set(user_id),
        token_hash: ActiveValue::Set(token_hash.into()),
        expires_at: ActiveValue::Set(expires_at),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Inserts a refresh token row with a unique hash valid for one day.
pub async fn create_refresh_token(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<entity::refresh_token::Model, DbErr> {
    create_refresh_token_with(
        db,
        user_id,
        format!("hash_{}", next_id()),
        Utc::now() + Duration::days(1),
    )
    .await
}
