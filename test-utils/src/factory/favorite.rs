//! Favorite factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Creates a favorite of `work_id` by `user_id` timestamped now.
pub async fn create_favorite(
    db: &DatabaseConnection,
    user_id: Uuid,
    work_id: Uuid,
) -> Result<entity::favorite::Model, DbErr> {
    create_favorite_at(db, user_id, work_id, Utc::now()).await
}

/// Creates a favorite with an explicit timestamp.
pub async fn create_favorite_at(
    db: &DatabaseConnection,
    user_id: Uuid,
    work_id: Uuid,
    created_at: DateTime<Utc>,
) -> Result<entity::favorite::Model, DbErr> {
    entity::favorite::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        work_id: ActiveValue::Set(work_id),
        created_at: ActiveValue::Set(created_at),
    }
    .insert(db)
    .await
}
