//! Tag factory and tagging helper.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Creates a tag with the given (already normalized) name.
pub async fn create_tag(
    db: &DatabaseConnection,
    name: impl Into<String>,
) -> Result<entity::tag::Model, DbErr> {
    entity::tag::ActiveModel {
        name: ActiveValue::Set(name.into()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Associates an existing tag with a work.
pub async fn tag_work(
    db: &DatabaseConnection,
    work_id: Uuid,
    tag_id: i32,
) -> Result<entity::work_tag::Model, DbErr> {
    entity::work_tag::ActiveModel {
        work_id: ActiveValue::Set(work_id),
        tag_id: ActiveValue::Set(tag_id),
    }
    .insert(db)
    .await
}
