//! Asset factory for creating test asset rows.
//!
//! Only the database row is created; nothing is written to storage.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

pub struct AssetFactory<'a> {
    db: &'a DatabaseConnection,
    work_id: Uuid,
    kind: String,
    file_name: String,
    content_type: String,
    size: i64,
    position: i32,
}

impl<'a> AssetFactory<'a> {
    /// Defaults to a 1 KiB PNG image at position 0.
    pub fn new(db: &'a DatabaseConnection, work_id: Uuid) -> Self {
        let id = next_id();
        Self {
            db,
            work_id,
            kind: "image".to_string(),
            file_name: format!("asset_{}.png", id),
            content_type: "image/png".to_string(),
            size: 1024,
            position: 0,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub async fn build(self) -> Result<entity::asset::Model, DbErr> {
        let id = Uuid::new_v4();
        entity::asset::ActiveModel {
            id: ActiveValue::Set(id),
            work_id: ActiveValue::Set(self.work_id),
            kind: ActiveValue::Set(self.kind),
            storage_key: ActiveValue::Set(format!("works/{}/{}.png", self.work_id, id)),
            file_name: ActiveValue::Set(self.file_name),
            content_type: ActiveValue::Set(self.content_type),
            size: ActiveValue::Set(self.size),
            position: ActiveValue::Set(self.position),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an image asset at the given position on a work.
pub async fn create_asset(
    db: &DatabaseConnection,
    work_id: Uuid,
    position: i32,
) -> Result<entity::asset::Model, DbErr> {
    AssetFactory::new(db, work_id).position(position).build().await
}
