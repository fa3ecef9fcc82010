//! Comment factory for creating test comment entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

pub struct CommentFactory<'a> {
    db: &'a DatabaseConnection,
    work_id: Uuid,
    user_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
}

impl<'a> CommentFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, work_id: Uuid, user_id: Uuid) -> Self {
        Self {
            db,
            work_id,
            user_id,
            body: format!("Comment {}", next_id()),
            created_at: Utc::now(),
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::comment::Model, DbErr> {
        entity::comment::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            work_id: ActiveValue::Set(self.work_id),
            user_id: ActiveValue::Set(self.user_id),
            body: ActiveValue::Set(self.body),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a comment with a default body.
pub async fn create_comment(
    db: &DatabaseConnection,
    work_id: Uuid,
    user_id: Uuid,
) -> Result<entity::comment::Model, DbErr> {
    CommentFactory::new(db, work_id, user_id).build().await
}
