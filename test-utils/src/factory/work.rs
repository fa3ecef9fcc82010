//! Work factory for creating test work entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test works owned by a given user.
pub struct WorkFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: Uuid,
    title: String,
    description: String,
    visibility: String,
    created_at: DateTime<Utc>,
}

impl<'a> WorkFactory<'a> {
    /// Creates a new WorkFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Work {id}"`
    /// - description: empty
    /// - visibility: `"public"`
    /// - created_at: now
    pub fn new(db: &'a DatabaseConnection, user_id: Uuid) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            title: format!("Work {}", id),
            description: String::new(),
            visibility: "public".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets visibility (`public`, `unlisted` or `private`).
    pub fn visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = visibility.into();
        self
    }

    /// Sets the creation timestamp, useful for ordering tests.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the work entity into the database.
    pub async fn build(self) -> Result<entity::work::Model, DbErr> {
        entity::work::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(self.user_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            visibility: ActiveValue::Set(self.visibility),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a public work with default values for the given owner.
pub async fn create_work(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<entity::work::Model, DbErr> {
    WorkFactory::new(db, user_id).build().await
}
