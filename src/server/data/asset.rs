//! Asset data repository.
//!
//! Only metadata lives here; file contents are handled by the storage backend.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{model::asset::AssetKind, server::model::asset::CreateAssetParam};

pub struct AssetRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AssetRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an asset row. The ID is supplied by the caller since it is part of the
    /// storage key written beforehand.
    pub async fn create(&self, param: CreateAssetParam) -> Result<entity::asset::Model, DbErr> {
        entity::asset::ActiveModel {
            id: ActiveValue::Set(param.id),
            work_id: ActiveValue::Set(param.work_id),
            kind: ActiveValue::Set(param.kind.as_str().to_string()),
            storage_key: ActiveValue::Set(param.storage_key),
            file_name: ActiveValue::Set(param.file_name),
            content_type: ActiveValue::Set(param.content_type),
            size: ActiveValue::Set(param.size),
            position: ActiveValue::Set(param.position),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::asset::Model>, DbErr> {
        entity::prelude::Asset::find_by_id(id).one(self.db).await
    }

    /// Gets all assets of a work in display order.
    pub async fn get_by_work(&self, work_id: Uuid) -> Result<Vec<entity::asset::Model>, DbErr> {
        entity::prelude::Asset::find()
            .filter(entity::asset::Column::WorkId.eq(work_id))
            .order_by_asc(entity::asset::Column::Position)
            .order_by_asc(entity::asset::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Position for the next asset appended to a work (0 for the first one).
    pub async fn next_position(&self, work_id: Uuid) -> Result<i32, DbErr> {
        let last = entity::prelude::Asset::find()
            .filter(entity::asset::Column::WorkId.eq(work_id))
            .order_by_desc(entity::asset::Column::Position)
            .one(self.db)
            .await?;

        Ok(last.map(|a| a.position + 1).unwrap_or(0))
    }

    /// Gets the first image asset of each work, used as listing thumbnails.
    ///
    /// Works without image assets are absent from the returned map.
    pub async fn get_thumbnails(
        &self,
        work_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, entity::asset::Model>, DbErr> {
        if work_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let images = entity::prelude::Asset::find()
            .filter(entity::asset::Column::WorkId.is_in(work_ids.to_vec()))
            .filter(entity::asset::Column::Kind.eq(AssetKind::Image.as_str()))
            .order_by_asc(entity::asset::Column::Position)
            .all(self.db)
            .await?;

        let mut thumbnails = HashMap::new();
        for image in images {
            thumbnails.entry(image.work_id).or_insert(image);
        }

        Ok(thumbnails)
    }

    /// Deletes an asset row.
    ///
    /// # Returns
    /// - `Ok(true)` - Row was deleted
    /// - `Ok(false)` - Asset did not exist
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Asset::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
