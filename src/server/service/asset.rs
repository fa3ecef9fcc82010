//! Asset service for business logic.
//!
//! Uploads are written to storage first and recorded in the database second. If the
//! insert fails the stored file is removed again.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::asset::AssetRepository,
    error::AppError,
    model::{
        asset::{classify_upload, storage_key, Asset, CreateAssetParam},
        user::User,
    },
    service::work::{find_manageable_work, find_visible_work},
    storage::FileStorage,
};

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    /// Content type declared by the client, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub struct AssetService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn FileStorage,
}

impl<'a> AssetService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn FileStorage) -> Self {
        Self { db, storage }
    }

    /// Attaches a file to a work.
    ///
    /// # Returns
    /// - `Ok(Asset)` - File stored and asset recorded at the next position
    /// - `Err(AppError::BadRequest)` - Empty or unsupported file
    /// - `Err(AppError::NotFound)` - Work missing or hidden
    /// - `Err(AppError::AuthErr(AccessDenied))` - User is neither owner nor admin
    /// - `Err(AppError::StorageErr)` - Writing the file failed
    pub async fn upload(
        &self,
        work_id: Uuid,
        user: &User,
        file: UploadedFile,
    ) -> Result<Asset, AppError> {
        find_manageable_work(self.db, work_id, user).await?;

        if file.bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        let class = classify_upload(file.content_type.as_deref(), &file.file_name)?;

        let asset_id = Uuid::new_v4();
        let key = storage_key(work_id, asset_id, &class.extension);
        self.storage.put(&key, &file.bytes).await?;

        let asset_repo = AssetRepository::new(self.db);
        let inserted = async {
            let position = asset_repo.next_position(work_id).await?;
            asset_repo
                .create(CreateAssetParam {
                    id: asset_id,
                    work_id,
                    kind: class.kind,
                    storage_key: key.clone(),
                    file_name: file.file_name.clone(),
                    content_type: class.content_type.clone(),
                    size: file.bytes.len() as i64,
                    position,
                })
                .await
        }
        .await;

        let entity = match inserted {
            Ok(entity) => entity,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&key).await {
                    tracing::warn!("Failed to remove orphaned file {}: {}", key, cleanup);
                }
                return Err(e.into());
            }
        };

        tracing::debug!(
            "Stored {} asset {} ({} bytes) for work {}",
            class.kind,
            asset_id,
            file.bytes.len(),
            work_id
        );

        Asset::from_entity(entity, self.storage)
    }

    /// Lists the assets of a work visible to the viewer, in display order.
    pub async fn list(&self, work_id: Uuid, viewer: Option<&User>) -> Result<Vec<Asset>, AppError> {
        find_visible_work(self.db, work_id, viewer).await?;

        AssetRepository::new(self.db)
            .get_by_work(work_id)
            .await?
            .into_iter()
            .map(|a| Asset::from_entity(a, self.storage))
            .collect()
    }

    /// Removes an asset's file and row.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Work missing, or the asset does not belong to it
    pub async fn delete(&self, work_id: Uuid, asset_id: Uuid, user: &User) -> Result<(), AppError> {
        find_manageable_work(self.db, work_id, user).await?;

        let asset_repo = AssetRepository::new(self.db);
        let asset = asset_repo
            .find_by_id(asset_id)
            .await?
            .filter(|a| a.work_id == work_id)
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;

        self.storage.delete(&asset.storage_key).await?;
        asset_repo.delete(asset.id).await?;

        Ok(())
    }
}
