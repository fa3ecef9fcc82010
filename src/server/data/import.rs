//! Bulk insertion of converted legacy rows.

use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel, QueryFilter, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};

use crate::server::model::import::ImportBatch;

/// Rows per INSERT statement, kept well below SQLite's bound parameter limit.
const CHUNK_SIZE: usize = 500;

pub struct ImportRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ImportRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a whole import batch in a single transaction.
    ///
    /// Missing tags are created. Either every row is written or none is.
    ///
    /// # Returns
    /// - `Ok(())` - Batch committed
    /// - `Err(DbErr)` - Any insert failed; the transaction is rolled back
    pub async fn insert_batch(&self, batch: ImportBatch) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        let users = batch
            .users
            .into_iter()
            .map(|u| u.into_active_model().reset_all())
            .collect::<Vec<_>>();
        for chunk in users.chunks(CHUNK_SIZE) {
            entity::prelude::User::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }

        let tag_names: BTreeSet<String> = batch
            .works
            .iter()
            .flat_map(|(_, tags)| tags.iter().cloned())
            .collect();
        let tag_ids = Self::ensure_tags(&txn, tag_names.into_iter().collect()).await?;

        let mut works = Vec::with_capacity(batch.works.len());
        let mut work_tags = Vec::new();
        for (work, tags) in batch.works {
            for tag in tags {
                if let Some(tag_id) = tag_ids.get(&tag) {
                    work_tags.push(entity::work_tag::ActiveModel {
                        work_id: ActiveValue::Set(work.id),
                        tag_id: ActiveValue::Set(*tag_id),
                    });
                }
            }
            works.push(work.into_active_model().reset_all());
        }
        for chunk in works.chunks(CHUNK_SIZE) {
            entity::prelude::Work::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }
        for chunk in work_tags.chunks(CHUNK_SIZE) {
            entity::prelude::WorkTag::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }

        let comments = batch
            .comments
            .into_iter()
            .map(|c| c.into_active_model().reset_all())
            .collect::<Vec<_>>();
        for chunk in comments.chunks(CHUNK_SIZE) {
            entity::prelude::Comment::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }

        let favorites = batch
            .favorites
            .into_iter()
            .map(|f| f.into_active_model().reset_all())
            .collect::<Vec<_>>();
        for chunk in favorites.chunks(CHUNK_SIZE) {
            entity::prelude::Favorite::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await
    }

    async fn ensure_tags(
        txn: &DatabaseTransaction,
        names: Vec<String>,
    ) -> Result<HashMap<String, i32>, DbErr> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }

        for chunk in names.chunks(CHUNK_SIZE) {
            let models = chunk.iter().map(|name| entity::tag::ActiveModel {
                name: ActiveValue::Set(name.clone()),
                ..Default::default()
            });

            entity::prelude::Tag::insert_many(models)
                .on_conflict(
                    OnConflict::column(entity::tag::Column::Name)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(txn)
                .await?;
        }

        let mut ids = HashMap::with_capacity(names.len());
        for chunk in names.chunks(CHUNK_SIZE) {
            let tags = entity::prelude::Tag::find()
                .filter(entity::tag::Column::Name.is_in(chunk.to_vec()))
                .all(txn)
                .await?;
            ids.extend(tags.into_iter().map(|t| (t.name, t.id)));
        }

        Ok(ids)
    }
}
