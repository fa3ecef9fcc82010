//! Tag data repository.
//!
//! Tag names reaching this layer are already normalized.

use sea_orm::{
    sea_query::{LikeExpr, OnConflict},
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionSession, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::model::work::Visibility;

/// Escape character used in `LIKE` patterns.
const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching names that start with `prefix` literally.
fn prefix_pattern(prefix: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');

    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}

pub struct TagRepository<'a, C> {
    db: &'a C,
}

impl<'a, C> TagRepository<'a, C>
where
    C: ConnectionTrait + TransactionTrait,
{
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::tag::Model>, DbErr> {
        entity::prelude::Tag::find()
            .filter(entity::tag::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Returns the tags with the given names, creating the ones that don't exist yet.
    ///
    /// # Returns
    /// - `Ok(Vec<Model>)` - One tag per distinct name, ordered by name
    /// - `Err(DbErr)` - Database error during insert or query
    pub async fn get_or_create_many(
        &self,
        names: &[String],
    ) -> Result<Vec<entity::tag::Model>, DbErr> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let models = names.iter().map(|name| entity::tag::ActiveModel {
            name: ActiveValue::Set(name.clone()),
            ..Default::default()
        });

        entity::prelude::Tag::insert_many(models)
            .on_conflict(
                OnConflict::column(entity::tag::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        entity::prelude::Tag::find()
            .filter(entity::tag::Column::Name.is_in(names.to_vec()))
            .order_by_asc(entity::tag::Column::Name)
            .all(self.db)
            .await
    }

    /// Replaces all taggings of a work with the given tag IDs.
    ///
    /// Runs in its own transaction (a savepoint when `C` already is one), so a failed
    /// insert leaves the previous taggings in place.
    pub async fn set_for_work(&self, work_id: Uuid, tag_ids: &[i32]) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::WorkTag::delete_many()
            .filter(entity::work_tag::Column::WorkId.eq(work_id))
            .exec(&txn)
            .await?;

        if !tag_ids.is_empty() {
            let models = tag_ids.iter().map(|tag_id| entity::work_tag::ActiveModel {
                work_id: ActiveValue::Set(work_id),
                tag_id: ActiveValue::Set(*tag_id),
            });

            entity::prelude::WorkTag::insert_many(models)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await
    }

    /// Gets tag names of a single work ordered by name.
    pub async fn get_names_for_work(&self, work_id: Uuid) -> Result<Vec<String>, DbErr> {
        let mut names = self.get_names_for_works(&[work_id]).await?;

        Ok(names.remove(&work_id).unwrap_or_default())
    }

    /// Gets tag names for several works at once, each list ordered by name.
    ///
    /// Works without tags are absent from the returned map.
    pub async fn get_names_for_works(
        &self,
        work_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<String>>, DbErr> {
        if work_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = entity::prelude::WorkTag::find()
            .find_also_related(entity::prelude::Tag)
            .filter(entity::work_tag::Column::WorkId.is_in(work_ids.to_vec()))
            .order_by_asc(entity::tag::Column::Name)
            .all(self.db)
            .await?;

        let mut names: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (work_tag, tag) in rows {
            if let Some(tag) = tag {
                names.entry(work_tag.work_id).or_default().push(tag.name);
            }
        }

        Ok(names)
    }

    /// Gets tags ordered by name, optionally restricted to a name prefix.
    ///
    /// `%` and `_` in the prefix match literally.
    ///
    /// # Returns
    /// - `Ok((tags, total))` - Tags for the page and total matching count
    pub async fn get_paginated(
        &self,
        prefix: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::tag::Model>, u64), DbErr> {
        let mut query = entity::prelude::Tag::find();

        if let Some(prefix) = prefix {
            query = query.filter(entity::tag::Column::Name.like(prefix_pattern(prefix)));
        }

        let paginator = query
            .order_by_asc(entity::tag::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let tags = paginator.fetch_page(page).await?;

        Ok((tags, total))
    }

    /// Counts public works per tag.
    ///
    /// Tags without public works are absent from the returned map.
    pub async fn count_public_works(
        &self,
        tag_ids: &[i32],
    ) -> Result<HashMap<i32, u64>, DbErr> {
        if tag_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let counts: Vec<(i32, i64)> = entity::prelude::WorkTag::find()
            .select_only()
            .column(entity::work_tag::Column::TagId)
            .column_as(entity::work_tag::Column::WorkId.count(), "work_count")
            .join(JoinType::InnerJoin, entity::work_tag::Relation::Work.def())
            .filter(entity::work::Column::Visibility.eq(Visibility::Public.as_str()))
            .filter(entity::work_tag::Column::TagId.is_in(tag_ids.to_vec()))
            .group_by(entity::work_tag::Column::TagId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(counts
            .into_iter()
            .map(|(tag_id, count)| (tag_id, count.max(0) as u64))
            .collect())
    }
}
