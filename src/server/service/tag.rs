//! Tag service for business logic.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{tag::TagRepository, work::WorkRepository},
    error::AppError,
    model::{
        tag::{normalize_tag, normalize_tags, PaginatedTags, TagWithCount},
        user::User,
        PageParam,
    },
    service::work::find_manageable_work,
};

/// Replaces the tags of a work with already normalized names, creating missing tags.
///
/// # Returns
/// - `Ok(Vec<String>)` - Tag names now on the work, ordered by name
pub async fn replace_work_tags<C>(
    db: &C,
    work_id: Uuid,
    names: &[String],
) -> Result<Vec<String>, AppError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let tag_repo = TagRepository::new(db);

    let tags = tag_repo.get_or_create_many(names).await?;
    let tag_ids: Vec<i32> = tags.iter().map(|t| t.id).collect();
    tag_repo.set_for_work(work_id, &tag_ids).await?;

    Ok(tags.into_iter().map(|t| t.name).collect())
}

pub struct TagService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TagService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists tags ordered by name with their public work counts.
    ///
    /// # Arguments
    /// - `query` - Optional name prefix; normalized and validated the same way tag names are
    /// - `page` - Page to return
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Prefix contains characters no tag can have
    pub async fn list(
        &self,
        query: Option<&str>,
        page: PageParam,
    ) -> Result<PaginatedTags, AppError> {
        let prefix = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(normalize_tag)
            .transpose()?;

        let tag_repo = TagRepository::new(self.db);
        let (tags, total) = tag_repo
            .get_paginated(prefix.as_deref(), page.page, page.per_page)
            .await?;

        let tag_ids: Vec<i32> = tags.iter().map(|t| t.id).collect();
        let counts = tag_repo.count_public_works(&tag_ids).await?;

        let tags = tags
            .into_iter()
            .map(|tag| TagWithCount {
                work_count: counts.get(&tag.id).copied().unwrap_or(0),
                name: tag.name,
            })
            .collect();

        Ok(PaginatedTags {
            tags,
            total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(total),
        })
    }

    /// Replaces the tags of a work.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Tag names now on the work, ordered by name
    /// - `Err(AppError::BadRequest)` - Invalid tag or more than 10 tags
    /// - `Err(AppError::NotFound)` - Work missing or hidden
    /// - `Err(AppError::AuthErr(AccessDenied))` - User is neither owner nor admin
    pub async fn set_for_work(
        &self,
        work_id: Uuid,
        user: &User,
        raw: &[String],
    ) -> Result<Vec<String>, AppError> {
        let names = normalize_tags(raw)?;

        find_manageable_work(self.db, work_id, user).await?;

        let txn = self.db.begin().await?;
        let names = replace_work_tags(&txn, work_id, &names).await?;
        WorkRepository::new(&txn).touch(work_id).await?;
        txn.commit().await?;

        Ok(names)
    }
}
