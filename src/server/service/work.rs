//! Work service for business logic.
//!
//! Enforces visibility and ownership rules for works and assembles the detail and
//! summary views from the individual repositories.

use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    model::work::{CreateWorkDto, UpdateWorkDto},
    server::{
        data::{
            asset::AssetRepository, comment::CommentRepository, favorite::FavoriteRepository,
            tag::TagRepository, user::UserRepository, work::WorkRepository,
        },
        error::{auth::AuthError, AppError},
        model::{
            asset::Asset,
            tag::{normalize_tag, normalize_tags},
            user::User,
            work::{
                validate_description, validate_title, CreateWorkParam, PaginatedWorks,
                UpdateWorkParam, Work, WorkDetail, WorkSummary,
            },
            PageParam,
        },
        service::tag::replace_work_tags,
        storage::FileStorage,
    },
};

/// Loads a work the viewer is allowed to see.
///
/// Private works the viewer may not see are reported as missing so their existence is
/// not revealed.
///
/// # Returns
/// - `Ok(Work)` - Work exists and is visible
/// - `Err(AppError::NotFound)` - Work missing or hidden from the viewer
pub async fn find_visible_work(
    db: &DatabaseConnection,
    id: Uuid,
    viewer: Option<&User>,
) -> Result<Work, AppError> {
    let work = WorkRepository::new(db)
        .find_by_id(id)
        .await?
        .map(Work::from_entity)
        .transpose()?
        .filter(|work| work.is_visible_to(viewer))
        .ok_or_else(|| AppError::NotFound("Work not found".to_string()))?;

    Ok(work)
}

/// Loads a work the user may modify.
///
/// # Returns
/// - `Ok(Work)` - User owns the work or is an admin
/// - `Err(AppError::NotFound)` - Work missing or hidden from the user
/// - `Err(AppError::AuthErr(AccessDenied))` - Work visible but owned by someone else
pub async fn find_manageable_work(
    db: &DatabaseConnection,
    id: Uuid,
    user: &User,
) -> Result<Work, AppError> {
    let work = find_visible_work(db, id, Some(user)).await?;

    if !work.can_manage(user) {
        return Err(AuthError::AccessDenied(
            user.id,
            format!("User is not allowed to modify work {}", id),
        )
        .into());
    }

    Ok(work)
}

pub struct WorkService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn FileStorage,
}

impl<'a> WorkService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a dyn FileStorage) -> Self {
        Self { db, storage }
    }

    /// Lists public works newest first, optionally filtered by tag.
    ///
    /// An unknown tag yields an empty page rather than an error.
    pub async fn list_public(
        &self,
        tag: Option<&str>,
        page: PageParam,
    ) -> Result<PaginatedWorks, AppError> {
        let tag_id = match tag.map(str::trim).filter(|t| !t.is_empty()) {
            Some(tag) => {
                let name = normalize_tag(tag)?;
                match TagRepository::new(self.db).find_by_name(&name).await? {
                    Some(tag) => Some(tag.id),
                    None => return Ok(Self::empty_page(page)),
                }
            }
            None => None,
        };

        let (works, total) = WorkRepository::new(self.db)
            .get_public_paginated(tag_id, page.page, page.per_page)
            .await?;

        self.paginate(works, total, page).await
    }

    /// Lists a user's works visible to the viewer.
    ///
    /// The owner and admins see every work; everyone else only public ones.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        viewer: Option<&User>,
        page: PageParam,
    ) -> Result<PaginatedWorks, AppError> {
        self.ensure_user_exists(user_id).await?;

        let public_only = !viewer.is_some_and(|v| v.admin || v.id == user_id);
        let (works, total) = WorkRepository::new(self.db)
            .get_by_user_paginated(user_id, public_only, page.page, page.per_page)
            .await?;

        self.paginate(works, total, page).await
    }

    /// Lists works a user favorited, newest favorite first.
    ///
    /// Non-admin viewers see public works plus their own.
    pub async fn list_favorites(
        &self,
        user_id: Uuid,
        viewer: Option<&User>,
        page: PageParam,
    ) -> Result<PaginatedWorks, AppError> {
        self.ensure_user_exists(user_id).await?;

        let include_all = viewer.is_some_and(|v| v.admin);
        let (works, total) = WorkRepository::new(self.db)
            .get_favorited_by_user_paginated(
                user_id,
                viewer.map(|v| v.id),
                include_all,
                page.page,
                page.per_page,
            )
            .await?;

        self.paginate(works, total, page).await
    }

    /// Gets the full view of a work.
    ///
    /// # Returns
    /// - `Ok(WorkDetail)` - Work visible to the viewer
    /// - `Err(AppError::NotFound)` - Work missing or hidden from the viewer
    pub async fn get(&self, id: Uuid, viewer: Option<&User>) -> Result<WorkDetail, AppError> {
        let work = find_visible_work(self.db, id, viewer).await?;

        self.detail(work, viewer).await
    }

    /// Creates a work with its tags in one transaction.
    ///
    /// # Returns
    /// - `Ok(WorkDetail)` - Created work
    /// - `Err(AppError::BadRequest)` - Invalid title, description or tags
    pub async fn create(&self, user: &User, dto: CreateWorkDto) -> Result<WorkDetail, AppError> {
        let title = validate_title(&dto.title)?;
        let description = validate_description(&dto.description)?;
        let tags = normalize_tags(&dto.tags)?;

        let txn = self.db.begin().await?;
        let entity = WorkRepository::new(&txn)
            .create(CreateWorkParam {
                user_id: user.id,
                title,
                description,
                visibility: dto.visibility,
            })
            .await?;
        replace_work_tags(&txn, entity.id, &tags).await?;
        txn.commit().await?;

        tracing::debug!("User {} created work {}", user.id, entity.id);

        self.detail(Work::from_entity(entity)?, Some(user)).await
    }

    /// Replaces title, description, visibility and tags of a work.
    ///
    /// # Returns
    /// - `Ok(WorkDetail)` - Updated work
    /// - `Err(AppError::BadRequest)` - Invalid input
    /// - `Err(AppError::NotFound)` - Work missing or hidden
    /// - `Err(AppError::AuthErr(AccessDenied))` - User is neither owner nor admin
    pub async fn update(
        &self,
        id: Uuid,
        user: &User,
        dto: UpdateWorkDto,
    ) -> Result<WorkDetail, AppError> {
        let title = validate_title(&dto.title)?;
        let description = validate_description(&dto.description)?;
        let tags = normalize_tags(&dto.tags)?;

        find_manageable_work(self.db, id, user).await?;

        let txn = self.db.begin().await?;
        let entity = WorkRepository::new(&txn)
            .update(UpdateWorkParam {
                id,
                title,
                description,
                visibility: dto.visibility,
            })
            .await?
            .ok_or_else(|| AppError::NotFound("Work not found".to_string()))?;
        replace_work_tags(&txn, id, &tags).await?;
        txn.commit().await?;

        self.detail(Work::from_entity(entity)?, Some(user)).await
    }

    /// Deletes a work after removing its stored files.
    ///
    /// Asset rows, taggings, comments and favorites are removed by cascade.
    pub async fn delete(&self, id: Uuid, user: &User) -> Result<(), AppError> {
        find_manageable_work(self.db, id, user).await?;

        let assets = AssetRepository::new(self.db).get_by_work(id).await?;
        for asset in &assets {
            self.storage.delete(&asset.storage_key).await?;
        }

        WorkRepository::new(self.db).delete(id).await?;

        tracing::info!(
            "User {} deleted work {} with {} assets",
            user.id,
            id,
            assets.len()
        );

        Ok(())
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> Result<(), AppError> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(())
    }

    async fn detail(&self, work: Work, viewer: Option<&User>) -> Result<WorkDetail, AppError> {
        let work_ids = [work.id];

        let owner = UserRepository::new(self.db)
            .find_by_id(work.user_id)
            .await?
            .ok_or_else(|| AppError::InternalError(format!("Owner of work {} missing", work.id)))?;
        let tags = TagRepository::new(self.db)
            .get_names_for_work(work.id)
            .await?;
        let assets = AssetRepository::new(self.db)
            .get_by_work(work.id)
            .await?
            .into_iter()
            .map(|a| Asset::from_entity(a, self.storage))
            .collect::<Result<Vec<_>, _>>()?;

        let favorite_repo = FavoriteRepository::new(self.db);
        let favorite_count = favorite_repo
            .count_by_works(&work_ids)
            .await?
            .remove(&work.id)
            .unwrap_or(0);
        let favorited = match viewer {
            Some(viewer) => favorite_repo.is_favorited(viewer.id, work.id).await?,
            None => false,
        };
        let comment_count = CommentRepository::new(self.db)
            .count_by_works(&work_ids)
            .await?
            .remove(&work.id)
            .unwrap_or(0);

        Ok(WorkDetail {
            work,
            owner: User::from_entity(owner)?,
            tags,
            assets,
            favorite_count,
            comment_count,
            favorited,
        })
    }

    /// Builds listing entries for a page of works, batching every lookup.
    async fn paginate(
        &self,
        works: Vec<entity::work::Model>,
        total: u64,
        page: PageParam,
    ) -> Result<PaginatedWorks, AppError> {
        let work_ids: Vec<Uuid> = works.iter().map(|w| w.id).collect();
        let mut owner_ids: Vec<Uuid> = works.iter().map(|w| w.user_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let owners = UserRepository::new(self.db)
            .find_many(&owner_ids)
            .await?
            .into_iter()
            .map(|(id, user)| Ok((id, User::from_entity(user)?)))
            .collect::<Result<HashMap<_, _>, AppError>>()?;
        let mut tags = TagRepository::new(self.db)
            .get_names_for_works(&work_ids)
            .await?;
        let mut thumbnails = AssetRepository::new(self.db)
            .get_thumbnails(&work_ids)
            .await?;
        let favorite_counts = FavoriteRepository::new(self.db)
            .count_by_works(&work_ids)
            .await?;

        let mut summaries = Vec::with_capacity(works.len());
        for entity in works {
            let work = Work::from_entity(entity)?;
            let owner = owners.get(&work.user_id).cloned().ok_or_else(|| {
                AppError::InternalError(format!("Owner of work {} missing", work.id))
            })?;
            let thumbnail = thumbnails
                .remove(&work.id)
                .map(|a| Asset::from_entity(a, self.storage))
                .transpose()?;

            summaries.push(WorkSummary {
                tags: tags.remove(&work.id).unwrap_or_default(),
                favorite_count: favorite_counts.get(&work.id).copied().unwrap_or(0),
                thumbnail,
                owner,
                work,
            });
        }

        Ok(PaginatedWorks {
            works: summaries,
            total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(total),
        })
    }

    fn empty_page(page: PageParam) -> PaginatedWorks {
        PaginatedWorks {
            works: Vec::new(),
            total: 0,
            page: page.page,
            per_page: page.per_page,
            total_pages: 0,
        }
    }
}
