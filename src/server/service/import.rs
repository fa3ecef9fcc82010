//! One-shot import of a legacy JSON export.
//!
//! Rows are converted to the current schema in memory first. Rows whose IDs don't parse,
//! or whose parent row was skipped, are dropped and counted. Everything that survives is
//! written in a single transaction.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::{
    collections::{HashMap, HashSet},
    path::Path,
};
use uuid::Uuid;

use crate::{
    model::work::Visibility,
    server::{
        data::import::ImportRepository,
        error::AppError,
        model::{
            import::{ImportBatch, ImportReport, LegacyExport},
            tag::{normalize_tag, MAX_TAGS_PER_WORK},
            work::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN},
        },
        util::parse::parse_uuid,
    },
};

/// Title given to legacy works whose title is blank.
const UNTITLED: &str = "Untitled";

pub struct LegacyImportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LegacyImportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reads an export file and imports it.
    ///
    /// # Returns
    /// - `Ok(ImportReport)` - Import committed
    /// - `Err(AppError::IoErr)` / `Err(AppError::JsonErr)` - File unreadable or malformed
    /// - `Err(AppError::DbErr)` - Insert failed; nothing was written
    pub async fn import_file(&self, path: &Path) -> Result<ImportReport, AppError> {
        let contents = tokio::fs::read_to_string(path).await?;
        let export: LegacyExport = serde_json::from_str(&contents)?;

        tracing::info!(
            "Importing {} users, {} works, {} comments and {} favorites from {}",
            export.users.len(),
            export.works.len(),
            export.comments.len(),
            export.favorites.len(),
            path.display()
        );

        self.import(export).await
    }

    /// Converts and inserts an export in one transaction.
    pub async fn import(&self, export: LegacyExport) -> Result<ImportReport, AppError> {
        let (batch, report) = plan_import(export);

        ImportRepository::new(self.db).insert_batch(batch).await?;

        Ok(report)
    }
}

/// Converts legacy rows into current-schema rows, counting what had to be skipped.
pub fn plan_import(export: LegacyExport) -> (ImportBatch, ImportReport) {
    let mut batch = ImportBatch::default();
    let mut report = ImportReport::default();

    let mut user_ids = HashSet::new();
    let mut discord_ids = HashSet::new();
    for user in export.users {
        let id = match parse_uuid(&user.id) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Skipping user: {}", e);
                report.users_skipped += 1;
                continue;
            }
        };
        let discord_id = user.discord_id.trim().to_string();
        if discord_id.parse::<u64>().is_err()
            || !discord_ids.insert(discord_id.clone())
            || !user_ids.insert(id)
        {
            tracing::warn!(
                "Skipping user {}: invalid or duplicate identifiers",
                user.id
            );
            report.users_skipped += 1;
            continue;
        }

        batch.users.push(entity::user::Model {
            id,
            discord_id,
            name: user.name,
            avatar_url: user.avatar_url,
            admin: user.admin,
            created_at: user.created_at,
            last_login_at: user.created_at,
        });
        report.users_imported += 1;
    }

    let mut work_ids = HashSet::new();
    for work in export.works {
        let ids = parse_uuid(&work.id).and_then(|id| Ok((id, parse_uuid(&work.user_id)?)));
        let (id, user_id) = match ids {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Skipping work: {}", e);
                report.works_skipped += 1;
                continue;
            }
        };
        if !user_ids.contains(&user_id) || !work_ids.insert(id) {
            tracing::warn!("Skipping work {}: owner missing or duplicate ID", work.id);
            report.works_skipped += 1;
            continue;
        }

        let mut tags: Vec<String> = Vec::new();
        for raw in work.tags.as_deref().unwrap_or_default().split(',') {
            if raw.trim().is_empty() {
                continue;
            }
            match normalize_tag(raw) {
                Ok(tag) if tags.len() < MAX_TAGS_PER_WORK => {
                    if !tags.contains(&tag) {
                        tags.push(tag);
                    }
                }
                _ => report.tags_skipped += 1,
            }
        }

        let title = truncate(work.title.trim(), MAX_TITLE_LEN);
        let visibility = if work.is_public {
            Visibility::Public
        } else {
            Visibility::Private
        };

        batch.works.push((
            entity::work::Model {
                id,
                user_id,
                title: if title.is_empty() {
                    UNTITLED.to_string()
                } else {
                    title
                },
                description: truncate(
                    work.description.as_deref().unwrap_or_default().trim(),
                    MAX_DESCRIPTION_LEN,
                ),
                visibility: visibility.as_str().to_string(),
                created_at: work.created_at,
                updated_at: work.updated_at.unwrap_or(work.created_at),
            },
            tags,
        ));
        report.works_imported += 1;
    }

    let mut comment_ids = HashSet::new();
    for comment in export.comments {
        let ids = parse_uuid(&comment.id).and_then(|id| {
            Ok((
                id,
                parse_uuid(&comment.work_id)?,
                parse_uuid(&comment.user_id)?,
            ))
        });
        let (id, work_id, user_id) = match ids {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Skipping comment: {}", e);
                report.comments_skipped += 1;
                continue;
            }
        };
        let body = comment.body.trim();
        if !work_ids.contains(&work_id)
            || !user_ids.contains(&user_id)
            || body.is_empty()
            || !comment_ids.insert(id)
        {
            report.comments_skipped += 1;
            continue;
        }

        batch.comments.push(entity::comment::Model {
            id,
            work_id,
            user_id,
            body: body.to_string(),
            created_at: comment.created_at,
            updated_at: comment.created_at,
        });
        report.comments_imported += 1;
    }

    let mut favorites: HashMap<(Uuid, Uuid), entity::favorite::Model> = HashMap::new();
    for favorite in export.favorites {
        let ids = parse_uuid(&favorite.user_id)
            .and_then(|user_id| Ok((user_id, parse_uuid(&favorite.work_id)?)));
        let (user_id, work_id) = match ids {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Skipping favorite: {}", e);
                report.favorites_skipped += 1;
                continue;
            }
        };
        if !work_ids.contains(&work_id)
            || !user_ids.contains(&user_id)
            || favorites.contains_key(&(user_id, work_id))
        {
            report.favorites_skipped += 1;
            continue;
        }

        favorites.insert(
            (user_id, work_id),
            entity::favorite::Model {
                user_id,
                work_id,
                created_at: favorite.created_at.unwrap_or_else(Utc::now),
            },
        );
        report.favorites_imported += 1;
    }
    batch.favorites = favorites.into_values().collect();

    (batch, report)
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::import::{LegacyComment, LegacyFavorite, LegacyUser, LegacyWork};
    use sea_orm::{EntityTrait, PaginatorTrait};
    use test_utils::builder::TestBuilder;

    const USER: &str = "6f1c1c9e-3b43-4d69-9a4e-6d4f2f1b0a01";
    const WORK: &str = "1b9d6bcd-bbfd-4b2d-9b5d-ab8dfbbd4bed";
    const COMMENT: &str = "a3bb189e-8bf9-3888-9912-ace4e6543002";

    fn user(id: &str, discord_id: &str) -> LegacyUser {
        LegacyUser {
            id: id.to_string(),
            discord_id: discord_id.to_string(),
            name: "Legacy".to_string(),
            avatar_url: None,
            admin: false,
            created_at: Utc::now(),
        }
    }

    fn work(id: &str, user_id: &str, tags: &str, is_public: bool) -> LegacyWork {
        LegacyWork {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: "  Old work ".to_string(),
            description: None,
            tags: Some(tags.to_string()),
            is_public,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn comment(id: &str, work_id: &str, user_id: &str) -> LegacyComment {
        LegacyComment {
            id: id.to_string(),
            work_id: work_id.to_string(),
            user_id: user_id.to_string(),
            body: "hello".to_string(),
            created_at: Utc::now(),
        }
    }

    fn favorite(user_id: &str, work_id: &str) -> LegacyFavorite {
        LegacyFavorite {
            user_id: user_id.to_string(),
            work_id: work_id.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn converts_valid_rows() {
        let export = LegacyExport {
            users: vec![user(USER, "123")],
            works: vec![work(WORK, USER, "Pixel Art, 3d,,pixel art", true)],
            comments: vec![comment(COMMENT, WORK, USER)],
            favorites: vec![favorite(USER, WORK)],
        };

        let (batch, report) = plan_import(export);

        assert_eq!(report.users_imported, 1);
        assert_eq!(report.works_imported, 1);
        assert_eq!(report.comments_imported, 1);
        assert_eq!(report.favorites_imported, 1);
        let (work, tags) = &batch.works[0];
        assert_eq!(work.title, "Old work");
        assert_eq!(work.visibility, "public");
        assert_eq!(tags, &vec!["pixel-art".to_string(), "3d".to_string()]);
    }

    #[test]
    fn non_public_works_become_private() {
        let export = LegacyExport {
            users: vec![user(USER, "123")],
            works: vec![work(WORK, USER, "", false)],
            ..Default::default()
        };

        let (batch, _) = plan_import(export);

        assert_eq!(batch.works[0].0.visibility, "private");
    }

    #[test]
    fn skips_children_of_skipped_rows() {
        let export = LegacyExport {
            users: vec![user("not-a-uuid", "123")],
            works: vec![work(WORK, "not-a-uuid", "", true)],
            comments: vec![comment(COMMENT, WORK, USER)],
            favorites: vec![favorite(USER, WORK)],
        };

        let (batch, report) = plan_import(export);

        assert!(batch.users.is_empty());
        assert!(batch.works.is_empty());
        assert_eq!(report.users_skipped, 1);
        assert_eq!(report.works_skipped, 1);
        assert_eq!(report.comments_skipped, 1);
        assert_eq!(report.favorites_skipped, 1);
    }

    #[test]
    fn skips_duplicate_discord_ids_and_invalid_tags() {
        let other = "0b6a4d34-7a3e-4f4b-8b0c-2f3f7a6c9d10";
        let export = LegacyExport {
            users: vec![user(USER, "123"), user(other, "123")],
            works: vec![work(WORK, USER, "ok,c++", true)],
            ..Default::default()
        };

        let (batch, report) = plan_import(export);

        assert_eq!(report.users_skipped, 1);
        assert_eq!(report.tags_skipped, 1);
        assert_eq!(batch.works[0].1, vec!["ok".to_string()]);
    }

    /// Expected: every converted row persisted and tags created
    #[tokio::test]
    async fn imports_into_database() -> Result<(), AppError> {
        let test = TestBuilder::new().with_work_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let export = LegacyExport {
            users: vec![user(USER, "123")],
            works: vec![work(WORK, USER, "blender,3d", true)],
            comments: vec![comment(COMMENT, WORK, USER)],
            favorites: vec![favorite(USER, WORK), favorite(USER, WORK)],
        };

        let report = LegacyImportService::new(db).import(export).await?;

        assert_eq!(report.favorites_imported, 1);
        assert_eq!(report.favorites_skipped, 1);
        assert_eq!(entity::prelude::User::find().count(db).await?, 1);
        assert_eq!(entity::prelude::Work::find().count(db).await?, 1);
        assert_eq!(entity::prelude::Tag::find().count(db).await?, 2);
        assert_eq!(entity::prelude::WorkTag::find().count(db).await?, 2);
        assert_eq!(entity::prelude::Comment::find().count(db).await?, 1);
        assert_eq!(entity::prelude::Favorite::find().count(db).await?, 1);

        Ok(())
    }

    /// Expected: reads JSON from disk with string IDs and comma separated tags
    #[tokio::test]
    async fn imports_json_file() -> Result<(), AppError> {
        let test = TestBuilder::new().with_work_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        let json = format!(
            r#"{{
                "users": [{{"id": "{USER}", "discord_id": "42", "name": "Old", "created_at": "2023-01-01T00:00:00Z"}}],
                "works": [{{"id": "{WORK}", "user_id": "{USER}", "title": "Legacy", "tags": "a,b", "is_public": true, "created_at": "2023-01-02T00:00:00Z"}}]
            }}"#
        );
        tokio::fs::write(&path, json).await?;

        let report = LegacyImportService::new(db).import_file(&path).await?;

        assert_eq!(report.users_imported, 1);
        assert_eq!(report.works_imported, 1);
        assert_eq!(report.comments_imported, 0);

        Ok(())
    }
}
