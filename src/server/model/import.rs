//! Legacy export format and import bookkeeping.
//!
//! The legacy export is a single JSON document holding every row of the old schema.
//! All IDs are strings; work tags are a comma-separated string and visibility is a
//! single `is_public` flag.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyExport {
    #[serde(default)]
    pub users: Vec<LegacyUser>,
    #[serde(default)]
    pub works: Vec<LegacyWork>,
    #[serde(default)]
    pub comments: Vec<LegacyComment>,
    #[serde(default)]
    pub favorites: Vec<LegacyFavorite>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyUser {
    pub id: String,
    pub discord_id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyWork {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Comma-separated tag names.
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyComment {
    pub id: String,
    pub work_id: String,
    pub user_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyFavorite {
    pub user_id: String,
    pub work_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Rows converted to the current schema, ready to be inserted in one transaction.
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pub users: Vec<entity::user::Model>,
    /// Works with their normalized tag names.
    pub works: Vec<(entity::work::Model, Vec<String>)>,
    pub comments: Vec<entity::comment::Model>,
    pub favorites: Vec<entity::favorite::Model>,
}

/// Counts of imported and skipped rows per table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub users_imported: usize,
    pub users_skipped: usize,
    pub works_imported: usize,
    pub works_skipped: usize,
    pub comments_imported: usize,
    pub comments_skipped: usize,
    pub favorites_imported: usize,
    pub favorites_skipped: usize,
    /// Individual tags dropped because they could not be normalized.
    pub tags_skipped: usize,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "users:     {} imported, {} skipped",
            self.users_imported, self.users_skipped
        )?;
        writeln!(
            f,
            "works:     {} imported, {} skipped",
            self.works_imported, self.works_skipped
        )?;
        writeln!(
            f,
            "comments:  {} imported, {} skipped",
            self.comments_imported, self.comments_skipped
        )?;
        writeln!(
            f,
            "favorites: {} imported, {} skipped",
            self.favorites_imported, self.favorites_skipped
        )?;
        write!(f, "tags:      {} skipped", self.tags_skipped)
    }
}
