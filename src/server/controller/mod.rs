//! HTTP request handlers.
//!
//! Controllers authenticate the request through [`AuthGuard`](crate::server::middleware::auth::AuthGuard),
//! convert DTOs into domain params, call the matching service and convert the result back
//! into a DTO.

pub mod admin;
pub mod asset;
pub mod auth;
pub mod comment;
pub mod favorite;
pub mod tag;
pub mod user;
pub mod work;

use serde::Deserialize;

use crate::server::model::PageParam;

const DEFAULT_ENTRIES: u64 = 10;
const MAX_ENTRIES: u64 = 100;
/// Largest row offset SQLite accepts.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// `?page=&entries=` query shared by listing endpoints.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

pub fn default_entries() -> u64 {
    DEFAULT_ENTRIES
}

impl PaginationParams {
    pub fn into_page(self) -> PageParam {
        page_param(self.page, self.entries)
    }
}

/// Builds a [`PageParam`] with `entries` clamped to `1..=100`.
///
/// `page` is capped so that `page * per_page` stays a valid row offset; pages past the
/// end are simply empty.
pub fn page_param(page: u64, entries: u64) -> PageParam {
    let per_page = entries.clamp(1, MAX_ENTRIES);

    PageParam {
        page: page.min(MAX_OFFSET / per_page),
        per_page,
    }
}
