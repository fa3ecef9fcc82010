//! Object storage for uploaded asset files.
//!
//! Services talk to storage through the [`FileStorage`] trait so the backend can be
//! swapped without touching business logic. The only backend shipped is
//! [`local::LocalStorage`], which writes below a directory that the router serves
//! read-only under `/files`.

pub mod local;

use async_trait::async_trait;

use crate::server::error::storage::StorageError;

/// Backend storing opaque files under string keys such as `works/{work}/{asset}.png`.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Writes `bytes` under `key`, replacing any existing file.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Removes the file stored under `key`. Removing a missing file succeeds.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL the file under `key` is served from.
    fn url(&self, key: &str) -> String;
}
