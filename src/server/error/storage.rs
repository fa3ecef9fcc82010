use thiserror::Error;

/// Failures of the object storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading, writing or removing a stored file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A storage key would escape the storage root or is otherwise malformed.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}
