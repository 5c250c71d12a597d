use thiserror::Error;

/// Failure raised by a storage backend.
///
/// A missing row is not an error: lookups return `Option` and removals
/// return `bool`.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}
