//! Storage abstraction for saved boards.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::document::Document;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Board not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for board storage backends.
///
/// Calls complete synchronously; the host decides when to save.
pub trait Storage: Send + Sync {
    /// Save a board document under `id`, replacing any previous one.
    fn save(&self, id: &str, document: &Document) -> StorageResult<()>;

    /// Load a board document.
    fn load(&self, id: &str) -> StorageResult<Document>;

    /// Delete a board document. Deleting a missing id is not an error.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all stored ids.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a board exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;
}
