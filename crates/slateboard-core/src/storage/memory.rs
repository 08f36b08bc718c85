//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::document::Document;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for tests and throwaway boards.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &Document) -> StorageResult<()> {
        let mut docs = self.documents.write().map_err(lock_error)?;
        docs.insert(id.to_string(), document.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<Document> {
        let docs = self.documents.read().map_err(lock_error)?;
        docs.get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut docs = self.documents.write().map_err(lock_error)?;
        docs.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let docs = self.documents.read().map_err(lock_error)?;
        Ok(docs.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let docs = self.documents.read().map_err(lock_error)?;
        Ok(docs.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_save_load() {
        let storage = MemoryStorage::new();
        let doc = Document::default();

        storage.save("board", &doc).unwrap();
        assert!(storage.exists("board").unwrap());
        assert_eq!(storage.load("board").unwrap(), doc);
    }

    #[test]
    fn test_memory_storage_missing() {
        let storage = MemoryStorage::new();
        assert!(matches!(storage.load("nope"), Err(StorageError::NotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_memory_storage_delete_and_list() {
        let storage = MemoryStorage::new();
        storage.save("a", &Document::default()).unwrap();
        storage.save("b", &Document::default()).unwrap();
        storage.delete("a").unwrap();
        storage.delete("never-saved").unwrap();
        assert_eq!(storage.list().unwrap(), vec!["b".to_string()]);
    }
}
