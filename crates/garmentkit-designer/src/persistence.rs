//! Document persistence collaborator.
//!
//! The engine only requires four operations — save, load, list, delete —
//! behind an async trait. A failed call surfaces as an error and never
//! rolls back or corrupts local document state. Two implementations are
//! provided: an in-memory store for sessions and tests, and a JSON-file
//! store.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use garmentkit_core::{DesignError, Result};

use crate::serialization::DocumentFile;

/// Opaque id of a persisted document.
pub type DocumentId = String;

/// Listing entry for a persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub name: String,
    pub modified: DateTime<Utc>,
    pub node_count: usize,
}

fn summary_of(id: &str, file: &DocumentFile) -> DocumentSummary {
    DocumentSummary {
        id: id.to_string(),
        name: file.metadata.name.clone(),
        modified: file.metadata.modified,
        node_count: file.nodes.len(),
    }
}

/// Storage backend for design documents.
#[async_trait]
pub trait DocumentPersistence: Send + Sync {
    /// Persists a captured document, returning its id.
    async fn save(&self, file: &DocumentFile) -> Result<DocumentId>;

    /// Loads a document by id.
    async fn load(&self, id: &str) -> Result<DocumentFile>;

    /// Lists summaries of all persisted documents.
    async fn list(&self) -> Result<Vec<DocumentSummary>>;

    /// Deletes a document by id.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// In-memory persistence. Default backend for tests and scratch
/// sessions.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    entries: Mutex<HashMap<DocumentId, DocumentFile>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentPersistence for MemoryPersistence {
    async fn save(&self, file: &DocumentFile) -> Result<DocumentId> {
        let id = Uuid::new_v4().to_string();
        self.entries.lock().await.insert(id.clone(), file.clone());
        Ok(id)
    }

    async fn load(&self, id: &str) -> Result<DocumentFile> {
        self.entries
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| DesignError::DocumentNotFound { id: id.to_string() })
    }

    async fn list(&self) -> Result<Vec<DocumentSummary>> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .map(|(id, file)| summary_of(id, file))
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DesignError::DocumentNotFound { id: id.to_string() })
    }
}

/// JSON-file persistence: one `<uuid>.gkit.json` per document under a
/// root directory.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    root: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.gkit.json"))
    }

    fn persistence_err(err: impl std::fmt::Display) -> DesignError {
        DesignError::Persistence {
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl DocumentPersistence for JsonFilePersistence {
    async fn save(&self, file: &DocumentFile) -> Result<DocumentId> {
        let id = Uuid::new_v4().to_string();
        let json = file.to_json().map_err(Self::persistence_err)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(Self::persistence_err)?;
        tokio::fs::write(self.path_for(&id), json)
            .await
            .map_err(Self::persistence_err)?;
        info!(id, name = %file.metadata.name, "document saved");
        Ok(id)
    }

    async fn load(&self, id: &str) -> Result<DocumentFile> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(DesignError::DocumentNotFound { id: id.to_string() });
        }
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(Self::persistence_err)?;
        DocumentFile::from_json(&json).map_err(Self::persistence_err)
    }

    async fn list(&self) -> Result<Vec<DocumentSummary>> {
        let mut out = Vec::new();
        let mut dir = match tokio::fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            // No directory yet means nothing has been saved.
            Err(_) => return Ok(out),
        };
        while let Some(entry) = dir.next_entry().await.map_err(Self::persistence_err)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(id) = name.strip_suffix(".gkit.json") else {
                continue;
            };
            let json = tokio::fs::read_to_string(entry.path())
                .await
                .map_err(Self::persistence_err)?;
            let file = DocumentFile::from_json(&json).map_err(Self::persistence_err)?;
            out.push(summary_of(id, &file));
        }
        out.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(out)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(DesignError::DocumentNotFound { id: id.to_string() });
        }
        tokio::fs::remove_file(path).await.map_err(Self::persistence_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStore;

    #[tokio::test]
    async fn test_memory_round_trip() {
        let store = DocumentStore::with_default_surfaces();
        let backend = MemoryPersistence::new();
        let file = DocumentFile::capture(&store, "memo");

        let id = backend.save(&file).await.unwrap();
        let loaded = backend.load(&id).await.unwrap();
        assert_eq!(loaded, file);

        let listed = backend.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "memo");

        backend.delete(&id).await.unwrap();
        assert_eq!(
            backend.load(&id).await,
            Err(DesignError::DocumentNotFound { id })
        );
    }

    #[tokio::test]
    async fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFilePersistence::new(dir.path());
        let store = DocumentStore::with_default_surfaces();
        let file = DocumentFile::capture(&store, "on disk");

        let id = backend.save(&file).await.unwrap();
        let loaded = backend.load(&id).await.unwrap();
        assert_eq!(loaded.metadata.name, "on disk");

        assert_eq!(backend.list().await.unwrap().len(), 1);
        backend.delete(&id).await.unwrap();
        assert!(backend.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_document_is_explicit_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFilePersistence::new(dir.path());
        let err = backend.load("nope").await.unwrap_err();
        assert_eq!(
            err,
            DesignError::DocumentNotFound {
                id: "nope".to_string()
            }
        );
    }
}
