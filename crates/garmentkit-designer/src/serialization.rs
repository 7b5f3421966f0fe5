//! Serialization and deserialization for design documents.
//!
//! Implements the .gkit document format: JSON with format version,
//! metadata, canvas config, surfaces, and nodes. A `DocumentFile` is an
//! immutable capture of the store at one revision; the revision it was
//! captured at rides along for the staleness check in the session.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{CanvasConfig, DocumentStore, PrintSurface};
use crate::model::Node;

/// Document file format version.
pub const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete persisted document structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub version: String,
    pub metadata: DocumentMetadata,
    pub config: CanvasConfig,
    pub surfaces: Vec<PrintSurface>,
    pub nodes: Vec<Node>,
    /// Store revision at capture time. Restored stores resume their
    /// revision counter from here so revisions stay monotonic across
    /// save/load cycles.
    #[serde(default)]
    pub base_revision: u64,
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
}

impl DocumentFile {
    /// Captures an immutable copy of the store. Edits made to the store
    /// after this call do not affect the capture, so an in-flight save
    /// is isolated from concurrent local editing.
    pub fn capture(store: &DocumentStore, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DocumentMetadata {
                name: name.into(),
                created: now,
                modified: now,
                author: String::new(),
                description: String::new(),
            },
            config: store.config().clone(),
            surfaces: store.surfaces().to_vec(),
            nodes: store.nodes().to_vec(),
            base_revision: store.revision(),
        }
    }

    /// Builds a fresh store from this file. Selection and history do
    /// not persist; the restored state becomes the new undo baseline.
    pub fn into_store(self) -> DocumentStore {
        let next_id = self.nodes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        let mut store = DocumentStore::new(self.config, self.surfaces);
        store.restore_content_from_file(self.nodes, next_id, self.base_revision);
        store
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize document")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse document")
    }
}
