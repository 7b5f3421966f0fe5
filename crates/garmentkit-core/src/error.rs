//! Error handling for GarmentKit
//!
//! Provides error types for all layers of the design engine:
//! - Document errors (missing nodes/surfaces, invalid mutations)
//! - Color errors (unparseable color values)
//! - Collaborator errors (persistence, catalog)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Non-blocking conditions (color budget exceeded, feature too fine for
//! embroidery) are *warnings* attached to analyzer results, never errors.

use thiserror::Error;

/// Design engine error type
///
/// Represents failures of document mutations and collaborator calls.
/// Mutations validate before applying, so a returned error means the
/// document was not modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    /// A node id was not present in the document
    #[error("Node not found: {id}")]
    NodeNotFound {
        /// The missing node id.
        id: u64,
    },

    /// A surface id was not present in the document
    #[error("Print surface not found: {id}")]
    SurfaceNotFound {
        /// The missing surface id.
        id: String,
    },

    /// A color value could not be parsed
    #[error("Invalid color value: {value}")]
    InvalidColor {
        /// The rejected color string.
        value: String,
    },

    /// A loaded document is older than the local editing state
    #[error("Stale load: document loaded at revision {base} but local state is at revision {current}")]
    StaleLoad {
        /// Revision the load was based on.
        base: u64,
        /// Current local revision.
        current: u64,
    },

    /// A persisted document id was not found
    #[error("Document not found: {id}")]
    DocumentNotFound {
        /// The missing document id.
        id: String,
    },

    /// The persistence collaborator failed
    #[error("Persistence error: {message}")]
    Persistence {
        /// Description of the failure.
        message: String,
    },

    /// The garment catalog collaborator failed
    #[error("Catalog error: {message}")]
    Catalog {
        /// Description of the failure.
        message: String,
    },
}

/// Result type alias using [`DesignError`].
pub type Result<T> = std::result::Result<T, DesignError>;
