//! # GarmentKit Designer
//!
//! This crate provides the document model and editing engine for garment
//! print designs. It combines a node-based design document, a pointer
//! input pipeline, and print-production analyses into an integrated
//! editing core that a UI layer drives.
//!
//! ## Core Components
//!
//! ### Design Elements
//! - **Nodes**: Paths (brush strokes), text, shapes, and placed images
//! - **Surfaces**: Printable regions of a garment (front, back, sleeve)
//! - **Document**: Node storage with selection, history, and revisions
//! - **Viewport**: Zoom/pan mapping between client and document space
//!
//! ### Input Pipeline
//! - **Router**: Classifies pointer events into gestures (stroke,
//!   transform, pan, pinch, multi-finger taps) with palm rejection
//! - **Session**: Applies gestures to the document and viewport
//!
//! ### Production Analyses
//! - **Color analysis**: Gamut matching against the thread/ink palette
//!   and per-method color budgets
//! - **Pricing**: Deterministic quote from the document and quantity
//! - **Embroidery**: Stitch-count and run-time estimation
//! - **Export**: Per-surface production output with safe-area checks
//!
//! ## Architecture
//!
//! ```text
//! PointerEvent
//!   └── InputRouter (gesture recognition)
//!         └── EditorSession
//!               ├── Viewport (pan/zoom)
//!               └── DocumentStore (nodes, selection, history)
//!                     ├── color_analysis / pricing / embroidery
//!                     └── export
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use garmentkit_designer::{DocumentStore, EditorSession};
//!
//! let mut session = EditorSession::default();
//! session.handle_pointer(&event);
//! let quote = session.quote();
//! ```

pub mod catalog;
pub mod color_analysis;
pub mod document;
pub mod embroidery;
pub mod export;
pub mod input;
pub mod model;
pub mod persistence;
pub mod pricing;
pub mod serialization;
pub mod session;
pub mod surfaces;
pub mod viewport;

// Re-export the types a driving UI needs.
pub use catalog::{GarmentCatalog, GarmentView, StaticCatalog};
pub use color_analysis::{ColorAnalysis, ColorWarning, PrintMethod, Swatch, SWATCHES};
pub use document::{CanvasConfig, DocumentStore, GarmentType, NodePatch, PrintSurface, Snapshot};
pub use embroidery::StitchEstimate;
pub use export::{ExportWarning, SurfaceExport};
pub use input::{
    DeviceClass, GestureAction, InputRouter, PointerDevice, PointerEvent, PointerPhase, ToolMode,
};
pub use model::{
    Color, ImageNode, Node, NodeId, NodeKind, PathNode, Point, Rect, ShapeKind, ShapeNode, Stroke,
    SurfaceId, TextAlign, TextNode,
};
pub use persistence::{
    DocumentId, DocumentPersistence, DocumentSummary, JsonFilePersistence, MemoryPersistence,
};
pub use pricing::PriceBreakdown;
pub use serialization::{DocumentFile, DocumentMetadata, FILE_FORMAT_VERSION};
pub use session::{EditorSession, SessionEvent};
pub use surfaces::SurfaceManager;
pub use viewport::Viewport;
