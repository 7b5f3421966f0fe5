//! # GarmentKit
//!
//! A Rust engine for designing garment prints with support for:
//! - Node-based design documents (brush paths, text, shapes, images)
//! - Pen/touch/mouse input with palm rejection and pinch navigation
//! - Multi-surface garments (front, back, sleeves, pockets)
//! - Print-readiness analysis: gamut, color budgets, safe areas
//! - Live pricing and embroidery stitch estimation
//!
//! ## Architecture
//!
//! GarmentKit is organized as a workspace with multiple crates:
//!
//! 1. **garmentkit-core** - Errors, units, and tuning constants
//! 2. **garmentkit-designer** - Document model, input pipeline, analyses
//! 3. **garmentkit** - Facade crate and demo binary
//!
//! ## Features
//!
//! - **Document Model**: Nodes with snapshot history, undo/redo, revisions
//! - **Input Pipeline**: Gesture recognition for pen, finger, and mouse
//! - **Surfaces**: Catalog-driven print areas with per-surface exports
//! - **Production Checks**: Gamut matching, color budgets, stitch limits
//! - **Persistence**: Async save/load with stale-load protection
//! - **Cross-Platform**: Pure-Rust core, no UI toolkit dependency

// Re-export the crates under friendlier paths.
pub use garmentkit_core as core;
pub use garmentkit_designer as designer;

pub use garmentkit_core::{DesignError, Dpi, Result};

pub use garmentkit_designer::{
    CanvasConfig, Color, ColorAnalysis, ColorWarning, DocumentFile, DocumentPersistence,
    DocumentStore, EditorSession, GarmentCatalog, GarmentType, GestureAction, InputRouter,
    JsonFilePersistence, MemoryPersistence, Node, NodeId, NodeKind, PointerDevice, PointerEvent,
    PointerPhase, PriceBreakdown, PrintMethod, PrintSurface, SessionEvent, StaticCatalog,
    StitchEstimate, SurfaceExport, SurfaceManager, ToolMode, Viewport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
