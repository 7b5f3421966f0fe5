//! Print surface management.
//!
//! Surfaces are named, independently toggleable design regions (front,
//! back, sleeve). Nodes belong to the surface that was active when they
//! were created; membership is a field lookup, never a geometric
//! inference.

use tracing::debug;

use garmentkit_core::{DesignError, Result};

use crate::document::{DocumentStore, PrintSurface};
use crate::model::{Node, SurfaceId};

/// Manages the document's surface set: the active surface, per-surface
/// visibility, and per-surface node queries.
///
/// The manager holds no state of its own; every operation reads or
/// writes the [`DocumentStore`] passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceManager;

impl SurfaceManager {
    pub fn new() -> Self {
        Self
    }

    /// Makes `surface_id` the active surface for subsequent node
    /// creation. Fails with `SurfaceNotFound` for unknown ids.
    pub fn switch_active_surface(&self, store: &mut DocumentStore, surface_id: &str) -> Result<()> {
        if store.surface(surface_id).is_none() {
            return Err(DesignError::SurfaceNotFound {
                id: surface_id.to_string(),
            });
        }
        debug!(surface = surface_id, "switch active surface");
        store.config_mut().active_surface_id = surface_id.to_string();
        Ok(())
    }

    /// Flips a surface's `enabled` flag and returns the new value.
    ///
    /// Disabling never deletes nodes; it only excludes the surface from
    /// rendering, pricing, and analysis.
    pub fn toggle_surface_visibility(
        &self,
        store: &mut DocumentStore,
        surface_id: &str,
    ) -> Result<bool> {
        let surface = store
            .surface_mut(surface_id)
            .ok_or_else(|| DesignError::SurfaceNotFound {
                id: surface_id.to_string(),
            })?;
        surface.enabled = !surface.enabled;
        Ok(surface.enabled)
    }

    /// Adds a surface to the document.
    pub fn add_surface(&self, store: &mut DocumentStore, surface: PrintSurface) {
        // Replacing an existing id would orphan its nodes' surface_id
        // tags, so additions must be new ids.
        debug_assert!(store.surface(&surface.id).is_none());
        store.push_surface(surface);
    }

    /// All nodes attached to `surface_id`, in draw order. An O(n) scan
    /// over the node list.
    pub fn surface_nodes<'a>(&self, store: &'a DocumentStore, surface_id: &str) -> Vec<&'a Node> {
        store
            .nodes()
            .iter()
            .filter(|n| n.surface_id == surface_id)
            .collect()
    }

    /// Ids of surfaces currently enabled, in document order.
    pub fn enabled_surfaces<'a>(&self, store: &'a DocumentStore) -> Vec<&'a PrintSurface> {
        store.surfaces().iter().filter(|s| s.enabled).collect()
    }

    /// Distinct color count on one surface: the color analyzer
    /// restricted to that surface's nodes.
    pub fn surface_color_count(&self, store: &DocumentStore, surface_id: &str) -> Result<usize> {
        if store.surface(surface_id).is_none() {
            return Err(DesignError::SurfaceNotFound {
                id: surface_id.to_string(),
            });
        }
        let nodes = self.surface_nodes(store, surface_id);
        Ok(crate::color_analysis::distinct_colors(nodes.into_iter()).len())
    }
}

/// Seeds a surface list for a garment from catalog print-area metadata.
/// The catalog's safe-area fraction rides along so export insets match
/// the physical garment rather than the canvas-wide default.
pub fn surface_from_catalog(id: impl Into<SurfaceId>, name: impl Into<String>, view: &crate::catalog::GarmentView) -> PrintSurface {
    let mut surface = PrintSurface::new(id, name, view.print_area);
    surface.safe_area_percent = Some(view.safe_area_percent);
    surface
}
