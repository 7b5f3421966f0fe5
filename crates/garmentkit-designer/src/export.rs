//! Export collaborator contract: one flattened output per enabled
//! surface, honoring the surface's safe-area exclusion.
//!
//! Rasterization and output format live with the export backend; this
//! module produces the flattened per-surface node sets it consumes.
//! Nodes entirely outside the safe area are excluded from the flatten;
//! nodes that straddle the boundary are kept and flagged, never
//! silently clipped away.

use serde::Serialize;

use crate::document::DocumentStore;
use crate::model::{Node, NodeId, Rect, SurfaceId};

/// Non-blocking export warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportWarning {
    /// Node crosses the safe-area boundary; part of it may be cut off.
    CrossesSafeArea { node: NodeId },
    /// Node lies fully outside the safe area and was excluded.
    OutsideSafeArea { node: NodeId },
}

/// Flattened output unit for one enabled surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceExport {
    pub surface_id: SurfaceId,
    pub name: String,
    /// Full printable area of the surface.
    pub area: Rect,
    /// Printable area shrunk by the surface's safe-area inset (or the
    /// document-wide fraction when the surface has no override).
    pub safe_area: Rect,
    /// Nodes to flatten, in draw order.
    pub nodes: Vec<Node>,
    pub warnings: Vec<ExportWarning>,
}

/// Produces one export unit per *enabled* surface. Disabled surfaces
/// produce nothing; their nodes stay in the document untouched.
pub fn export_surfaces(store: &DocumentStore) -> Vec<SurfaceExport> {
    let safe_fraction = store.config().safe_area_percent;

    store
        .surfaces()
        .iter()
        .filter(|s| s.enabled)
        .map(|surface| {
            let fraction = surface.safe_area_percent.unwrap_or(safe_fraction);
            let safe_area = surface.area.inset_fraction(fraction);
            let mut nodes = Vec::new();
            let mut warnings = Vec::new();

            for node in store.nodes().iter().filter(|n| n.surface_id == surface.id) {
                let bounds = node.bounds();
                if safe_area.contains_rect(&bounds) {
                    nodes.push(node.clone());
                } else if intersects(&safe_area, &bounds) {
                    warnings.push(ExportWarning::CrossesSafeArea { node: node.id });
                    nodes.push(node.clone());
                } else {
                    warnings.push(ExportWarning::OutsideSafeArea { node: node.id });
                }
            }

            SurfaceExport {
                surface_id: surface.id.clone(),
                name: surface.name.clone(),
                area: surface.area,
                safe_area,
                nodes,
                warnings,
            }
        })
        .collect()
}

fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}
