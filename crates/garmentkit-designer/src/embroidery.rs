//! Embroidery feasibility estimation.
//!
//! Read-only analyzer mapping path/shape geometry to stitch counts and
//! machine run time. Features finer than the minimum stitch-able size
//! are *reported*, never silently simplified or dropped; dropping them
//! is the digitizer's call, not ours.

use serde::Serialize;

use garmentkit_core::constants::{
    MACHINE_STITCH_RATE, MIN_EMBROIDERY_FEATURE_MM, STITCH_PITCH_MM, TRIM_OVERHEAD_STITCHES,
};
use garmentkit_core::format_minutes;

use crate::document::DocumentStore;
use crate::model::{NodeId, NodeKind};

/// Stitch-count and run-time estimate for a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StitchEstimate {
    pub total_stitches: u64,
    /// Machine run time in minutes.
    pub estimated_run_time_min: f64,
    /// Nodes too fine for embroidery: "will be simplified or dropped".
    pub violations: Vec<NodeId>,
}

impl StitchEstimate {
    /// Human-readable run time, e.g. `"1h 05m"`.
    pub fn run_time_display(&self) -> String {
        format_minutes(self.estimated_run_time_min)
    }
}

/// Estimates stitches for every path/shape node on an enabled surface.
///
/// Stitch count per node ≈ outline length / stitch pitch, plus a fixed
/// trim overhead per object. Text and image nodes are skipped; their
/// digitization happens outside this engine.
pub fn estimate(store: &DocumentStore) -> StitchEstimate {
    let dpi = store.config().dpi;
    let mut total = 0.0_f64;
    let mut violations = Vec::new();

    for node in store.nodes() {
        let enabled = store
            .surface(&node.surface_id)
            .map(|s| s.enabled)
            .unwrap_or(false);
        if !enabled {
            continue;
        }

        match &node.kind {
            NodeKind::Path(path) => {
                let length_mm = dpi.px_to_mm(path.length());
                total += length_mm / STITCH_PITCH_MM + TRIM_OVERHEAD_STITCHES;
                if dpi.px_to_mm(path.stroke.width) < MIN_EMBROIDERY_FEATURE_MM {
                    violations.push(node.id);
                }
            }
            NodeKind::Shape(shape) => {
                let length_mm = dpi.px_to_mm(shape.perimeter());
                total += length_mm / STITCH_PITCH_MM + TRIM_OVERHEAD_STITCHES;
                let min_dim_mm = dpi.px_to_mm(shape.min_dimension());
                let stroke_ok = shape
                    .stroke
                    .map(|s| dpi.px_to_mm(s.width) >= MIN_EMBROIDERY_FEATURE_MM)
                    .unwrap_or(true);
                if min_dim_mm < MIN_EMBROIDERY_FEATURE_MM || !stroke_ok {
                    violations.push(node.id);
                }
            }
            NodeKind::Text(_) | NodeKind::Image(_) => {}
        }
    }

    StitchEstimate {
        total_stitches: total.round() as u64,
        estimated_run_time_min: total / MACHINE_STITCH_RATE,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, PathNode, Point, ShapeKind, ShapeNode, Stroke};
    use crate::surfaces::SurfaceManager;

    #[test]
    fn test_empty_document_zero_estimate() {
        let store = DocumentStore::with_default_surfaces();
        let estimate = estimate(&store);
        assert_eq!(estimate.total_stitches, 0);
        assert_eq!(estimate.estimated_run_time_min, 0.0);
        assert!(estimate.violations.is_empty());
    }

    #[test]
    fn test_path_stitch_math() {
        let mut store = DocumentStore::with_default_surfaces();
        // 300 dpi: 1181.1 px = 100 mm of stitching.
        let dpi = store.config().dpi;
        let length_px = dpi.mm_to_px(100.0);
        let path = PathNode::from_points(
            &[Point::new(0.0, 0.0), Point::new(length_px, 0.0)],
            false,
        );
        store.add_node(0.0, 0.0, NodeKind::Path(path));

        let result = estimate(&store);
        let expected = 100.0 / STITCH_PITCH_MM + TRIM_OVERHEAD_STITCHES;
        assert_eq!(result.total_stitches, expected.round() as u64);
        assert!((result.estimated_run_time_min - expected / MACHINE_STITCH_RATE).abs() < 1e-9);
    }

    #[test]
    fn test_fine_stroke_reported_not_mutated() {
        let mut store = DocumentStore::with_default_surfaces();
        let dpi = store.config().dpi;
        let mut path = PathNode::from_points(
            &[Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            false,
        );
        // Half the minimum feature size.
        path.stroke = Stroke::new(Color::BLACK, dpi.mm_to_px(MIN_EMBROIDERY_FEATURE_MM / 2.0));
        let id = store.add_node(0.0, 0.0, NodeKind::Path(path.clone()));

        let result = estimate(&store);
        assert_eq!(result.violations, vec![id]);
        // The node itself is untouched.
        match &store.node(id).unwrap().kind {
            NodeKind::Path(p) => assert_eq!(p.stroke.width, path.stroke.width),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_disabled_surface_skipped() {
        let mut store = DocumentStore::with_default_surfaces();
        store.add_node(
            0.0,
            0.0,
            NodeKind::Shape(ShapeNode::new(ShapeKind::Circle, 300.0, 300.0, Color::BLACK)),
        );
        SurfaceManager::new()
            .toggle_surface_visibility(&mut store, "front")
            .unwrap();
        assert_eq!(estimate(&store).total_stitches, 0);
    }
}
