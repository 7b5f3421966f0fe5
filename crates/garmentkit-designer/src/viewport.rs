//! Viewport and coordinate transformation.
//!
//! Resolves raw client-space pointer coordinates into document space
//! under the current zoom/pan, and back. The viewport is the single
//! authority for this mapping: input routing never assumes container
//! geometry equals document geometry, it always goes through here.

use std::fmt;

use garmentkit_core::constants::{MAX_ZOOM, MIN_ZOOM, VIEW_PADDING};

use crate::model::Point;

/// The viewport transform `T = translate(pan) ∘ scale(zoom)` plus the
/// current on-screen canvas size.
///
/// A client point `p` maps to document space as `T⁻¹(p)`. Both spaces
/// are y-down, so no axis flip is involved.
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a new viewport with initial on-screen dimensions.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Refits the rendering surface after a container resize. Called
    /// from the size-observer callback; deliberately leaves zoom and pan
    /// untouched so content does not jump under the user.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Current zoom level (1.0 = 100%). Always > 0.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, ignored outside the (0.1, 50.0) clamp.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
        }
    }

    /// Zooms in by multiplying current zoom by 1.2.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * 1.2);
    }

    /// Zooms out by dividing current zoom by 1.2.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / 1.2);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a delta amount in client pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts client coordinates to document coordinates: `T⁻¹(p)`.
    ///
    /// ```text
    /// doc_x = (client_x - pan_x) / zoom
    /// doc_y = (client_y - pan_y) / zoom
    /// ```
    pub fn client_to_document(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(
            (client_x - self.pan_x) / self.zoom,
            (client_y - self.pan_y) / self.zoom,
        )
    }

    /// Converts document coordinates to client coordinates: `T(p)`.
    pub fn document_to_client(&self, doc_x: f64, doc_y: f64) -> (f64, f64) {
        (doc_x * self.zoom + self.pan_x, doc_y * self.zoom + self.pan_y)
    }

    /// Applies a pinch step: scales zoom by `factor` keeping the client
    /// point `anchor` fixed on screen.
    pub fn pinch(&mut self, factor: f64, anchor_x: f64, anchor_y: f64) {
        let doc = self.client_to_document(anchor_x, anchor_y);
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM * 1.001, MAX_ZOOM * 0.999);
        self.zoom = new_zoom;
        self.pan_x = anchor_x - doc.x * new_zoom;
        self.pan_y = anchor_y - doc.y * new_zoom;
    }

    /// Zooms to a document point, maintaining that point's screen
    /// position. Used for zoom-to-cursor.
    pub fn zoom_to_point(&mut self, doc_point: &Point, new_zoom: f64) {
        if new_zoom <= MIN_ZOOM || new_zoom >= MAX_ZOOM {
            return;
        }
        let (client_x, client_y) = self.document_to_client(doc_point.x, doc_point.y);
        self.zoom = new_zoom;
        self.pan_x = client_x - doc_point.x * new_zoom;
        self.pan_y = client_y - doc_point.y * new_zoom;
    }

    /// Fits the given document-space bounding box into the viewport,
    /// centered, reserving `padding` (fraction of the viewport) per edge.
    pub fn fit_to_bounds(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64, padding: f64) {
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        let width = max_x - min_x;
        let height = max_y - min_y;

        let padding_factor = 1.0 - (padding * 2.0);
        let zoom_x = (self.canvas_width * padding_factor) / width;
        let zoom_y = (self.canvas_height * padding_factor) / height;
        let new_zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);

        self.zoom = new_zoom;
        self.pan_x = (self.canvas_width - width * new_zoom) / 2.0 - min_x * new_zoom;
        self.pan_y = (self.canvas_height - height * new_zoom) / 2.0 - min_y * new_zoom;
    }

    /// `fit_to_bounds` with the default padding.
    pub fn fit_to_view(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        self.fit_to_bounds(min_x, min_y, max_x, max_y, VIEW_PADDING);
    }

    /// Centers the viewport on a document coordinate.
    pub fn center_on(&mut self, doc_x: f64, doc_y: f64) {
        self.pan_x = self.canvas_width / 2.0 - doc_x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - doc_y * self.zoom;
    }

    /// Resets to 1:1 zoom at the origin.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_zoom(2.0);
        vp.set_pan(100.0, -40.0);
        let doc = vp.client_to_document(300.0, 200.0);
        let (cx, cy) = vp.document_to_client(doc.x, doc.y);
        assert!((cx - 300.0).abs() < 1e-9);
        assert!((cy - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamped_positive() {
        let mut vp = Viewport::default();
        vp.set_zoom(0.0);
        assert_eq!(vp.zoom(), 1.0);
        vp.set_zoom(-3.0);
        assert!(vp.zoom() > 0.0);
    }

    #[test]
    fn test_resize_preserves_transform() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_zoom(1.5);
        vp.set_pan(20.0, 30.0);
        vp.set_canvas_size(1024.0, 768.0);
        assert_eq!(vp.zoom(), 1.5);
        assert_eq!((vp.pan_x(), vp.pan_y()), (20.0, 30.0));
    }

    #[test]
    fn test_pinch_keeps_anchor_fixed() {
        let mut vp = Viewport::new(800.0, 600.0);
        let anchor = (400.0, 300.0);
        let doc_before = vp.client_to_document(anchor.0, anchor.1);
        vp.pinch(1.6, anchor.0, anchor.1);
        let doc_after = vp.client_to_document(anchor.0, anchor.1);
        assert!((doc_before.x - doc_after.x).abs() < 1e-9);
        assert!((doc_before.y - doc_after.y).abs() < 1e-9);
    }

    #[test]
    fn test_fit_to_bounds_centers_content() {
        let mut vp = Viewport::new(1000.0, 1000.0);
        vp.fit_to_bounds(0.0, 0.0, 100.0, 100.0, 0.0);
        let center = vp.client_to_document(500.0, 500.0);
        assert!((center.x - 50.0).abs() < 1e-9);
        assert!((center.y - 50.0).abs() < 1e-9);
    }
}
