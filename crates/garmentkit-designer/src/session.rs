//! Editor session: wires the input router, viewport, and document store
//! together and exposes the operations the UI surface maps onto.
//!
//! All pointer input funnels through [`EditorSession::handle_pointer`]:
//! the router classifies the event, the viewport resolves client
//! coordinates into document space, and the resulting mutation goes
//! through the store. Continuous gestures use provisional updates and
//! commit exactly one history snapshot at gesture end.

use tracing::debug;

use garmentkit_core::{DesignError, Result};

use crate::color_analysis::{self, ColorAnalysis, PrintMethod};
use crate::document::{DocumentStore, NodePatch};
use crate::embroidery::{self, StitchEstimate};
use crate::export::{self, SurfaceExport};
use crate::input::{GestureAction, InputRouter, PointerEvent, ToolMode};
use crate::model::{Color, NodeId, NodeKind, PathNode, Point, ShapeKind, ShapeNode, Stroke, TextNode};
use crate::pricing::{self, PriceBreakdown};
use crate::serialization::DocumentFile;
use crate::surfaces::SurfaceManager;
use crate::viewport::Viewport;

/// Event the session reports back to the UI after routing a pointer
/// event. Most input resolves internally and reports `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    None,
    /// Three-finger tap: the UI should open the tool menu.
    ToolMenuRequested,
}

/// Drag bookkeeping for the gesture in flight.
#[derive(Debug, Clone, Copy)]
enum ActiveGesture {
    None,
    /// Laying down a brush stroke into a path node.
    Stroke { node: NodeId },
    /// Dragging a selected node; origin kept for provisional moves.
    DragNode {
        node: NodeId,
        start: Point,
        node_origin: (f64, f64),
    },
}

/// One editing session over one document.
pub struct EditorSession {
    store: DocumentStore,
    viewport: Viewport,
    router: InputRouter,
    surfaces: SurfaceManager,
    tool: ToolMode,
    print_method: PrintMethod,
    quantity: u32,
    brush: Stroke,
    gesture: ActiveGesture,
}

impl EditorSession {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            viewport: Viewport::default(),
            router: InputRouter::new(),
            surfaces: SurfaceManager::new(),
            tool: ToolMode::Select,
            print_method: PrintMethod::ScreenPrint,
            quantity: 1,
            brush: Stroke::default(),
            gesture: ActiveGesture::None,
        }
    }

    // --- accessors ---

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DocumentStore {
        &mut self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn print_method(&self) -> PrintMethod {
        self.print_method
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    // --- UI surface: 1:1 operations ---

    /// Switches the active tool. Drops any gesture in flight.
    pub fn set_tool(&mut self, tool: ToolMode) {
        self.tool = tool;
        self.router.reset();
        self.gesture = ActiveGesture::None;
    }

    pub fn set_print_method(&mut self, method: PrintMethod) {
        self.print_method = method;
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    pub fn set_brush(&mut self, brush: Stroke) {
        self.brush = brush;
    }

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    pub fn switch_surface(&mut self, surface_id: &str) -> Result<()> {
        self.surfaces.switch_active_surface(&mut self.store, surface_id)
    }

    pub fn toggle_surface(&mut self, surface_id: &str) -> Result<bool> {
        self.surfaces
            .toggle_surface_visibility(&mut self.store, surface_id)
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Size-observer callback on container resize.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
    }

    // --- derived analyses (pull-based) ---

    pub fn analyze_colors(&self) -> ColorAnalysis {
        color_analysis::analyze(&self.store, self.print_method)
    }

    pub fn quote(&self) -> PriceBreakdown {
        pricing::quote(&self.store, self.print_method, self.quantity)
    }

    pub fn estimate_stitches(&self) -> StitchEstimate {
        embroidery::estimate(&self.store)
    }

    pub fn export(&self) -> Vec<SurfaceExport> {
        export::export_surfaces(&self.store)
    }

    /// Applies the analyzer's fix action for an out-of-gamut color.
    pub fn replace_color(&mut self, from: Color, to: Color) -> usize {
        self.store.replace_color(from, to)
    }

    // --- save/load with the staleness rule ---

    /// Captures the document for a save. The capture is immutable:
    /// edits made while the save is in flight are unaffected.
    pub fn capture_for_save(&self, name: impl Into<String>) -> DocumentFile {
        DocumentFile::capture(&self.store, name)
    }

    /// Revision to remember when a load is requested.
    pub fn load_base_revision(&self) -> u64 {
        self.store.revision()
    }

    /// Applies a completed load. Rejected with `StaleLoad` when local
    /// edits happened after the load was requested; local state is left
    /// untouched in that case.
    pub fn apply_loaded(&mut self, file: DocumentFile, base_revision: u64) -> Result<()> {
        let current = self.store.revision();
        if current != base_revision {
            return Err(DesignError::StaleLoad {
                base: base_revision,
                current,
            });
        }
        self.store = file.into_store();
        self.gesture = ActiveGesture::None;
        self.router.reset();
        Ok(())
    }

    // --- pointer pipeline ---

    /// Routes one pointer event and applies the resulting action.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> SessionEvent {
        let action = self.router.handle_event(event, self.tool);
        self.apply_action(action)
    }

    fn apply_action(&mut self, action: GestureAction) -> SessionEvent {
        match action {
            GestureAction::StrokeStart { x, y, pressure } => {
                self.begin_stroke(x, y, pressure);
                SessionEvent::None
            }
            GestureAction::StrokeMove { x, y, .. } => {
                self.continue_stroke(x, y);
                SessionEvent::None
            }
            GestureAction::StrokeEnd => {
                self.end_stroke();
                SessionEvent::None
            }
            GestureAction::TransformStart { x, y } => {
                self.begin_transform(x, y);
                SessionEvent::None
            }
            GestureAction::TransformMove { x, y } => {
                self.continue_transform(x, y);
                SessionEvent::None
            }
            GestureAction::TransformEnd => {
                self.end_transform();
                SessionEvent::None
            }
            GestureAction::PanBy { dx, dy } => {
                self.viewport.pan_by(dx, dy);
                SessionEvent::None
            }
            GestureAction::Pinch {
                factor_step,
                center_x,
                center_y,
                pan_dx,
                pan_dy,
                ..
            } => {
                self.viewport.pinch(factor_step, center_x, center_y);
                self.viewport.pan_by(pan_dx, pan_dy);
                SessionEvent::None
            }
            // Two-finger tap is the undo shortcut.
            GestureAction::DoubleTap => {
                self.store.undo();
                SessionEvent::None
            }
            GestureAction::ToolMenu => SessionEvent::ToolMenuRequested,
            GestureAction::Ignored => SessionEvent::None,
        }
    }

    fn begin_stroke(&mut self, client_x: f64, client_y: f64, _pressure: f64) {
        let p = self.viewport.client_to_document(client_x, client_y);
        match self.tool {
            ToolMode::Brush => {
                let mut path = PathNode::new(self.brush);
                path.push_point(Point::new(0.0, 0.0));
                let node = self.store.add_node(p.x, p.y, NodeKind::Path(path));
                self.gesture = ActiveGesture::Stroke { node };
            }
            ToolMode::Eraser => {
                self.erase_at(&p);
            }
            ToolMode::Text => {
                // Placement only; editing content is a UI concern.
                self.store
                    .add_node(p.x, p.y, NodeKind::Text(TextNode::new(String::new(), 48.0)));
            }
            _ => {}
        }
    }

    fn continue_stroke(&mut self, client_x: f64, client_y: f64) {
        let p = self.viewport.client_to_document(client_x, client_y);
        match self.gesture {
            ActiveGesture::Stroke { node } => {
                if let Some(origin) = self.store.node(node).map(|n| (n.x, n.y)) {
                    // Points are stored relative to the node origin.
                    let local = Point::new(p.x - origin.0, p.y - origin.1);
                    // Provisional: no history churn while the pen moves.
                    let _ = self.store.append_path_point(node, local);
                }
            }
            _ => {
                if self.tool == ToolMode::Eraser {
                    self.erase_at(&p);
                }
            }
        }
    }

    fn end_stroke(&mut self) {
        if matches!(self.gesture, ActiveGesture::Stroke { .. }) {
            self.store.commit_gesture();
        }
        self.gesture = ActiveGesture::None;
    }

    fn begin_transform(&mut self, client_x: f64, client_y: f64) {
        let p = self.viewport.client_to_document(client_x, client_y);
        match self.hit_test(&p) {
            Some(id) => {
                let _ = self.store.select_node(id, false);
                if let Some(node) = self.store.node(id) {
                    if !node.locked {
                        self.gesture = ActiveGesture::DragNode {
                            node: id,
                            start: p,
                            node_origin: (node.x, node.y),
                        };
                    }
                }
            }
            None => self.store.clear_selection(),
        }
    }

    fn continue_transform(&mut self, client_x: f64, client_y: f64) {
        let p = self.viewport.client_to_document(client_x, client_y);
        if let ActiveGesture::DragNode {
            node,
            start,
            node_origin,
        } = self.gesture
        {
            let patch = NodePatch::move_to(
                node_origin.0 + (p.x - start.x),
                node_origin.1 + (p.y - start.y),
            );
            let _ = self.store.update_node_provisional(node, &patch);
        }
    }

    fn end_transform(&mut self) {
        if let ActiveGesture::DragNode { node, .. } = self.gesture {
            debug!(node, "drag committed");
            self.store.commit_gesture();
        }
        self.gesture = ActiveGesture::None;
    }

    /// Topmost node whose bounds contain `p`.
    fn hit_test(&self, p: &Point) -> Option<NodeId> {
        self.store
            .nodes()
            .iter()
            .rev()
            .find(|n| n.bounds().contains(p))
            .map(|n| n.id)
    }

    fn erase_at(&mut self, p: &Point) {
        if let Some(id) = self.hit_test(p) {
            let _ = self.store.delete_node(id);
        }
    }

    /// Convenience used by the shape tool's palette.
    pub fn place_shape(&mut self, kind: ShapeKind, width: f64, height: f64, fill: Color) -> NodeId {
        self.store
            .add_node_centered(NodeKind::Shape(ShapeNode::new(kind, width, height, fill)))
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(DocumentStore::with_default_surfaces())
    }
}
