//! The document store: single owner of all design state and the only
//! mutation path into it.

mod history;
mod types;

pub use history::HistoryStack;
pub use types::{CanvasConfig, GarmentType, NodePatch, PrintSurface, Snapshot};

use std::collections::HashSet;

use tracing::debug;

use garmentkit_core::{DesignError, Result};

use crate::model::{Node, NodeId, NodeKind, Point, Rect, SurfaceId};

/// Owns the document: canvas config, surfaces, nodes, selection, and the
/// undo history. Mutations are synchronous and atomic; a returned error
/// means nothing was applied.
///
/// Continuous gestures use the two-phase policy: `*_provisional`
/// mutations change nodes without committing history, and the gesture's
/// terminal `commit_gesture()` pushes a single snapshot.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    config: CanvasConfig,
    surfaces: Vec<PrintSurface>,
    nodes: Vec<Node>,
    selection: HashSet<NodeId>,
    history: HistoryStack,
    next_id: NodeId,
    revision: u64,
}

impl DocumentStore {
    /// Creates an empty document with the given config and surfaces.
    ///
    /// The active surface id must name one of `surfaces`; if it does
    /// not, the first surface becomes active so the invariant holds from
    /// construction.
    pub fn new(mut config: CanvasConfig, surfaces: Vec<PrintSurface>) -> Self {
        assert!(!surfaces.is_empty(), "a document needs at least one surface");
        if !surfaces.iter().any(|s| s.id == config.active_surface_id) {
            config.active_surface_id = surfaces[0].id.clone();
        }
        let initial = Snapshot {
            nodes: Vec::new(),
            selection: HashSet::new(),
        };
        Self {
            config,
            surfaces,
            nodes: Vec::new(),
            selection: HashSet::new(),
            history: HistoryStack::new(initial),
            next_id: 1,
            revision: 0,
        }
    }

    /// Creates a t-shirt document with the default front/back surfaces.
    pub fn with_default_surfaces() -> Self {
        let config = CanvasConfig::default();
        let area = Rect::new(0.0, 0.0, config.width, config.height);
        Self::new(
            config,
            vec![
                PrintSurface::new("front", "Front", area),
                PrintSurface::new("back", "Back", area),
            ],
        )
    }

    // --- accessors ---

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CanvasConfig {
        &mut self.config
    }

    pub fn surfaces(&self) -> &[PrintSurface] {
        &self.surfaces
    }

    pub fn surface(&self, id: &str) -> Option<&PrintSurface> {
        self.surfaces.iter().find(|s| s.id == id)
    }

    pub(crate) fn surface_mut(&mut self, id: &str) -> Option<&mut PrintSurface> {
        self.surfaces.iter_mut().find(|s| s.id == id)
    }

    pub(crate) fn push_surface(&mut self, surface: PrintSurface) {
        self.surfaces.push(surface);
        self.touch();
    }

    /// All nodes in insertion (draw) order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn selection(&self) -> &HashSet<NodeId> {
        &self.selection
    }

    pub fn active_surface_id(&self) -> &SurfaceId {
        &self.config.active_surface_id
    }

    /// Monotonically increasing edit counter, bumped on every mutation.
    /// Used by the persistence layer's staleness check.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history_pointer(&self) -> usize {
        self.history.pointer()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- mutations ---

    /// Adds a node at `(x, y)`, attaching it to the active surface and
    /// committing a history snapshot. Always succeeds; returns the new id.
    pub fn add_node(&mut self, x: f64, y: f64, kind: NodeKind) -> NodeId {
        let id = self.generate_id();
        let node = Node::new(id, self.config.active_surface_id.clone(), x, y, kind);
        debug!(id, surface = %node.surface_id, "add node");
        self.nodes.push(node);
        self.touch();
        self.commit();
        id
    }

    /// Adds a node and places it at the center of the active surface's
    /// printable area.
    pub fn add_node_centered(&mut self, kind: NodeKind) -> NodeId {
        let area = self
            .surface(&self.config.active_surface_id.clone())
            .map(|s| s.area)
            .unwrap_or(Rect::new(0.0, 0.0, self.config.width, self.config.height));
        let bounds_probe = Node::new(0, String::new(), 0.0, 0.0, kind.clone()).bounds();
        let x = area.x + (area.w - bounds_probe.w) / 2.0;
        let y = area.y + (area.h - bounds_probe.h) / 2.0;
        self.add_node(x, y, kind)
    }

    /// Merges `patch` into the node and commits a snapshot.
    pub fn update_node(&mut self, id: NodeId, patch: &NodePatch) -> Result<()> {
        self.apply_patch(id, patch)?;
        self.commit();
        Ok(())
    }

    /// Merges `patch` without committing history. Used for the stream of
    /// intermediate updates inside a drag/paint gesture; the gesture ends
    /// with `commit_gesture()`.
    pub fn update_node_provisional(&mut self, id: NodeId, patch: &NodePatch) -> Result<()> {
        self.apply_patch(id, patch)
    }

    /// Appends a point to a path node without committing history.
    /// Fails with `NodeNotFound` for missing ids or non-path nodes.
    pub fn append_path_point(&mut self, id: NodeId, p: Point) -> Result<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(DesignError::NodeNotFound { id })?;
        match &mut node.kind {
            NodeKind::Path(path) => {
                path.push_point(p);
                self.touch();
                Ok(())
            }
            _ => Err(DesignError::NodeNotFound { id }),
        }
    }

    /// Commits the current state as one snapshot. Terminal step of a
    /// continuous gesture; costs one snapshot no matter how many
    /// provisional updates the gesture made.
    pub fn commit_gesture(&mut self) {
        self.commit();
    }

    /// Deletes a node and commits a snapshot. The node is also removed
    /// from the selection so selection entries always reference nodes.
    pub fn delete_node(&mut self, id: NodeId) -> Result<()> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(DesignError::NodeNotFound { id })?;
        self.nodes.remove(index);
        self.selection.remove(&id);
        debug!(id, "delete node");
        self.touch();
        self.commit();
        Ok(())
    }

    /// Selects a node; replaces the selection unless `additive`.
    /// Selection changes never touch undo history.
    pub fn select_node(&mut self, id: NodeId, additive: bool) -> Result<()> {
        if self.node(id).is_none() {
            return Err(DesignError::NodeNotFound { id });
        }
        if !additive {
            self.selection.clear();
        }
        self.selection.insert(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Steps back to the previous committed snapshot. No-op at the
    /// oldest entry. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.history.undo() {
            self.nodes = snapshot.nodes.clone();
            self.selection = snapshot.selection.clone();
            self.touch();
            true
        } else {
            false
        }
    }

    /// Steps forward to the next committed snapshot. No-op at the newest.
    pub fn redo(&mut self) -> bool {
        if let Some(snapshot) = self.history.redo() {
            self.nodes = snapshot.nodes.clone();
            self.selection = snapshot.selection.clone();
            self.touch();
            true
        } else {
            false
        }
    }

    /// Replaces every exact occurrence of `from` across all node
    /// fills/strokes and commits one snapshot. Returns the number of
    /// fields rewritten.
    pub fn replace_color(&mut self, from: crate::model::Color, to: crate::model::Color) -> usize {
        let mut replaced = 0;
        for node in &mut self.nodes {
            replaced += node.kind.replace_color(from, to);
        }
        if replaced > 0 {
            self.touch();
            self.commit();
        }
        replaced
    }

    // --- internals ---

    fn generate_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn apply_patch(&mut self, id: NodeId, patch: &NodePatch) -> Result<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(DesignError::NodeNotFound { id })?;
        patch.apply_to(node);
        self.touch();
        Ok(())
    }

    fn commit(&mut self) {
        self.history.commit(Snapshot {
            nodes: self.nodes.clone(),
            selection: self.selection.clone(),
        });
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Replaces node content from a loaded document file. Only the
    /// serialization layer calls this, after the staleness check passed.
    /// The restored state becomes the new undo baseline, and the revision
    /// counter resumes from the file's captured revision so it stays
    /// monotonic across save/load cycles.
    pub(crate) fn restore_content_from_file(
        &mut self,
        nodes: Vec<Node>,
        next_id: NodeId,
        base_revision: u64,
    ) {
        self.nodes = nodes;
        self.selection.clear();
        self.next_id = next_id;
        self.history = HistoryStack::new(Snapshot {
            nodes: self.nodes.clone(),
            selection: HashSet::new(),
        });
        self.revision = self.revision.max(base_revision);
        self.touch();
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::with_default_surfaces()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, ShapeKind, ShapeNode};

    fn shape() -> NodeKind {
        NodeKind::Shape(ShapeNode::new(
            ShapeKind::Rect,
            100.0,
            50.0,
            Color::new(255, 0, 0),
        ))
    }

    #[test]
    fn test_add_node_tags_active_surface() {
        let mut store = DocumentStore::with_default_surfaces();
        let id = store.add_node(10.0, 10.0, shape());
        assert_eq!(store.node(id).unwrap().surface_id, "front");
    }

    #[test]
    fn test_update_missing_node_fails_cleanly() {
        let mut store = DocumentStore::with_default_surfaces();
        let revision = store.revision();
        let err = store.update_node(99, &NodePatch::move_to(0.0, 0.0));
        assert_eq!(err, Err(DesignError::NodeNotFound { id: 99 }));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_add_then_undo_leaves_empty_document() {
        let mut store = DocumentStore::with_default_surfaces();
        let pointer_before = store.history_pointer();
        store.add_node(0.0, 0.0, shape());
        assert!(store.undo());
        assert_eq!(store.node_count(), 0);
        assert_eq!(store.history_pointer(), pointer_before);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut store = DocumentStore::with_default_surfaces();
        let id = store.add_node(5.0, 5.0, shape());
        store.update_node(id, &NodePatch::move_to(50.0, 60.0)).unwrap();

        assert!(store.undo());
        let node = store.node(id).unwrap();
        assert_eq!((node.x, node.y), (5.0, 5.0));

        assert!(store.redo());
        let node = store.node(id).unwrap();
        assert_eq!((node.x, node.y), (50.0, 60.0));
    }

    #[test]
    fn test_provisional_updates_commit_one_snapshot() {
        let mut store = DocumentStore::with_default_surfaces();
        let id = store.add_node(0.0, 0.0, shape());
        let len_before = store.history_len();

        for i in 1..=20 {
            store
                .update_node_provisional(id, &NodePatch::move_to(i as f64, 0.0))
                .unwrap();
        }
        assert_eq!(store.history_len(), len_before);
        store.commit_gesture();
        assert_eq!(store.history_len(), len_before + 1);

        // One undo reverts the whole drag.
        assert!(store.undo());
        assert_eq!(store.node(id).unwrap().x, 0.0);
    }

    #[test]
    fn test_delete_removes_from_selection() {
        let mut store = DocumentStore::with_default_surfaces();
        let id = store.add_node(0.0, 0.0, shape());
        store.select_node(id, false).unwrap();
        store.delete_node(id).unwrap();
        assert!(store.selection().is_empty());
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn test_selection_does_not_touch_history() {
        let mut store = DocumentStore::with_default_surfaces();
        let id = store.add_node(0.0, 0.0, shape());
        let len = store.history_len();
        store.select_node(id, false).unwrap();
        store.clear_selection();
        assert_eq!(store.history_len(), len);
    }

    #[test]
    fn test_redo_noop_at_tip() {
        let mut store = DocumentStore::with_default_surfaces();
        store.add_node(0.0, 0.0, shape());
        assert!(!store.redo());
    }
}
