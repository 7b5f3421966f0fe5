//! Document type definitions: CanvasConfig, GarmentType, PrintSurface,
//! Snapshot, NodePatch.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use garmentkit_core::Dpi;

use crate::model::{Node, NodeId, NodeKind, Rect, SurfaceId};

/// Garment being designed on; drives base pricing and catalog lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentType {
    TShirt,
    LongSleeve,
    Hoodie,
    ToteBag,
    Cap,
}

impl GarmentType {
    /// Blank-garment base price in currency units.
    pub fn base_price(&self) -> f64 {
        match self {
            GarmentType::TShirt => 12.0,
            GarmentType::LongSleeve => 16.0,
            GarmentType::Hoodie => 28.0,
            GarmentType::ToteBag => 9.0,
            GarmentType::Cap => 11.0,
        }
    }
}

/// Canvas-level configuration for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Document width in pixels.
    pub width: f64,
    /// Document height in pixels.
    pub height: f64,
    pub dpi: Dpi,
    pub garment_type: GarmentType,
    /// The surface new nodes are attached to.
    pub active_surface_id: SurfaceId,
    pub show_guides: bool,
    /// Safe-area inset as a fraction of the surface size per edge.
    pub safe_area_percent: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 2400.0,
            height: 3000.0,
            dpi: Dpi::PRINT,
            garment_type: GarmentType::TShirt,
            active_surface_id: "front".to_string(),
            show_guides: true,
            safe_area_percent: 0.05,
        }
    }
}

/// One independently toggleable design region of the garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintSurface {
    pub id: SurfaceId,
    pub name: String,
    pub enabled: bool,
    /// Printable area in document pixels.
    pub area: Rect,
    /// Per-surface color cap, when the print method imposes one.
    #[serde(default)]
    pub max_colors: Option<u32>,
    /// Safe-area inset for this surface; falls back to the canvas-wide
    /// fraction when unset. Catalog-sourced surfaces carry their own.
    #[serde(default)]
    pub safe_area_percent: Option<f64>,
}

impl PrintSurface {
    pub fn new(id: impl Into<SurfaceId>, name: impl Into<String>, area: Rect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            area,
            max_colors: None,
            safe_area_percent: None,
        }
    }
}

/// Immutable copy of node state taken at a committed mutation boundary.
///
/// Undo/redo restore these wholesale; selection is carried so restored
/// selections always reference restored nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<Node>,
    pub selection: HashSet<NodeId>,
}

/// Partial update applied to a node by `update_node`. Unset fields are
/// left untouched; `kind` replaces the payload wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub locked: Option<bool>,
    pub name: Option<String>,
    pub kind: Option<NodeKind>,
}

impl NodePatch {
    /// Patch that moves a node to an absolute position.
    pub fn move_to(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn apply_to(&self, node: &mut Node) {
        if let Some(x) = self.x {
            node.x = x;
        }
        if let Some(y) = self.y {
            node.y = y;
        }
        if let Some(rotation) = self.rotation {
            node.rotation = rotation;
        }
        if let Some(opacity) = self.opacity {
            node.opacity = opacity;
        }
        if let Some(locked) = self.locked {
            node.locked = locked;
        }
        if let Some(name) = &self.name {
            node.name = name.clone();
        }
        if let Some(kind) = &self.kind {
            node.kind = kind.clone();
        }
    }
}
