//! Color and print-readiness analysis.
//!
//! A pull-based, read-only view over the document: extracts the distinct
//! ink colors in use, checks each against the reference swatch table,
//! and reports color-budget and gamut warnings. Nothing here mutates the
//! document; the one fix action (`replace_color`) lives on the store.
//!
//! Gamut metric: squared Euclidean distance in RGB8 space against the
//! nearest swatch, flagged when the plain distance exceeds
//! `GAMUT_TOLERANCE`. Deliberately simple and deterministic.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use garmentkit_core::constants::{
    EMBROIDERY_COLOR_BUDGET, GAMUT_TOLERANCE, SCREEN_PRINT_COLOR_BUDGET,
};

use crate::document::DocumentStore;
use crate::model::{Color, Node};

/// How the design will be put onto the garment. Spot-color methods carry
/// a distinct-color budget; full-color methods do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintMethod {
    ScreenPrint,
    /// Direct-to-garment; full color, no budget.
    FullColor,
    Embroidery,
}

impl PrintMethod {
    /// Distinct-color budget, `None` when unlimited.
    pub fn color_budget(&self) -> Option<u32> {
        match self {
            PrintMethod::ScreenPrint => Some(SCREEN_PRINT_COLOR_BUDGET),
            PrintMethod::FullColor => None,
            PrintMethod::Embroidery => Some(EMBROIDERY_COLOR_BUDGET),
        }
    }
}

impl fmt::Display for PrintMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintMethod::ScreenPrint => write!(f, "screen print"),
            PrintMethod::FullColor => write!(f, "full color"),
            PrintMethod::Embroidery => write!(f, "embroidery"),
        }
    }
}

/// One entry of the reference swatch table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Swatch {
    pub name: &'static str,
    pub color: Color,
}

const fn swatch(name: &'static str, r: u8, g: u8, b: u8) -> Swatch {
    Swatch {
        name,
        color: Color { r, g, b },
    }
}

/// Reference ink/thread swatches. A content asset: the analysis contract
/// only requires a fixed table and a consistent metric.
pub const SWATCHES: &[Swatch] = &[
    swatch("White", 255, 255, 255),
    swatch("Black", 0, 0, 0),
    swatch("Cool Gray", 145, 150, 155),
    swatch("Silver", 200, 200, 205),
    swatch("Cardinal Red", 196, 30, 58),
    swatch("Fire Red", 226, 35, 26),
    swatch("Maroon", 110, 28, 52),
    swatch("Orange", 255, 105, 0),
    swatch("Tangerine", 247, 127, 0),
    swatch("Gold", 255, 182, 18),
    swatch("Lemon Yellow", 254, 221, 0),
    swatch("Kelly Green", 0, 122, 51),
    swatch("Forest Green", 34, 79, 51),
    swatch("Mint", 152, 255, 152),
    swatch("Teal", 0, 128, 128),
    swatch("Sky Blue", 118, 181, 229),
    swatch("Royal Blue", 0, 64, 152),
    swatch("Navy", 19, 41, 75),
    swatch("Purple", 105, 53, 156),
    swatch("Violet", 143, 80, 199),
    swatch("Hot Pink", 255, 105, 180),
    swatch("Blush", 222, 93, 131),
    swatch("Chocolate", 92, 64, 51),
    swatch("Khaki", 195, 176, 145),
];

/// Returns the nearest swatch and its squared RGB distance.
pub fn nearest_swatch(color: &Color) -> (&'static Swatch, f64) {
    let mut best = &SWATCHES[0];
    let mut best_dist = f64::INFINITY;
    for entry in SWATCHES {
        let d = color.distance_sq(&entry.color);
        if d < best_dist {
            best = entry;
            best_dist = d;
        }
    }
    (best, best_dist)
}

/// Non-blocking print-readiness warning. Attached to analysis, pricing,
/// and export results; never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorWarning {
    /// A used color sits outside the reference gamut; it may not print
    /// accurately. Carries the closest swatch as a suggested fix.
    OutOfGamut {
        color: Color,
        distance: f64,
        suggestion: Color,
        suggestion_name: &'static str,
    },
    /// Distinct colors across enabled surfaces exceed the method budget.
    ExceedsColorBudget { count: usize, budget: u32 },
    /// One surface exceeds its own `max_colors` cap.
    ExceedsSurfaceBudget {
        surface_id: String,
        count: usize,
        budget: u32,
    },
}

impl fmt::Display for ColorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorWarning::OutOfGamut {
                color,
                suggestion,
                suggestion_name,
                ..
            } => write!(
                f,
                "{} may not print accurately; nearest swatch is {} ({})",
                color, suggestion_name, suggestion
            ),
            ColorWarning::ExceedsColorBudget { count, budget } => write!(
                f,
                "{} distinct colors exceed the {}-color budget",
                count, budget
            ),
            ColorWarning::ExceedsSurfaceBudget {
                surface_id,
                count,
                budget,
            } => write!(
                f,
                "surface '{}' uses {} colors, capped at {}",
                surface_id, count, budget
            ),
        }
    }
}

/// Result of a color/print-readiness pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorAnalysis {
    /// Distinct colors in first-seen order.
    pub distinct_colors: Vec<Color>,
    pub warnings: Vec<ColorWarning>,
}

impl ColorAnalysis {
    pub fn color_count(&self) -> usize {
        self.distinct_colors.len()
    }

    pub fn is_print_ready(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Distinct fill/stroke colors over a node set, first-seen order.
/// De-duplication is exact on RGB8, which hex parsing already normalized
/// case-insensitively.
pub fn distinct_colors<'a>(nodes: impl Iterator<Item = &'a Node>) -> Vec<Color> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for node in nodes {
        for color in node.kind.colors() {
            if seen.insert(color) {
                out.push(color);
            }
        }
    }
    out
}

/// Analyzes the nodes of every *enabled* surface under `method`.
pub fn analyze(store: &DocumentStore, method: PrintMethod) -> ColorAnalysis {
    let enabled: HashSet<&str> = store
        .surfaces()
        .iter()
        .filter(|s| s.enabled)
        .map(|s| s.id.as_str())
        .collect();
    let nodes = store
        .nodes()
        .iter()
        .filter(|n| enabled.contains(n.surface_id.as_str()));

    let distinct = distinct_colors(nodes);
    let mut warnings = Vec::new();

    for color in &distinct {
        let (swatch, dist_sq) = nearest_swatch(color);
        if dist_sq > GAMUT_TOLERANCE * GAMUT_TOLERANCE {
            warnings.push(ColorWarning::OutOfGamut {
                color: *color,
                distance: dist_sq.sqrt(),
                suggestion: swatch.color,
                suggestion_name: swatch.name,
            });
        }
    }

    if let Some(budget) = method.color_budget() {
        if distinct.len() > budget as usize {
            warnings.push(ColorWarning::ExceedsColorBudget {
                count: distinct.len(),
                budget,
            });
        }
    }

    for surface in store.surfaces().iter().filter(|s| s.enabled) {
        if let Some(cap) = surface.max_colors {
            let count = distinct_colors(
                store
                    .nodes()
                    .iter()
                    .filter(|n| n.surface_id == surface.id),
            )
            .len();
            if count > cap as usize {
                warnings.push(ColorWarning::ExceedsSurfaceBudget {
                    surface_id: surface.id.clone(),
                    count,
                    budget: cap,
                });
            }
        }
    }

    ColorAnalysis {
        distinct_colors: distinct,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeKind, ShapeKind, ShapeNode};
    use crate::surfaces::SurfaceManager;

    fn add_shape(store: &mut DocumentStore, color: Color) {
        store.add_node(
            0.0,
            0.0,
            NodeKind::Shape(ShapeNode::new(ShapeKind::Rect, 10.0, 10.0, color)),
        );
    }

    #[test]
    fn test_swatch_colors_pass_gamut() {
        let mut store = DocumentStore::with_default_surfaces();
        add_shape(&mut store, Color::new(0, 64, 152)); // Royal Blue, exact
        let analysis = analyze(&store, PrintMethod::ScreenPrint);
        assert!(analysis.is_print_ready());
        assert_eq!(analysis.color_count(), 1);
    }

    #[test]
    fn test_out_of_gamut_suggests_nearest() {
        let mut store = DocumentStore::with_default_surfaces();
        // Saturated green far from every swatch.
        add_shape(&mut store, Color::new(0, 255, 0));
        let analysis = analyze(&store, PrintMethod::FullColor);
        assert_eq!(analysis.warnings.len(), 1);
        match &analysis.warnings[0] {
            ColorWarning::OutOfGamut {
                distance,
                suggestion_name,
                ..
            } => {
                assert!(*distance > GAMUT_TOLERANCE);
                assert_eq!(*suggestion_name, "Kelly Green");
            }
            other => panic!("expected out-of-gamut, got {:?}", other),
        }
    }

    #[test]
    fn test_budget_counts_across_enabled_surfaces() {
        let mut store = DocumentStore::with_default_surfaces();
        let manager = SurfaceManager::new();

        // 4 colors on the front, 4 on the back, 6 distinct combined.
        let shared = [Color::new(0, 0, 0), Color::new(255, 255, 255)];
        let front = [Color::new(196, 30, 58), Color::new(255, 182, 18)];
        let back = [Color::new(0, 122, 51), Color::new(19, 41, 75)];
        for c in shared.iter().chain(front.iter()) {
            add_shape(&mut store, *c);
        }
        manager.switch_active_surface(&mut store, "back").unwrap();
        for c in shared.iter().chain(back.iter()) {
            add_shape(&mut store, *c);
        }

        let analysis = analyze(&store, PrintMethod::ScreenPrint);
        assert_eq!(analysis.color_count(), 6);
        assert!(analysis.is_print_ready());

        // A 7th distinct color anywhere tips the budget.
        add_shape(&mut store, Color::new(105, 53, 156));
        let analysis = analyze(&store, PrintMethod::ScreenPrint);
        assert!(analysis
            .warnings
            .iter()
            .any(|w| matches!(w, ColorWarning::ExceedsColorBudget { count: 7, budget: 6 })));
    }

    #[test]
    fn test_disabled_surface_excluded() {
        let mut store = DocumentStore::with_default_surfaces();
        let manager = SurfaceManager::new();
        manager.switch_active_surface(&mut store, "back").unwrap();
        add_shape(&mut store, Color::new(0, 0, 0));
        manager.toggle_surface_visibility(&mut store, "back").unwrap();

        let analysis = analyze(&store, PrintMethod::ScreenPrint);
        assert_eq!(analysis.color_count(), 0);
    }

    #[test]
    fn test_full_color_has_no_budget() {
        assert_eq!(PrintMethod::FullColor.color_budget(), None);
    }
}
