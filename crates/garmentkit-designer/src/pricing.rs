//! Price quoting.
//!
//! `quote` is a pure function of `(document, method, quantity)`: equal
//! inputs produce bit-identical breakdowns, which keeps quotes cacheable
//! and testable. Analyzer warnings ride along on the breakdown instead
//! of being dropped.

use serde::Serialize;

use garmentkit_core::constants::{
    DISCOUNT_RATE_FIRST, DISCOUNT_RATE_SECOND, PER_COLOR_RATE, PER_SURFACE_RATE, PRINT_SETUP_FEE,
    QUANTITY_BREAK_FIRST, QUANTITY_BREAK_SECOND,
};

use crate::color_analysis::{self, ColorWarning, PrintMethod};
use crate::document::DocumentStore;

/// Itemized price quote for one document at one quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub print_setup_fee: f64,
    pub color_charges: f64,
    pub surface_charges: f64,
    /// Distinct colors across enabled surfaces, as charged.
    pub color_count: usize,
    pub enabled_surface_count: usize,
    pub quantity: u32,
    pub discount_rate: f64,
    pub total_price: f64,
    pub price_per_unit: f64,
    /// Print-readiness warnings from the color analyzer.
    pub warnings: Vec<ColorWarning>,
}

/// Tiered quantity discount: none below the first breakpoint, rate A up
/// to the second, rate B from there on.
fn discount_rate(quantity: u32) -> f64 {
    if quantity >= QUANTITY_BREAK_SECOND {
        DISCOUNT_RATE_SECOND
    } else if quantity >= QUANTITY_BREAK_FIRST {
        DISCOUNT_RATE_FIRST
    } else {
        0.0
    }
}

/// Computes the quote for `quantity` garments.
///
/// Colors and surfaces are counted over enabled surfaces only; the
/// first color and the first surface are included in the base price.
pub fn quote(store: &DocumentStore, method: PrintMethod, quantity: u32) -> PriceBreakdown {
    let analysis = color_analysis::analyze(store, method);
    let color_count = analysis.color_count();
    let enabled_surface_count = store.surfaces().iter().filter(|s| s.enabled).count();

    let base_price = store.config().garment_type.base_price();
    let color_charges = (color_count.saturating_sub(1)) as f64 * PER_COLOR_RATE;
    let surface_charges = (enabled_surface_count.saturating_sub(1)) as f64 * PER_SURFACE_RATE;
    let rate = discount_rate(quantity);

    let total_price = (base_price + PRINT_SETUP_FEE + color_charges + surface_charges)
        * quantity as f64
        * (1.0 - rate);
    let price_per_unit = if quantity > 0 {
        total_price / quantity as f64
    } else {
        0.0
    };

    PriceBreakdown {
        base_price,
        print_setup_fee: PRINT_SETUP_FEE,
        color_charges,
        surface_charges,
        color_count,
        enabled_surface_count,
        quantity,
        discount_rate: rate,
        total_price,
        price_per_unit,
        warnings: analysis.warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, NodeKind, ShapeKind, ShapeNode};
    use crate::surfaces::SurfaceManager;

    fn add_shape(store: &mut DocumentStore, color: Color) {
        store.add_node(
            0.0,
            0.0,
            NodeKind::Shape(ShapeNode::new(ShapeKind::Rect, 10.0, 10.0, color)),
        );
    }

    /// Empty document, one enabled surface, quantity 1: only base price
    /// and setup fee.
    #[test]
    fn test_empty_document_minimal_quote() {
        let mut store = DocumentStore::with_default_surfaces();
        SurfaceManager::new()
            .toggle_surface_visibility(&mut store, "back")
            .unwrap();

        let breakdown = quote(&store, PrintMethod::ScreenPrint, 1);
        assert_eq!(breakdown.color_charges, 0.0);
        assert_eq!(breakdown.surface_charges, 0.0);
        assert_eq!(breakdown.discount_rate, 0.0);
        assert_eq!(
            breakdown.total_price,
            breakdown.base_price + breakdown.print_setup_fee
        );
        assert_eq!(breakdown.price_per_unit, breakdown.total_price);
    }

    #[test]
    fn test_color_and_surface_charges() {
        let mut store = DocumentStore::with_default_surfaces();
        add_shape(&mut store, Color::new(0, 0, 0));
        add_shape(&mut store, Color::new(255, 255, 255));
        add_shape(&mut store, Color::new(196, 30, 58));

        let breakdown = quote(&store, PrintMethod::ScreenPrint, 1);
        assert_eq!(breakdown.color_count, 3);
        assert_eq!(breakdown.color_charges, 2.0 * PER_COLOR_RATE);
        assert_eq!(breakdown.enabled_surface_count, 2);
        assert_eq!(breakdown.surface_charges, PER_SURFACE_RATE);
    }

    #[test]
    fn test_discount_boundaries() {
        let store = DocumentStore::with_default_surfaces();
        assert_eq!(quote(&store, PrintMethod::ScreenPrint, 1).discount_rate, 0.0);
        assert_eq!(
            quote(&store, PrintMethod::ScreenPrint, QUANTITY_BREAK_FIRST - 1).discount_rate,
            0.0
        );
        assert_eq!(
            quote(&store, PrintMethod::ScreenPrint, QUANTITY_BREAK_FIRST).discount_rate,
            DISCOUNT_RATE_FIRST
        );
        assert_eq!(
            quote(&store, PrintMethod::ScreenPrint, QUANTITY_BREAK_SECOND).discount_rate,
            DISCOUNT_RATE_SECOND
        );
        assert_eq!(
            quote(&store, PrintMethod::ScreenPrint, 10 * QUANTITY_BREAK_SECOND).discount_rate,
            DISCOUNT_RATE_SECOND
        );
    }

    #[test]
    fn test_determinism() {
        let mut store = DocumentStore::with_default_surfaces();
        add_shape(&mut store, Color::new(0, 255, 0));
        let a = quote(&store, PrintMethod::ScreenPrint, 25);
        let b = quote(&store, PrintMethod::ScreenPrint, 25);
        assert_eq!(a, b);
        assert_eq!(a.total_price.to_bits(), b.total_price.to_bits());
    }

    #[test]
    fn test_warnings_surface_on_breakdown() {
        let mut store = DocumentStore::with_default_surfaces();
        add_shape(&mut store, Color::new(0, 255, 0)); // out of gamut
        let breakdown = quote(&store, PrintMethod::ScreenPrint, 1);
        assert_eq!(breakdown.warnings.len(), 1);
    }
}
