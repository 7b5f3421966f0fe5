//! Integration tests for pricing, color analysis, and stitch estimation.

use garmentkit_designer::model::{Color, NodeKind, PathNode, Point, ShapeKind, ShapeNode, Stroke};
use garmentkit_designer::{
    color_analysis, embroidery, pricing, ColorWarning, DocumentStore, PrintMethod, SurfaceManager,
};

fn shape(fill: &str) -> NodeKind {
    NodeKind::Shape(ShapeNode::new(
        ShapeKind::Rect,
        200.0,
        200.0,
        Color::parse(fill).unwrap(),
    ))
}

#[test]
fn test_quote_empty_document_single_unit() {
    let mut store = DocumentStore::with_default_surfaces();
    let surfaces = SurfaceManager::new();
    // Leave only the front enabled.
    surfaces.toggle_surface_visibility(&mut store, "back").unwrap();

    let quote = pricing::quote(&store, PrintMethod::ScreenPrint, 1);
    // T-shirt base 12.00 plus the 5.00 setup fee; nothing else.
    assert_eq!(quote.color_charges, 0.0);
    assert_eq!(quote.surface_charges, 0.0);
    assert_eq!(quote.discount_rate, 0.0);
    assert!((quote.total_price - 17.0).abs() < 1e-9);
    assert!((quote.price_per_unit - 17.0).abs() < 1e-9);
}

#[test]
fn test_quote_colors_surfaces_and_discount() {
    let mut store = DocumentStore::with_default_surfaces();
    store.add_node(100.0, 100.0, shape("#000000"));
    store.add_node(400.0, 100.0, shape("#ffffff"));
    let surfaces = SurfaceManager::new();
    surfaces.switch_active_surface(&mut store, "back").unwrap();
    store.add_node(100.0, 100.0, shape("#dc143c"));

    let quote = pricing::quote(&store, PrintMethod::ScreenPrint, 25);
    assert_eq!(quote.color_count, 3);
    assert_eq!(quote.enabled_surface_count, 2);
    // 2 colors beyond the first, 1 surface beyond the first.
    assert!((quote.color_charges - 3.0).abs() < 1e-9);
    assert!((quote.surface_charges - 4.0).abs() < 1e-9);
    assert!((quote.discount_rate - 0.10).abs() < 1e-9);

    let per_unit = (12.0 + 5.0 + 3.0 + 4.0) * 0.90;
    assert!((quote.price_per_unit - per_unit).abs() < 1e-9);
    assert!((quote.total_price - per_unit * 25.0).abs() < 1e-9);
}

#[test]
fn test_discount_boundaries() {
    let store = DocumentStore::with_default_surfaces();
    for (quantity, rate) in [(1, 0.0), (9, 0.0), (10, 0.10), (49, 0.10), (50, 0.20), (500, 0.20)] {
        let quote = pricing::quote(&store, PrintMethod::ScreenPrint, quantity);
        assert_eq!(quote.discount_rate, rate, "quantity {}", quantity);
    }
}

#[test]
fn test_quote_is_deterministic() {
    let mut store = DocumentStore::with_default_surfaces();
    store.add_node(100.0, 100.0, shape("#1e90ff"));
    store.add_node(400.0, 100.0, shape("#ffd700"));

    let a = pricing::quote(&store, PrintMethod::ScreenPrint, 37);
    let b = pricing::quote(&store, PrintMethod::ScreenPrint, 37);
    assert_eq!(a.total_price.to_bits(), b.total_price.to_bits());
    assert_eq!(a, b);
}

#[test]
fn test_out_of_gamut_color_gets_swatch_suggestion() {
    let mut store = DocumentStore::with_default_surfaces();
    store.add_node(100.0, 100.0, shape("#00ff00"));

    let analysis = color_analysis::analyze(&store, PrintMethod::ScreenPrint);
    let warning = analysis
        .warnings
        .iter()
        .find_map(|w| match w {
            ColorWarning::OutOfGamut { suggestion_name, .. } => Some(suggestion_name.clone()),
            _ => None,
        })
        .expect("pure green should be out of gamut");
    assert_eq!(warning, "Kelly Green");
}

#[test]
fn test_color_budget_counts_across_enabled_surfaces() {
    let mut store = DocumentStore::with_default_surfaces();
    let surfaces = SurfaceManager::new();
    let palette = ["#000000", "#ffffff", "#dc143c", "#1e90ff", "#ffd700", "#808080"];

    for (i, hex) in palette.iter().take(3).enumerate() {
        store.add_node(100.0 * i as f64, 100.0, shape(hex));
    }
    surfaces.switch_active_surface(&mut store, "back").unwrap();
    for (i, hex) in palette.iter().skip(3).enumerate() {
        store.add_node(100.0 * i as f64, 100.0, shape(hex));
    }

    // Six distinct colors across two surfaces: at the budget, no warning.
    let analysis = color_analysis::analyze(&store, PrintMethod::ScreenPrint);
    assert!(!analysis
        .warnings
        .iter()
        .any(|w| matches!(w, ColorWarning::ExceedsColorBudget { .. })));

    // A seventh pushes it over.
    store.add_node(800.0, 100.0, shape("#f5deb3"));
    let analysis = color_analysis::analyze(&store, PrintMethod::ScreenPrint);
    assert!(analysis
        .warnings
        .iter()
        .any(|w| matches!(w, ColorWarning::ExceedsColorBudget { count: 7, budget: 6 })));

    // Full color imposes no budget.
    let analysis = color_analysis::analyze(&store, PrintMethod::FullColor);
    assert!(!analysis
        .warnings
        .iter()
        .any(|w| matches!(w, ColorWarning::ExceedsColorBudget { .. })));
}

#[test]
fn test_disabled_surface_colors_not_counted() {
    let mut store = DocumentStore::with_default_surfaces();
    let surfaces = SurfaceManager::new();
    surfaces.switch_active_surface(&mut store, "back").unwrap();
    store.add_node(100.0, 100.0, shape("#dc143c"));
    surfaces.toggle_surface_visibility(&mut store, "back").unwrap();

    let analysis = color_analysis::analyze(&store, PrintMethod::ScreenPrint);
    assert_eq!(analysis.color_count(), 0);
}

#[test]
fn test_replace_color_clears_gamut_warning() {
    let mut store = DocumentStore::with_default_surfaces();
    store.add_node(100.0, 100.0, shape("#00ff00"));

    let from = Color::parse("#00ff00").unwrap();
    let to = Color::parse("#007a33").unwrap(); // Kelly Green
    let replaced = store.replace_color(from, to);
    assert_eq!(replaced, 1);

    let analysis = color_analysis::analyze(&store, PrintMethod::ScreenPrint);
    assert!(analysis.is_print_ready());

    // The replacement is one undo step.
    assert!(store.undo());
    let analysis = color_analysis::analyze(&store, PrintMethod::ScreenPrint);
    assert!(!analysis.is_print_ready());
}

#[test]
fn test_stitch_estimate_from_path_length() {
    let mut store = DocumentStore::with_default_surfaces();
    // 600 px straight segment at 300 dpi = 50.8 mm.
    let mut path = PathNode::new(Stroke::new(Color::BLACK, 4.0));
    path.push_point(Point::new(0.0, 0.0));
    path.push_point(Point::new(600.0, 0.0));
    store.add_node(100.0, 100.0, NodeKind::Path(path));

    let estimate = embroidery::estimate(&store);
    // 50.8 / 2.5 = 20.32 stitches plus the 40-stitch trim overhead.
    assert_eq!(estimate.total_stitches, 60);
    assert!(estimate.violations.is_empty());
    assert!(estimate.estimated_run_time_min > 0.0);
}

#[test]
fn test_fine_stroke_reported_never_mutated() {
    let mut store = DocumentStore::with_default_surfaces();
    // 0.5 px stroke is far below the 1 mm minimum feature size.
    let mut path = PathNode::new(Stroke::new(Color::BLACK, 0.5));
    path.push_point(Point::new(0.0, 0.0));
    path.push_point(Point::new(300.0, 0.0));
    let id = store.add_node(100.0, 100.0, NodeKind::Path(path));

    let estimate = embroidery::estimate(&store);
    assert_eq!(estimate.violations, vec![id]);

    // The document is untouched by the analysis.
    match &store.node(id).unwrap().kind {
        NodeKind::Path(path) => assert_eq!(path.stroke.width, 0.5),
        other => panic!("expected a path node, got {:?}", other),
    }
}

#[test]
fn test_text_nodes_skipped_in_stitch_estimate() {
    let mut store = DocumentStore::with_default_surfaces();
    store.add_node(
        100.0,
        100.0,
        NodeKind::Text(garmentkit_designer::model::TextNode::new(
            "TEAM".to_string(),
            72.0,
        )),
    );

    let estimate = embroidery::estimate(&store);
    assert_eq!(estimate.total_stitches, 0);
}
