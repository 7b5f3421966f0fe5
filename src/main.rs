use tracing::info;

use garmentkit::designer::model::{Color, NodeKind, ShapeKind, ShapeNode};
use garmentkit::designer::{color_analysis, embroidery, pricing, serialization::DocumentFile};
use garmentkit::{
    init_logging, DocumentPersistence, DocumentStore, MemoryPersistence, PrintMethod, BUILD_DATE,
    VERSION,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!(version = VERSION, build_date = BUILD_DATE, "garmentkit");

    // Load a .gkit.json document if one is given, else build a demo.
    let store = match std::env::args().nth(1) {
        Some(path) => {
            let json = tokio::fs::read_to_string(&path).await?;
            let file = DocumentFile::from_json(&json)?;
            info!(%path, nodes = file.nodes.len(), "document loaded");
            file.into_store()
        }
        None => demo_store(),
    };

    let analysis = color_analysis::analyze(&store, PrintMethod::ScreenPrint);
    for warning in &analysis.warnings {
        println!("warning: {}", warning);
    }

    let breakdown = pricing::quote(&store, PrintMethod::ScreenPrint, 25);
    println!("{}", serde_json::to_string_pretty(&breakdown)?);

    let estimate = embroidery::estimate(&store);
    println!(
        "embroidery: {} stitches, {}",
        estimate.total_stitches,
        estimate.run_time_display()
    );

    // Round-trip through the in-memory persistence backend.
    let persistence = MemoryPersistence::new();
    let file = DocumentFile::capture(&store, "report");
    let id = persistence.save(&file).await?;
    let loaded = persistence.load(&id).await?;
    info!(id = %id, nodes = loaded.nodes.len(), "document saved and reloaded");

    Ok(())
}

fn demo_store() -> DocumentStore {
    let mut store = DocumentStore::with_default_surfaces();
    store.add_node(
        600.0,
        800.0,
        NodeKind::Shape(ShapeNode::new(
            ShapeKind::Circle,
            400.0,
            400.0,
            Color::new(30, 144, 255),
        )),
    );
    store.add_node(
        300.0,
        1600.0,
        NodeKind::Shape(ShapeNode::new(
            ShapeKind::Rect,
            900.0,
            300.0,
            Color::WHITE,
        )),
    );
    store
}
