//! Garment catalog collaborator.
//!
//! Given a garment type, color, and view, the catalog returns a
//! reference image locator plus the print-area metadata used to seed a
//! `PrintSurface`. Image generation and hosting are out of scope; the
//! built-in catalog serves a static table at 300 dpi.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use garmentkit_core::{DesignError, Dpi, Result};

use crate::document::GarmentType;
use crate::model::Rect;

/// One printable view of a garment as the catalog describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentView {
    /// Locator of the reference/mockup image.
    pub image_ref: String,
    /// Printable pixel box within the reference image.
    pub print_area: Rect,
    pub dpi: Dpi,
    /// Safe-area inset fraction recommended for this view.
    pub safe_area_percent: f64,
}

/// Source of garment reference imagery and print-area metadata.
#[async_trait]
pub trait GarmentCatalog: Send + Sync {
    /// Resolves the view metadata for `(garment, color, view)`.
    /// `view` is a surface-style name: "front", "back", "left-sleeve".
    async fn view(&self, garment: GarmentType, color: &str, view: &str) -> Result<GarmentView>;
}

struct CatalogEntry {
    garment: GarmentType,
    view: &'static str,
    print_area: Rect,
    safe_area_percent: f64,
}

const fn entry(
    garment: GarmentType,
    view: &'static str,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    safe_area_percent: f64,
) -> CatalogEntry {
    CatalogEntry {
        garment,
        view,
        print_area: Rect { x, y, w, h },
        safe_area_percent,
    }
}

/// Print areas in pixels at 300 dpi (12"x16" body platen, smaller caps
/// and sleeves).
static CATALOG: &[CatalogEntry] = &[
    entry(GarmentType::TShirt, "front", 0.0, 0.0, 3600.0, 4800.0, 0.05),
    entry(GarmentType::TShirt, "back", 0.0, 0.0, 3600.0, 4800.0, 0.05),
    entry(GarmentType::TShirt, "left-sleeve", 0.0, 0.0, 1050.0, 1050.0, 0.08),
    entry(GarmentType::TShirt, "right-sleeve", 0.0, 0.0, 1050.0, 1050.0, 0.08),
    entry(GarmentType::LongSleeve, "front", 0.0, 0.0, 3600.0, 4800.0, 0.05),
    entry(GarmentType::LongSleeve, "back", 0.0, 0.0, 3600.0, 4800.0, 0.05),
    entry(GarmentType::LongSleeve, "left-sleeve", 0.0, 0.0, 1050.0, 4200.0, 0.08),
    entry(GarmentType::LongSleeve, "right-sleeve", 0.0, 0.0, 1050.0, 4200.0, 0.08),
    entry(GarmentType::Hoodie, "front", 0.0, 0.0, 3600.0, 3600.0, 0.06),
    entry(GarmentType::Hoodie, "back", 0.0, 0.0, 3600.0, 4800.0, 0.05),
    entry(GarmentType::ToteBag, "front", 0.0, 0.0, 3000.0, 3600.0, 0.05),
    entry(GarmentType::ToteBag, "back", 0.0, 0.0, 3000.0, 3600.0, 0.05),
    entry(GarmentType::Cap, "front", 0.0, 0.0, 1500.0, 750.0, 0.10),
];

/// Built-in catalog backed by the static table above.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GarmentCatalog for StaticCatalog {
    async fn view(&self, garment: GarmentType, color: &str, view: &str) -> Result<GarmentView> {
        let found = CATALOG
            .iter()
            .find(|e| e.garment == garment && e.view == view)
            .ok_or_else(|| DesignError::Catalog {
                message: format!("no view '{view}' for {garment:?}"),
            })?;
        Ok(GarmentView {
            image_ref: format!(
                "catalog://{}/{}/{}.png",
                serde_json::to_value(garment)
                    .map(|v| v.as_str().unwrap_or("garment").to_string())
                    .unwrap_or_default(),
                color,
                view
            ),
            print_area: found.print_area,
            dpi: Dpi::PRINT,
            safe_area_percent: found.safe_area_percent,
        })
    }
}
