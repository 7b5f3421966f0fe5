use serde::{Deserialize, Serialize};

use super::Rect;

/// A placed raster image. The pixels live with the image-hosting
/// collaborator; the document stores only a locator and an optional crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageNode {
    pub source_ref: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub crop: Option<Rect>,
}

impl ImageNode {
    pub fn new(source_ref: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            source_ref: source_ref.into(),
            width,
            height,
            crop: None,
        }
    }

    pub fn extent(&self) -> (f64, f64) {
        match &self.crop {
            Some(crop) => (crop.w, crop.h),
            None => (self.width, self.height),
        }
    }
}
