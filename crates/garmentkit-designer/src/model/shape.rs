use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::{Color, Stroke};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Circle,
    Ellipse,
    Triangle,
}

/// A primitive filled shape sized by its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeNode {
    pub shape_kind: ShapeKind,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub stroke: Option<Stroke>,
}

impl ShapeNode {
    pub fn new(shape_kind: ShapeKind, width: f64, height: f64, fill: Color) -> Self {
        Self {
            shape_kind,
            width,
            height,
            fill,
            stroke: None,
        }
    }

    /// Outline length used for embroidery run estimation.
    ///
    /// The ellipse perimeter uses Ramanujan's approximation; a circle is
    /// the degenerate case with equal radii.
    pub fn perimeter(&self) -> f64 {
        let w = self.width;
        let h = self.height;
        match self.shape_kind {
            ShapeKind::Rect => 2.0 * (w + h),
            ShapeKind::Circle | ShapeKind::Ellipse => {
                let a = w / 2.0;
                let b = h / 2.0;
                let l = (a - b) / (a + b);
                if !l.is_finite() {
                    return 0.0;
                }
                let l2 = l * l;
                PI * (a + b) * (1.0 + 3.0 * l2 / (10.0 + (4.0 - 3.0 * l2).sqrt()))
            }
            ShapeKind::Triangle => {
                // Isosceles triangle inscribed in the bounding box.
                let base = w;
                let side = ((w / 2.0) * (w / 2.0) + h * h).sqrt();
                base + 2.0 * side
            }
        }
    }

    /// Smallest dimension of the shape, checked against the minimum
    /// embroiderable feature size.
    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }
}
