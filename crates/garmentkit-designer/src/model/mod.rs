use serde::{Deserialize, Serialize};
use std::fmt;

use garmentkit_core::{DesignError, Result};

mod image;
mod path;
mod shape;
mod text;

pub use image::ImageNode;
pub use path::PathNode;
pub use shape::{ShapeKind, ShapeNode};
pub use text::{TextAlign, TextNode};

/// Identifier of a node within one document.
pub type NodeId = u64;

/// Identifier of a print surface ("front", "back", "left-sleeve", ...).
pub type SurfaceId = String;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle in document space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.w <= self.x + self.w
            && other.y + other.h <= self.y + self.h
    }

    /// Shrinks the rectangle by `fraction` of its size on every edge.
    pub fn inset_fraction(&self, fraction: f64) -> Rect {
        let dx = self.w * fraction;
        let dy = self.h * fraction;
        Rect::new(self.x + dx, self.y + dy, self.w - 2.0 * dx, self.h - 2.0 * dy)
    }
}

/// An sRGB color stored as 8-bit channels.
///
/// Parsed from `#rrggbb` or `#rgb` hex, case-insensitive; always
/// serialized back as lowercase `#rrggbb`, which makes hex comparison a
/// plain equality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color value. Accepts `#rrggbb` and `#rgb`, with or
    /// without the leading `#`, any case.
    pub fn parse(value: &str) -> Result<Self> {
        let hex = value.trim().trim_start_matches('#');
        let invalid = || DesignError::InvalidColor {
            value: value.to_string(),
        };
        // Byte-index slicing below requires single-byte chars.
        if !hex.is_ascii() {
            return Err(invalid());
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
                let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
                let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
                Ok(Self { r, g, b })
            }
            3 => {
                let d = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid());
                let (r, g, b) = (d(0)?, d(1)?, d(2)?);
                Ok(Self {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            _ => Err(invalid()),
        }
    }

    /// Squared Euclidean distance in RGB8 space.
    pub fn distance_sq(&self, other: &Color) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        dr * dr + dg * dg + db * db
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Stroke style shared by path and shape nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    /// Width in document pixels.
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 2.0,
        }
    }
}

/// Per-kind payload of a node. Exhaustive: adding a kind forces every
/// consuming match to be updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Path(PathNode),
    Text(TextNode),
    Shape(ShapeNode),
    Image(ImageNode),
}

impl NodeKind {
    /// Human-readable default name for a freshly created node.
    pub fn default_name(&self) -> &'static str {
        match self {
            NodeKind::Path(_) => "Path",
            NodeKind::Text(_) => "Text",
            NodeKind::Shape(_) => "Shape",
            NodeKind::Image(_) => "Image",
        }
    }

    /// Every fill/stroke color carried by this payload.
    pub fn colors(&self) -> Vec<Color> {
        match self {
            NodeKind::Path(p) => vec![p.stroke.color],
            NodeKind::Text(t) => vec![t.fill],
            NodeKind::Shape(s) => {
                let mut colors = vec![s.fill];
                if let Some(stroke) = &s.stroke {
                    colors.push(stroke.color);
                }
                colors
            }
            NodeKind::Image(_) => Vec::new(),
        }
    }

    /// Replaces every exact occurrence of `from` in fills/strokes.
    /// Returns the number of fields rewritten.
    pub fn replace_color(&mut self, from: Color, to: Color) -> usize {
        let mut replaced = 0;
        match self {
            NodeKind::Path(p) => {
                if p.stroke.color == from {
                    p.stroke.color = to;
                    replaced += 1;
                }
            }
            NodeKind::Text(t) => {
                if t.fill == from {
                    t.fill = to;
                    replaced += 1;
                }
            }
            NodeKind::Shape(s) => {
                if s.fill == from {
                    s.fill = to;
                    replaced += 1;
                }
                if let Some(stroke) = &mut s.stroke {
                    if stroke.color == from {
                        stroke.color = to;
                        replaced += 1;
                    }
                }
            }
            NodeKind::Image(_) => {}
        }
        replaced
    }
}

/// One drawable element: shared placement fields plus the kind payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Opacity 0.0..=1.0.
    pub opacity: f64,
    pub locked: bool,
    /// The surface the node belongs to, assigned once at creation and
    /// never re-derived from geometry.
    pub surface_id: SurfaceId,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: NodeId, surface_id: SurfaceId, x: f64, y: f64, kind: NodeKind) -> Self {
        Self {
            id,
            name: kind.default_name().to_string(),
            x,
            y,
            rotation: 0.0,
            opacity: 1.0,
            locked: false,
            surface_id,
            kind,
        }
    }

    /// Axis-aligned bounding box in document space, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        let (w, h) = match &self.kind {
            NodeKind::Path(p) => p.extent(),
            NodeKind::Text(t) => t.extent(),
            NodeKind::Shape(s) => (s.width, s.height),
            NodeKind::Image(i) => i.extent(),
        };
        Rect::new(self.x, self.y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_variants() {
        assert_eq!(Color::parse("#FF8000").unwrap(), Color::new(255, 128, 0));
        assert_eq!(Color::parse("ff8000").unwrap(), Color::new(255, 128, 0));
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert!(Color::parse("#gg0000").is_err());
        assert!(Color::parse("#ff80").is_err());
    }

    #[test]
    fn test_color_parse_non_ascii_is_error() {
        // Multi-byte input that is 3 or 6 bytes long must come back as
        // InvalidColor, not a slicing panic.
        for value in ["aé", "#ffé", "ffff\u{e9}", "#\u{1f58c}ff"] {
            assert_eq!(
                Color::parse(value),
                Err(DesignError::InvalidColor {
                    value: value.to_string()
                })
            );
        }
    }

    #[test]
    fn test_color_display_lowercase() {
        assert_eq!(Color::parse("#FF8000").unwrap().to_string(), "#ff8000");
    }

    #[test]
    fn test_color_distance() {
        let a = Color::new(0, 0, 0);
        let b = Color::new(3, 4, 0);
        assert_eq!(a.distance_sq(&b), 25.0);
    }

    #[test]
    fn test_rect_inset() {
        let r = Rect::new(0.0, 0.0, 100.0, 200.0);
        let inner = r.inset_fraction(0.1);
        assert_eq!(inner.x, 10.0);
        assert_eq!(inner.y, 20.0);
        assert_eq!(inner.w, 80.0);
        assert_eq!(inner.h, 160.0);
    }

    #[test]
    fn test_replace_color_shape_fill_and_stroke() {
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        let mut kind = NodeKind::Shape(ShapeNode {
            shape_kind: ShapeKind::Rect,
            width: 10.0,
            height: 10.0,
            fill: red,
            stroke: Some(Stroke::new(red, 1.0)),
        });
        assert_eq!(kind.replace_color(red, blue), 2);
        assert!(kind.colors().iter().all(|c| *c == blue));
    }
}
