use serde::{Deserialize, Serialize};

use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    pub align: TextAlign,
    pub fill: Color,
}

impl TextNode {
    pub fn new(text: String, font_size: f64) -> Self {
        Self {
            text,
            font_family: "Sans".to_string(),
            font_size,
            font_weight: 400,
            align: TextAlign::Left,
            fill: Color::BLACK,
        }
    }

    /// Rough layout box: average glyph advance of 0.6em on the longest
    /// line, one em of line height per line. Accurate shaping is a
    /// rendering-backend concern.
    pub fn extent(&self) -> (f64, f64) {
        let lines = self.text.lines().count().max(1);
        let widest = self
            .text
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        (
            widest as f64 * self.font_size * 0.6,
            lines as f64 * self.font_size,
        )
    }
}
