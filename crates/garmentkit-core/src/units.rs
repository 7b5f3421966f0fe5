//! Unit conversion utilities
//!
//! Design documents are stored in device pixels at a known DPI; print
//! and embroidery math runs in millimeters. This module converts between
//! the two and formats values for display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// A resolution in dots per inch, carried on the canvas config and on
/// catalog print areas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dpi(pub f64);

impl Dpi {
    /// Standard print resolution for garment artwork.
    pub const PRINT: Dpi = Dpi(300.0);

    /// Converts a pixel length at this resolution to millimeters.
    pub fn px_to_mm(&self, px: f64) -> f64 {
        px / self.0 * MM_PER_INCH
    }

    /// Converts a millimeter length to pixels at this resolution.
    pub fn mm_to_px(&self, mm: f64) -> f64 {
        mm / MM_PER_INCH * self.0
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self::PRINT
    }
}

impl fmt::Display for Dpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} dpi", self.0)
    }
}

/// Formats a duration given in minutes as `"Hh MMm"` or `"Mm SSs"`.
///
/// Used for embroidery run-time estimates.
pub fn format_minutes(minutes: f64) -> String {
    // Round to whole display units first so boundary values carry into
    // the major unit instead of printing "59m 60s" or "1h 60m".
    let total_secs = (minutes * 60.0).round() as u64;
    if total_secs >= 3600 {
        let total_mins = (total_secs + 30) / 60;
        format!("{}h {:02}m", total_mins / 60, total_mins % 60)
    } else {
        format!("{}m {:02}s", total_secs / 60, total_secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_mm_round_trip() {
        let dpi = Dpi(300.0);
        let mm = dpi.px_to_mm(300.0);
        assert!((mm - 25.4).abs() < 1e-9);
        assert!((dpi.mm_to_px(mm) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(90.0), "1h 30m");
        assert_eq!(format_minutes(2.5), "2m 30s");
    }

    #[test]
    fn test_format_minutes_rolls_over_at_unit_boundaries() {
        // Values that round up to a whole major unit must not print a
        // minor component of 60.
        assert_eq!(format_minutes(119.99), "2h 00m");
        assert_eq!(format_minutes(59.999), "1h 00m");
        assert_eq!(format_minutes(59.5), "59m 30s");
        assert_eq!(format_minutes(60.4), "1h 00m");
    }
}
