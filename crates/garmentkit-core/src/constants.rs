//! Engine-wide constants: history limits, viewport clamps, input
//! thresholds, print-readiness tolerances, pricing rates, and embroidery
//! machine parameters.

/// Maximum number of undo snapshots retained; the oldest is evicted.
pub const HISTORY_DEPTH: usize = 50;

/// Minimum viewport zoom (exclusive lower clamp keeps zoom > 0).
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum viewport zoom.
pub const MAX_ZOOM: f64 = 50.0;

/// Per-edge padding fraction used when fitting content to the viewport.
pub const VIEW_PADDING: f64 = 0.05;

/// Touch contact radius (px) above which a touch is treated as a resting
/// palm when another touch is already active.
pub const PALM_CONTACT_RADIUS: f64 = 22.0;

/// Touch contact radius (px) below which a touch is classified stylus-like.
pub const STYLUS_CONTACT_RADIUS: f64 = 6.0;

/// Gamut tolerance: maximum Euclidean distance in RGB8 space between a
/// used color and its nearest reference swatch before the color is
/// flagged out-of-gamut. Distances are compared squared.
pub const GAMUT_TOLERANCE: f64 = 60.0;

/// Distinct-color budget for screen printing.
pub const SCREEN_PRINT_COLOR_BUDGET: u32 = 6;

/// Distinct-color budget for embroidery (thread cone slots).
pub const EMBROIDERY_COLOR_BUDGET: u32 = 8;

/// Fixed print setup fee per quote, in currency units.
pub const PRINT_SETUP_FEE: f64 = 5.0;

/// Charge per distinct color beyond the first.
pub const PER_COLOR_RATE: f64 = 1.5;

/// Charge per enabled print surface beyond the first.
pub const PER_SURFACE_RATE: f64 = 4.0;

/// First quantity breakpoint: orders at or above this get the first
/// discount tier.
pub const QUANTITY_BREAK_FIRST: u32 = 10;

/// Second quantity breakpoint: orders at or above this get the maximum
/// discount tier.
pub const QUANTITY_BREAK_SECOND: u32 = 50;

/// Discount rate between the first and second breakpoints.
pub const DISCOUNT_RATE_FIRST: f64 = 0.10;

/// Discount rate at or above the second breakpoint.
pub const DISCOUNT_RATE_SECOND: f64 = 0.20;

/// Embroidery stitch pitch: distance (mm) between needle penetrations.
pub const STITCH_PITCH_MM: f64 = 2.5;

/// Fixed stitch overhead per embroidered object (tie-in, tie-off, trim).
pub const TRIM_OVERHEAD_STITCHES: f64 = 40.0;

/// Embroidery machine throughput in stitches per minute.
pub const MACHINE_STITCH_RATE: f64 = 650.0;

/// Minimum feature size (mm) reproducible in embroidery; stroke widths
/// and shape dimensions below this are reported as violations.
pub const MIN_EMBROIDERY_FEATURE_MM: f64 = 1.0;
