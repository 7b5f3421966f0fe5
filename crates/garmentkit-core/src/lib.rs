//! # GarmentKit Core
//!
//! Core types, errors, and constants for GarmentKit.
//! Provides the fundamental abstractions shared by the design engine:
//! error enums, tuning constants, and unit conversion.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{DesignError, Result};
pub use units::{format_minutes, Dpi, MM_PER_INCH};
