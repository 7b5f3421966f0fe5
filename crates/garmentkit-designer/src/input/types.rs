//! Input type definitions: raw pointer events, device classification,
//! tool modes, and the actions the router emits.

use serde::{Deserialize, Serialize};

use garmentkit_core::constants::STYLUS_CONTACT_RADIUS;

/// Raw device type as reported by the platform (`pointerType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerDevice {
    Pen,
    Touch,
    Mouse,
}

/// Phase of a pointer event. `Cancel` covers both `pointercancel` and
/// `pointerleave`, which the router treats identically to `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A normalized pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: u64,
    pub device: PointerDevice,
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
    /// Pressure 0.0..=1.0. Mouse reports 0.5 while a button is held.
    pub pressure: f64,
    /// Touch contact radius in px; 0.0 for pen and mouse.
    pub contact_radius: f64,
    /// Event time in milliseconds, used for simultaneous-lift detection.
    pub timestamp_ms: f64,
}

impl PointerEvent {
    pub fn new(
        pointer_id: u64,
        device: PointerDevice,
        phase: PointerPhase,
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            pointer_id,
            device,
            phase,
            x,
            y,
            pressure: 0.0,
            contact_radius: 0.0,
            timestamp_ms: 0.0,
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn with_contact_radius(mut self, radius: f64) -> Self {
        self.contact_radius = radius;
        self
    }

    pub fn with_timestamp(mut self, timestamp_ms: f64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }
}

/// Behavioral device class derived from the raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// Pen, or a touch precise enough to draw with.
    Stylus,
    /// A regular finger touch; drives pan/zoom, never strokes.
    Finger,
    /// Mouse.
    DirectPointer,
}

/// Classifies a pointer event into a behavioral device class.
///
/// A touch with a small contact radius or nonzero pressure reads as
/// stylus-like (fine styluses on some platforms report as `touch`).
pub fn classify(event: &PointerEvent) -> DeviceClass {
    match event.device {
        PointerDevice::Pen => DeviceClass::Stylus,
        PointerDevice::Mouse => DeviceClass::DirectPointer,
        PointerDevice::Touch => {
            if (event.contact_radius > 0.0 && event.contact_radius < STYLUS_CONTACT_RADIUS)
                || event.pressure > 0.0
            {
                DeviceClass::Stylus
            } else {
                DeviceClass::Finger
            }
        }
    }
}

/// The active editing tool. Draw-class tools give stylus input exclusive
/// stroke capture; transform-class tools accept any pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    Select,
    Brush,
    Eraser,
    Text,
    Shape,
    Image,
    Pan,
}

impl ToolMode {
    /// Tools where a stroke is being laid down and a stray finger must
    /// not scribble.
    pub fn is_draw_class(&self) -> bool {
        matches!(self, ToolMode::Brush | ToolMode::Eraser | ToolMode::Text)
    }
}

/// Action emitted by the router for the editor session to apply.
/// Rejected or unrecognized input emits `Ignored`, never an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    /// Begin a stroke/drag at a client point.
    StrokeStart { x: f64, y: f64, pressure: f64 },
    StrokeMove { x: f64, y: f64, pressure: f64 },
    /// Stroke finished; the session commits the gesture.
    StrokeEnd,
    /// Begin a select/transform drag at a client point.
    TransformStart { x: f64, y: f64 },
    TransformMove { x: f64, y: f64 },
    TransformEnd,
    /// Single-pointer pan (pan tool) by a client-space delta.
    PanBy { dx: f64, dy: f64 },
    /// Two-finger pinch/pan step. `factor_step` is the distance ratio
    /// since the previous move; `scale_total` since the gesture began.
    Pinch {
        scale_total: f64,
        factor_step: f64,
        center_x: f64,
        center_y: f64,
        pan_dx: f64,
        pan_dy: f64,
    },
    /// All touches of a 2-touch gesture lifted together.
    DoubleTap,
    /// All touches of a 3-touch gesture lifted together.
    ToolMenu,
    /// Expected noisy input (palm, extra pointer, unknown device).
    Ignored,
}
