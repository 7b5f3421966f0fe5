//! Pointer input routing.
//!
//! Turns raw pointer events into gesture actions through a small state
//! machine: `Idle`, `Drawing`, `Transforming`, `Panning`, `MultiTouch`.
//! Handles device classification, palm rejection, exclusive stroke
//! capture, two-finger pinch/pan math, and multi-finger tap shortcuts.
//!
//! The router never mutates the document itself; it emits
//! [`GestureAction`]s that the editor session applies to the store and
//! viewport. Noisy input (palms, extra pointers, unknown devices) comes
//! back as `GestureAction::Ignored`.

mod types;

pub use types::{
    classify, DeviceClass, GestureAction, PointerDevice, PointerEvent, PointerPhase, ToolMode,
};

use std::collections::HashMap;

use tracing::trace;

use garmentkit_core::constants::PALM_CONTACT_RADIUS;

/// Window within which touch lifts count as simultaneous, in ms.
const SIMULTANEOUS_LIFT_MS: f64 = 150.0;

/// Maximum gesture travel (px) for a multi-finger lift to count as a tap
/// rather than the end of a pan.
const TAP_SLOP_PX: f64 = 8.0;

#[derive(Debug, Clone, Copy)]
struct ActivePointer {
    x: f64,
    y: f64,
    class: DeviceClass,
    rejected: bool,
}

/// Two-finger gesture bookkeeping. Captures the initial inter-touch
/// distance on formation; every move reports the distance ratio and
/// center drift since the previous move.
#[derive(Debug, Clone, Copy)]
struct MultiTouchGesture {
    a: u64,
    b: u64,
    initial_distance: f64,
    last_distance: f64,
    last_center: (f64, f64),
    travel: f64,
    live_count: u8,
}

#[derive(Debug, Clone, Copy)]
enum GestureState {
    Idle,
    Drawing { pointer_id: u64 },
    Transforming { pointer_id: u64 },
    Panning { pointer_id: u64 },
    MultiTouch(MultiTouchGesture),
}

/// Gesture state machine routing pointer events to document actions.
#[derive(Debug)]
pub struct InputRouter {
    state: GestureState,
    active: HashMap<u64, ActivePointer>,
    /// Highest concurrent finger count of the current touch episode.
    peak_fingers: u8,
    /// Lift timestamps of the current touch episode.
    lifts: Vec<f64>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
            active: HashMap::new(),
            peak_fingers: 0,
            lifts: Vec::new(),
        }
    }

    /// True while a pointer holds exclusive drawing/transform capture.
    pub fn is_captured(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    /// Drops all gesture state, e.g. when the tool changes mid-gesture.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.active.clear();
        self.peak_fingers = 0;
        self.lifts.clear();
    }

    /// Routes one pointer event under the given tool, returning the
    /// action the session should apply.
    pub fn handle_event(&mut self, event: &PointerEvent, tool: ToolMode) -> GestureAction {
        match event.phase {
            PointerPhase::Down => self.on_down(event, tool),
            PointerPhase::Move => self.on_move(event),
            // pointercancel/pointerleave release capture like pointer-up.
            PointerPhase::Up | PointerPhase::Cancel => self.on_up(event),
        }
    }

    fn on_down(&mut self, event: &PointerEvent, tool: ToolMode) -> GestureAction {
        let class = classify(event);

        // Palm rejection: an oversized touch arriving while another
        // pointer is active never starts anything. It stays tracked so
        // its later moves/up are swallowed too.
        let rejected = event.device == PointerDevice::Touch
            && event.contact_radius > PALM_CONTACT_RADIUS
            && !self.active.is_empty();

        self.active.insert(
            event.pointer_id,
            ActivePointer {
                x: event.x,
                y: event.y,
                class,
                rejected,
            },
        );
        if rejected {
            trace!(pointer = event.pointer_id, "palm rejected");
            return GestureAction::Ignored;
        }

        let finger_count = self.finger_count();
        self.peak_fingers = self.peak_fingers.max(finger_count);

        match self.state {
            GestureState::Idle => self.start_gesture(event, class, tool),
            // Exclusive capture: no other pointer is accepted while a
            // stroke, transform, or pan owns input. A stylus touching
            // down mid two-finger pan lands here as well.
            GestureState::Drawing { .. }
            | GestureState::Transforming { .. }
            | GestureState::Panning { .. }
            | GestureState::MultiTouch(_) => GestureAction::Ignored,
        }
    }

    fn start_gesture(
        &mut self,
        event: &PointerEvent,
        class: DeviceClass,
        tool: ToolMode,
    ) -> GestureAction {
        if tool == ToolMode::Pan {
            self.state = GestureState::Panning {
                pointer_id: event.pointer_id,
            };
            return GestureAction::Ignored;
        }

        if tool.is_draw_class() {
            match class {
                DeviceClass::Stylus | DeviceClass::DirectPointer => {
                    self.state = GestureState::Drawing {
                        pointer_id: event.pointer_id,
                    };
                    GestureAction::StrokeStart {
                        x: event.x,
                        y: event.y,
                        pressure: event.pressure,
                    }
                }
                // Fingers only ever form the two-finger pan/zoom here.
                DeviceClass::Finger => self.try_form_multitouch(),
            }
        } else {
            // Transform/select tools: any pointer interacts directly.
            self.state = GestureState::Transforming {
                pointer_id: event.pointer_id,
            };
            GestureAction::TransformStart {
                x: event.x,
                y: event.y,
            }
        }
    }

    /// Promotes two live fingers into a `MultiTouch` gesture, recording
    /// the initial center and inter-touch distance.
    fn try_form_multitouch(&mut self) -> GestureAction {
        let fingers: Vec<(u64, ActivePointer)> = self
            .active
            .iter()
            .filter(|(_, p)| !p.rejected && p.class == DeviceClass::Finger)
            .map(|(id, p)| (*id, *p))
            .collect();
        if fingers.len() != 2 {
            // First finger waits; a third is noise.
            return GestureAction::Ignored;
        }

        let (a, pa) = fingers[0];
        let (b, pb) = fingers[1];
        let center = ((pa.x + pb.x) / 2.0, (pa.y + pb.y) / 2.0);
        let distance = ((pa.x - pb.x).powi(2) + (pa.y - pb.y).powi(2)).sqrt();
        self.state = GestureState::MultiTouch(MultiTouchGesture {
            a,
            b,
            initial_distance: distance.max(f64::EPSILON),
            last_distance: distance.max(f64::EPSILON),
            last_center: center,
            travel: 0.0,
            live_count: 2,
        });
        GestureAction::Ignored
    }

    fn on_move(&mut self, event: &PointerEvent) -> GestureAction {
        let Some(pointer) = self.active.get_mut(&event.pointer_id) else {
            return GestureAction::Ignored;
        };
        if pointer.rejected {
            return GestureAction::Ignored;
        }
        let prev = (pointer.x, pointer.y);
        pointer.x = event.x;
        pointer.y = event.y;

        match &mut self.state {
            GestureState::Drawing { pointer_id } if *pointer_id == event.pointer_id => {
                GestureAction::StrokeMove {
                    x: event.x,
                    y: event.y,
                    pressure: event.pressure,
                }
            }
            GestureState::Transforming { pointer_id } if *pointer_id == event.pointer_id => {
                GestureAction::TransformMove {
                    x: event.x,
                    y: event.y,
                }
            }
            GestureState::Panning { pointer_id } if *pointer_id == event.pointer_id => {
                GestureAction::PanBy {
                    dx: event.x - prev.0,
                    dy: event.y - prev.1,
                }
            }
            GestureState::MultiTouch(gesture)
                if gesture.live_count == 2
                    && (gesture.a == event.pointer_id || gesture.b == event.pointer_id) =>
            {
                let pa = self.active[&gesture.a];
                let pb = self.active[&gesture.b];
                let center = ((pa.x + pb.x) / 2.0, (pa.y + pb.y) / 2.0);
                let distance = ((pa.x - pb.x).powi(2) + (pa.y - pb.y).powi(2))
                    .sqrt()
                    .max(f64::EPSILON);

                let pan_dx = center.0 - gesture.last_center.0;
                let pan_dy = center.1 - gesture.last_center.1;
                let factor_step = distance / gesture.last_distance;
                let scale_total = distance / gesture.initial_distance;

                gesture.travel += (pan_dx * pan_dx + pan_dy * pan_dy).sqrt();
                gesture.last_center = center;
                gesture.last_distance = distance;

                GestureAction::Pinch {
                    scale_total,
                    factor_step,
                    center_x: center.0,
                    center_y: center.1,
                    pan_dx,
                    pan_dy,
                }
            }
            _ => GestureAction::Ignored,
        }
    }

    fn on_up(&mut self, event: &PointerEvent) -> GestureAction {
        let Some(pointer) = self.active.remove(&event.pointer_id) else {
            return GestureAction::Ignored;
        };
        if pointer.rejected {
            return GestureAction::Ignored;
        }
        if pointer.class == DeviceClass::Finger {
            self.lifts.push(event.timestamp_ms);
        }

        let action = match &mut self.state {
            GestureState::Drawing { pointer_id } if *pointer_id == event.pointer_id => {
                self.state = GestureState::Idle;
                GestureAction::StrokeEnd
            }
            GestureState::Transforming { pointer_id } if *pointer_id == event.pointer_id => {
                self.state = GestureState::Idle;
                GestureAction::TransformEnd
            }
            GestureState::Panning { pointer_id } if *pointer_id == event.pointer_id => {
                self.state = GestureState::Idle;
                GestureAction::Ignored
            }
            GestureState::MultiTouch(gesture)
                if gesture.a == event.pointer_id || gesture.b == event.pointer_id =>
            {
                gesture.live_count = gesture.live_count.saturating_sub(1);
                // Capture is held until every touch of the pan has
                // lifted; a stylus down in between stays ignored.
                if gesture.live_count == 0 {
                    let travel = gesture.travel;
                    self.state = GestureState::Idle;
                    self.tap_action(travel)
                } else {
                    GestureAction::Ignored
                }
            }
            _ => GestureAction::Ignored,
        };

        if self.finger_count() == 0 && matches!(self.state, GestureState::Idle) {
            self.peak_fingers = 0;
            self.lifts.clear();
        }
        action
    }

    /// Resolves a finished touch episode into a tap shortcut, if all
    /// lifts landed inside the simultaneity window and the fingers
    /// barely moved.
    fn tap_action(&self, travel: f64) -> GestureAction {
        if travel > TAP_SLOP_PX {
            return GestureAction::Ignored;
        }
        let (min, max) = self
            .lifts
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
                (lo.min(*t), hi.max(*t))
            });
        if max - min > SIMULTANEOUS_LIFT_MS {
            return GestureAction::Ignored;
        }
        match self.peak_fingers {
            2 => GestureAction::DoubleTap,
            3 => GestureAction::ToolMenu,
            _ => GestureAction::Ignored,
        }
    }

    fn finger_count(&self) -> u8 {
        self.active
            .values()
            .filter(|p| !p.rejected && p.class == DeviceClass::Finger)
            .count() as u8
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}
