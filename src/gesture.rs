//! Swipe recognition over press/move/release pointer sequences.
//!
//! ```text
//!            Press (touch, or primary mouse button)
//!   idle ───────────────────────────────────────────▶ dragging
//!    ▲                                                   │
//!    │  Release: classify end_x − start_x                │ Move: rate-limited,
//!    ├───────────────────────────────────────────────────┤ may suppress default
//!    │  Leave: cancel, no navigation                     │
//!    └───────────────────────────────────────────────────┘
//! ```
//!
//! The tracker never navigates on its own. It reports a [`GestureResponse`]
//! and the controller turns a recognized swipe into `handle_next` or
//! `handle_prev`.

use crate::config::GestureConfig;
use crate::throttle::MinIntervalGate;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Touch,
    Mouse,
}

/// Carousel surface cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

/// One pointer event on the carousel surface, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Touch start, or mouse down. `primary` is false for non-left buttons.
    Press {
        kind: PointerKind,
        x: f64,
        y: f64,
        primary: bool,
    },
    Move { kind: PointerKind, x: f64, y: f64 },
    /// Touch end or mouse up.
    Release { kind: PointerKind, x: f64 },
    /// Mouse left the surface.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Next,
    Prev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureResponse {
    /// Not part of a drag (idle move/release, secondary button).
    Ignored,
    Started { kind: PointerKind },
    /// Move dropped by the rate limiter.
    Throttled,
    Moved { suppress_default: bool },
    Released {
        kind: PointerKind,
        swipe: Option<SwipeDirection>,
    },
    Cancelled,
}

impl GestureResponse {
    /// Whether the host should cancel the browser's default action.
    pub fn prevent_default(&self) -> bool {
        match *self {
            GestureResponse::Started { kind } => kind == PointerKind::Mouse,
            GestureResponse::Moved { suppress_default } => suppress_default,
            _ => false,
        }
    }

    /// Cursor change implied by this response, if any.
    pub fn cursor(&self) -> Option<Cursor> {
        match *self {
            GestureResponse::Started {
                kind: PointerKind::Mouse,
            } => Some(Cursor::Grabbing),
            GestureResponse::Released {
                kind: PointerKind::Mouse,
                ..
            }
            | GestureResponse::Cancelled => Some(Cursor::Grab),
            _ => None,
        }
    }

    pub fn swipe(&self) -> Option<SwipeDirection> {
        match *self {
            GestureResponse::Released { swipe, .. } => swipe,
            _ => None,
        }
    }
}

/// Classify a net horizontal displacement. Both bounds are exclusive.
pub fn classify_swipe(dx: f64, threshold: f64) -> Option<SwipeDirection> {
    if dx < -threshold {
        Some(SwipeDirection::Next)
    } else if dx > threshold {
        Some(SwipeDirection::Prev)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    swipe_threshold: f64,
    scroll_lock_threshold: f64,
    gate: MinIntervalGate,
    dragging: bool,
    start_x: f64,
    start_y: f64,
    end_x: f64,
}

impl GestureTracker {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            swipe_threshold: config.swipe_threshold,
            scroll_lock_threshold: config.scroll_lock_threshold,
            gate: MinIntervalGate::new(config.move_interval()),
            dragging: false,
            start_x: 0.0,
            start_y: 0.0,
            end_x: 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn start_x(&self) -> f64 {
        self.start_x
    }

    pub fn end_x(&self) -> f64 {
        self.end_x
    }

    /// Feed one event observed at `now`.
    pub fn handle(&mut self, event: PointerEvent, now: Duration) -> GestureResponse {
        match event {
            PointerEvent::Press { kind, x, y, primary } => {
                if kind == PointerKind::Mouse && !primary {
                    return GestureResponse::Ignored;
                }
                self.dragging = true;
                self.start_x = x;
                self.start_y = y;
                self.end_x = x;
                self.gate.reset();
                GestureResponse::Started { kind }
            }
            PointerEvent::Move { kind, x, y } => {
                if !self.dragging {
                    return GestureResponse::Ignored;
                }
                if !self.gate.admit(now) {
                    return GestureResponse::Throttled;
                }
                let suppress_default = match kind {
                    PointerKind::Mouse => true,
                    PointerKind::Touch => {
                        let dx = (x - self.start_x).abs();
                        let dy = (y - self.start_y).abs();
                        dx > dy && dx > self.scroll_lock_threshold
                    }
                };
                GestureResponse::Moved { suppress_default }
            }
            PointerEvent::Release { kind, x } => {
                if !self.dragging {
                    return GestureResponse::Ignored;
                }
                self.dragging = false;
                self.end_x = x;
                let swipe = classify_swipe(self.end_x - self.start_x, self.swipe_threshold);
                GestureResponse::Released { kind, swipe }
            }
            PointerEvent::Leave => {
                if !self.dragging {
                    return GestureResponse::Ignored;
                }
                self.dragging = false;
                GestureResponse::Cancelled
            }
        }
    }
}
