//! Gesture event value types.
//!
//! A [`GestureEvent`] is an immutable value produced by the upstream
//! recognizer.  It carries a [`GestureKind`], a delta payload, the source
//! device, and a [`LatencyTrace`] that accumulates timing annotations as the
//! event moves through the pipeline.

use serde::{Deserialize, Serialize};

pub mod latency;

pub use latency::LatencyTrace;

/// The closed set of gesture kinds understood by the dispatch engine.
///
/// Scroll and pinch kinds form continuous streams (begin/update/end);
/// [`FlingStart`](GestureKind::FlingStart) and
/// [`FlingCancel`](GestureKind::FlingCancel) belong to the momentum-scroll
/// machinery and are owned by the fling controller — they must never be
/// forwarded to the event consumer.  The remaining kinds are discrete
/// gestures treated uniformly by the debounce stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    ScrollBegin,
    ScrollUpdate,
    ScrollEnd,
    PinchBegin,
    PinchUpdate,
    PinchEnd,
    /// Momentum scroll start.  Consumed by the fling controller, never sent.
    FlingStart,
    /// Momentum scroll cancel.  Consumed by the fling controller, never sent.
    FlingCancel,
    TapDown,
    Tap,
    TapCancel,
    DoubleTap,
    LongPress,
    TwoFingerTap,
}

impl GestureKind {
    /// Returns `true` for the two momentum-fling kinds owned by the fling
    /// controller.
    pub fn is_fling(self) -> bool {
        matches!(self, GestureKind::FlingStart | GestureKind::FlingCancel)
    }

    /// Returns `true` for pinch-begin/update/end.
    pub fn is_pinch(self) -> bool {
        matches!(
            self,
            GestureKind::PinchBegin | GestureKind::PinchUpdate | GestureKind::PinchEnd
        )
    }

    /// Returns `true` for scroll-begin/update/end.
    pub fn is_scroll(self) -> bool {
        matches!(
            self,
            GestureKind::ScrollBegin | GestureKind::ScrollUpdate | GestureKind::ScrollEnd
        )
    }
}

/// The physical device class that produced a gesture.
///
/// The consumer treats touchscreen and touchpad gestures differently (e.g.
/// fling progress is synthesised as scroll updates for touchscreens but as
/// wheel events for touchpads), so the source travels with every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceSource {
    Touchscreen,
    Touchpad,
    /// Synthetic events generated by middle-click autoscroll.
    Autoscroll,
}

/// A 2-D velocity vector in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero velocity, reported when no fling is active.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// A recognized gesture event flowing through the dispatch engine.
///
/// The kind, payload, and source are immutable after construction.  The
/// latency trace is the one mutable part: stages annotate it as the event
/// passes through, and acknowledgment processing merges the consumer's
/// timing data back into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    kind: GestureKind,
    /// Horizontal payload magnitude.  Scroll/fling deltas in pixels; pinch
    /// updates reuse `delta_x` as the scale factor.
    delta_x: f32,
    /// Vertical payload magnitude in pixels.
    delta_y: f32,
    source: DeviceSource,
    latency: LatencyTrace,
}

impl GestureEvent {
    /// Creates an event with a zero delta payload.
    pub fn new(kind: GestureKind, source: DeviceSource) -> Self {
        Self::with_deltas(kind, source, 0.0, 0.0)
    }

    /// Creates an event carrying a delta payload.
    pub fn with_deltas(kind: GestureKind, source: DeviceSource, delta_x: f32, delta_y: f32) -> Self {
        Self {
            kind,
            delta_x,
            delta_y,
            source,
            latency: LatencyTrace::new(),
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn delta_x(&self) -> f32 {
        self.delta_x
    }

    pub fn delta_y(&self) -> f32 {
        self.delta_y
    }

    pub fn source(&self) -> DeviceSource {
        self.source
    }

    pub fn latency(&self) -> &LatencyTrace {
        &self.latency
    }

    /// Mutable access to the latency trace, for stage annotation and ack
    /// merging.
    pub fn latency_mut(&mut self) -> &mut LatencyTrace {
        &mut self.latency
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
