//! Fling controller collaborator traits.
//!
//! Momentum scrolling ("fling") is owned by a collaborator, not by the
//! queue: the controller is offered every incoming event before any other
//! processing and may consume it entirely.  The physics and scheduling of
//! the momentum scroll itself live behind this trait; the queue only
//! consults its state.
//!
//! # Ownership
//!
//! The original design reached into sibling objects through raw pointers.
//! Here the queue holds the controller as an owned `Box<dyn FlingController>`
//! injected at construction, and hands out only the shared tap-suppression
//! handle ([`TapSuppressionController`]) to callers.

use std::rc::Rc;

use gesture_core::{GestureEvent, Velocity};

/// Momentum-scroll state machine consulted by the queue.
///
/// `filter_event` is called for *every* event entering the engine, including
/// deferred events being replayed after the debounce quiet period.  The two
/// fling kinds additionally get dedicated `on_fling_start` /
/// `on_fling_cancel` hand-offs when the filter lets them through.
pub trait FlingController {
    /// Offers an event to the controller.  Returns `true` if the controller
    /// consumed it; a consumed event must not be processed further.
    fn filter_event(&mut self, event: &GestureEvent) -> bool;

    /// Hands over an unfiltered fling-start event.  The controller takes
    /// ownership; fling progress is synthesised downstream as ordinary
    /// scroll/wheel events.
    fn on_fling_start(&mut self, event: GestureEvent);

    /// Hands over an unfiltered fling-cancel event.
    fn on_fling_cancel(&mut self, event: GestureEvent);

    /// Stops any active fling immediately.
    fn stop_fling(&mut self);

    /// Whether a momentum scroll is currently being driven.
    fn fling_in_progress(&self) -> bool;

    /// Current momentum velocity; zero when no fling is active.
    fn current_velocity(&self) -> Velocity;

    /// Whether a fling cancellation is being deferred waiting for a
    /// tap-suppression decision.
    fn fling_cancellation_deferred(&self) -> bool;

    /// Called when a scroll sequence begins, so the controller can observe
    /// the compositor scheduler for the duration of the scroll.
    fn register_scheduler_observer(&mut self);

    /// Called when the scroll sequence ends.
    fn unregister_scheduler_observer(&mut self);

    /// Shared handle to the controller's tap-suppression sub-component.
    fn tap_suppression_controller(&self) -> Rc<dyn TapSuppressionController>;
}

/// Tap-suppression heuristics owned by the fling controller.
///
/// Consulted by the owning context through a pass-through accessor only;
/// the queue itself never calls into it.
pub trait TapSuppressionController {
    /// Whether taps are currently being suppressed (a fling was recently
    /// cancelled by a touch-down).
    fn suppression_in_progress(&self) -> bool;
}

/// Inert fling controller for hosts without momentum scrolling.
///
/// Consumes nothing, reports no fling, and swallows the fling hand-offs.
/// Useful as a default collaborator and in tests that exercise only the
/// debounce and ack paths.
pub struct DisabledFlingController {
    tap_suppression: Rc<InertTapSuppression>,
}

impl DisabledFlingController {
    pub fn new() -> Self {
        Self {
            tap_suppression: Rc::new(InertTapSuppression),
        }
    }
}

impl Default for DisabledFlingController {
    fn default() -> Self {
        Self::new()
    }
}

impl FlingController for DisabledFlingController {
    fn filter_event(&mut self, _event: &GestureEvent) -> bool {
        false
    }

    fn on_fling_start(&mut self, _event: GestureEvent) {}

    fn on_fling_cancel(&mut self, _event: GestureEvent) {}

    fn stop_fling(&mut self) {}

    fn fling_in_progress(&self) -> bool {
        false
    }

    fn current_velocity(&self) -> Velocity {
        Velocity::zero()
    }

    fn fling_cancellation_deferred(&self) -> bool {
        false
    }

    fn register_scheduler_observer(&mut self) {}

    fn unregister_scheduler_observer(&mut self) {}

    fn tap_suppression_controller(&self) -> Rc<dyn TapSuppressionController> {
        Rc::clone(&self.tap_suppression) as Rc<dyn TapSuppressionController>
    }
}

/// Tap suppression that never suppresses.
pub struct InertTapSuppression;

impl TapSuppressionController for InertTapSuppression {
    fn suppression_in_progress(&self) -> bool {
        false
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
