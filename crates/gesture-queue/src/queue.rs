//! The gesture event queue: debounce, forwarding, and ack ordering.
//!
//! [`GestureEventQueue`] is the engine between the gesture recognizer and
//! the remote event consumer.  It owns three pieces of state:
//!
//! - A **debounce stage** that holds back non-scroll-update events briefly
//!   after a scroll stream starts, flushing them once the stream goes quiet.
//!   The quiet period is a single retriggerable deadline: every scroll
//!   update replaces it, so the period extends rather than stacks.
//!
//! - An **ack-ordering buffer**: a strict FIFO of forwarded events awaiting
//!   acknowledgment.  Acks may arrive in any order; matching only changes an
//!   entry's status, never its position, and completed entries are released
//!   from the front in original forwarding order.
//!
//! - A **side deferral queue** the owning context can use to stash events
//!   for later replay.  One-way escape valve; the engine never consumes it.
//!
//! # Single-threaded model
//!
//! Everything here runs on one logical thread (spec: no operation suspends
//! mid-mutation), so the handle is `Rc<RefCell<_>>` rather than
//! `Arc<Mutex<_>>`.  The one rule that makes synchronous callbacks safe is:
//! **the `RefCell` borrow is always released before calling out to the
//! [`DispatchSurface`]**.  A consumer that acknowledges from inside `send`
//! or `report_ack` re-borrows a free cell instead of panicking, and the
//! release-pass guard (a plain `Cell<bool>` outside the `RefCell`) turns the
//! nested release into a no-op so the outer pass keeps draining in order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, error, trace};

use gesture_core::{
    AckInfo, AckResult, AckSource, GestureEvent, GestureKind, LatencyTrace, Velocity,
};

use crate::dispatch::DispatchSurface;
use crate::fling::{FlingController, TapSuppressionController};

/// Default quiet period after the last scroll update before deferred events
/// are flushed.  Matches the touchscreen scroll debounce interval of the
/// reference implementation.
pub const DEFAULT_DEBOUNCE_INTERVAL: Duration = Duration::from_millis(30);

/// Tunables for [`GestureEventQueue`].
#[derive(Debug, Clone)]
pub struct GestureQueueConfig {
    /// Quiet period for scroll debouncing.  Zero disables debouncing:
    /// every event is forwarded immediately.
    pub debounce_interval: Duration,
}

impl Default for GestureQueueConfig {
    fn default() -> Self {
        Self {
            debounce_interval: DEFAULT_DEBOUNCE_INTERVAL,
        }
    }
}

/// A forwarded event waiting for its acknowledgment.
///
/// `ack` is `None` while the status is still Unknown.  Entries live exactly
/// from forward-time to release-time and are owned solely by the buffer.
struct PendingAck {
    event: GestureEvent,
    ack: Option<AckInfo>,
}

/// All mutable engine state, kept behind one `RefCell`.
struct QueueState {
    fling: Box<dyn FlingController>,
    debounce_interval: Duration,
    /// Set on the first scroll update, cleared when the quiet period elapses.
    scrolling_in_progress: bool,
    /// Monotonic deadline of the retriggerable quiet-period timer.  `None`
    /// when no flush is pending.  Replacing the value *is* the reset.
    debounce_deadline: Option<Instant>,
    /// Events held back while scrolling is in progress.
    debounce_queue: VecDeque<GestureEvent>,
    /// Side deferral queue (stash / take-all), untouched by debounce or acks.
    side_queue: VecDeque<GestureEvent>,
    /// Strict FIFO of forwarded events awaiting acknowledgment.
    awaiting_ack: VecDeque<PendingAck>,
    /// Diagnostic counter: acks that matched no outstanding entry.
    unmatched_acks: u64,
}

impl QueueState {
    /// The debounce decision.  Returns the event back when it should be
    /// forwarded now, or buffers it and returns `None`.
    fn apply_debounce(&mut self, event: GestureEvent) -> Option<GestureEvent> {
        if self.debounce_interval.is_zero() {
            return Some(event);
        }

        // Never debounce while a fling is in progress: a scroll-end here
        // terminates the fling and must not be held back by the next
        // scroll-begin.
        if self.fling.fling_in_progress() {
            return Some(event);
        }

        match event.kind() {
            GestureKind::ScrollUpdate => {
                if self.scrolling_in_progress {
                    trace!("scroll continues; extending debounce quiet period");
                } else {
                    trace!("scroll stream started; arming debounce quiet period");
                }
                self.debounce_deadline = Some(Instant::now() + self.debounce_interval);
                self.scrolling_in_progress = true;
                if !self.debounce_queue.is_empty() {
                    debug!(
                        dropped = self.debounce_queue.len(),
                        "scrolling resumed; dropping superseded deferred events"
                    );
                    self.debounce_queue.clear();
                }
                Some(event)
            }

            // Pinch and scroll are independent streams for debounce purposes.
            kind if kind.is_pinch() => Some(event),

            _ => {
                if self.scrolling_in_progress {
                    self.debounce_queue.push_back(event);
                    None
                } else {
                    Some(event)
                }
            }
        }
    }
}

/// Clears the release-pass flag when the pass ends, whichever way it ends.
struct ReleasePassGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> ReleasePassGuard<'a> {
    fn set(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for ReleasePassGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// The gesture input dispatch and acknowledgment-ordering engine.
///
/// Cheap to clone: clones share the same underlying state, so a collaborator
/// (e.g. a dispatch surface that acknowledges synchronously) can hold its
/// own handle back into the engine.
#[derive(Clone)]
pub struct GestureEventQueue {
    state: Rc<RefCell<QueueState>>,
    client: Rc<dyn DispatchSurface>,
    /// True while a release pass is draining completed acks.
    releasing_acks: Rc<Cell<bool>>,
}

impl GestureEventQueue {
    /// Creates an engine with the given collaborators.
    ///
    /// The fling controller is owned exclusively by the engine; the dispatch
    /// surface is shared.
    pub fn new(
        client: Rc<dyn DispatchSurface>,
        fling: Box<dyn FlingController>,
        config: GestureQueueConfig,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(QueueState {
                fling,
                debounce_interval: config.debounce_interval,
                scrolling_in_progress: false,
                debounce_deadline: None,
                debounce_queue: VecDeque::new(),
                side_queue: VecDeque::new(),
                awaiting_ack: VecDeque::new(),
                unmatched_acks: 0,
            })),
            client,
            releasing_acks: Rc::new(Cell::new(false)),
        }
    }

    // ── Fling pre-filter ──────────────────────────────────────────────────────

    /// Offers an event to the fling controller before any other processing.
    ///
    /// Returns `true` if the event was consumed (filtered outright, or one
    /// of the two fling kinds handed over to the controller).  A consumed
    /// event must not be passed to [`enqueue_or_forward`](Self::enqueue_or_forward).
    pub fn offer(&self, event: &GestureEvent) -> bool {
        let mut state = self.state.borrow_mut();
        if state.fling.filter_event(event) {
            return true;
        }

        // The controller owns fling-start/cancel outright: it processes the
        // fling and synthesises progress as ordinary scroll/wheel events,
        // which re-enter the engine through the normal path.
        match event.kind() {
            GestureKind::FlingStart => {
                state.fling.on_fling_start(event.clone());
                true
            }
            GestureKind::FlingCancel => {
                state.fling.on_fling_cancel(event.clone());
                true
            }
            _ => false,
        }
    }

    // ── Debounce stage ────────────────────────────────────────────────────────

    /// Runs the debounce stage and forwards the event if it passes.
    ///
    /// Returns `true` when the event was sent immediately; `false` when it
    /// was buffered pending the quiet period (the caller must not forward it
    /// another way).
    ///
    /// Fling kinds are a contract violation here: they must have been
    /// consumed by [`offer`](Self::offer) first.
    pub fn enqueue_or_forward(&self, event: GestureEvent) -> bool {
        if event.kind().is_fling() {
            debug_assert!(
                false,
                "fling event {:?} reached the debounce stage; offer() must filter it",
                event.kind()
            );
            error!(kind = ?event.kind(), "dropping fling event that reached the debounce stage");
            return false;
        }

        let event = {
            let mut state = self.state.borrow_mut();
            match state.apply_debounce(event) {
                Some(event) => event,
                None => return false,
            }
        };

        self.forward_event(event);
        true
    }

    /// Quiet-period timer fire: flushes the debounce stage.
    ///
    /// Clears the scrolling flag and deadline, then drains the deferral
    /// queue in order, re-running the fling pre-filter on each event (a
    /// deferred event may by now be intercepted by the controller) and
    /// forwarding the rest.
    pub fn flush_debounced_events(&self) {
        let deferred = {
            let mut state = self.state.borrow_mut();
            state.scrolling_in_progress = false;
            state.debounce_deadline = None;
            std::mem::take(&mut state.debounce_queue)
        };
        if deferred.is_empty() {
            return;
        }
        debug!(count = deferred.len(), "quiet period elapsed; flushing deferred gesture events");
        for event in deferred {
            let consumed = self.state.borrow_mut().fling.filter_event(&event);
            if !consumed {
                self.forward_event(event);
            }
        }
    }

    /// The pending quiet-period deadline, if the timer is armed.
    ///
    /// The engine only stores the deadline; actually sleeping until it and
    /// calling [`flush_debounced_events`](Self::flush_debounced_events) is
    /// the driver's job.
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.state.borrow().debounce_deadline
    }

    // ── Forwarding & ack ordering ─────────────────────────────────────────────

    /// Appends a pending-ack entry and transmits the event.
    fn forward_event(&self, event: GestureEvent) {
        if event.kind().is_fling() {
            debug_assert!(
                false,
                "fling event {:?} reached the forwarding boundary",
                event.kind()
            );
            error!(kind = ?event.kind(), "dropping fling event at the forwarding boundary");
            return;
        }

        {
            let mut state = self.state.borrow_mut();
            match event.kind() {
                GestureKind::ScrollBegin => state.fling.register_scheduler_observer(),
                GestureKind::ScrollEnd => state.fling.unregister_scheduler_observer(),
                _ => {}
            }
            state.awaiting_ack.push_back(PendingAck {
                event: event.clone(),
                ack: None,
            });
        }

        // Borrow released: the consumer may acknowledge synchronously from
        // inside send, and the entry above is already visible to it.
        self.client.send(&event);
    }

    /// Processes an acknowledgment from the consumer.
    ///
    /// Acks can arrive out of forwarding order; the buffer caches them to
    /// restore the original order.  The scan marks the *first* entry whose
    /// status is still unknown and whose kind matches, merges the supplied
    /// latency trace into it, then releases every completed entry at the
    /// buffer front, in order.
    ///
    /// An ack with an empty buffer is reported and ignored; an ack matching
    /// no entry only bumps a diagnostic counter.
    pub fn process_ack(
        &self,
        source: AckSource,
        result: AckResult,
        kind: GestureKind,
        latency: &LatencyTrace,
    ) {
        {
            let mut state = self.state.borrow_mut();
            if state.awaiting_ack.is_empty() {
                error!(?kind, "received unexpected ack with no events awaiting ack");
                return;
            }

            let mut matched = false;
            for entry in state.awaiting_ack.iter_mut() {
                if entry.ack.is_some() {
                    continue;
                }
                if entry.event.kind() == kind {
                    entry.event.latency_mut().merge_from(latency);
                    entry.ack = Some(AckInfo::new(source, result));
                    matched = true;
                    break;
                }
            }
            if !matched {
                state.unmatched_acks += 1;
                debug!(?kind, "ack matched no outstanding event; ignoring");
            }
        }

        self.release_completed_acks();
    }

    /// Releases completed entries from the buffer front, in order.
    ///
    /// Re-entrancy: if reporting an ack synchronously triggers another ack
    /// cycle, the nested pass is a no-op and the outer pass continues
    /// draining.  Without the guard the nested pass could report a later
    /// entry before the outer pass reports an earlier one.
    fn release_completed_acks(&self) {
        if self.releasing_acks.get() {
            return;
        }
        let _pass = ReleasePassGuard::set(&self.releasing_acks);

        loop {
            let entry = {
                let mut state = self.state.borrow_mut();
                match state.awaiting_ack.front() {
                    Some(front) if front.ack.is_some() => state.awaiting_ack.pop_front(),
                    _ => None,
                }
            };
            let Some(entry) = entry else { break };
            // Popped only when ack is present.
            let Some(info) = entry.ack else { break };
            self.client.report_ack(&entry.event, info.source, info.result);
        }
    }

    // ── Side deferral channel ─────────────────────────────────────────────────

    /// Stashes an event in the side deferral queue for the owner to replay
    /// later through the public entry points.
    pub fn stash_deferred(&self, event: GestureEvent) {
        self.state.borrow_mut().side_queue.push_back(event);
    }

    /// Atomically returns and clears the side deferral queue.
    pub fn take_deferred(&self) -> Vec<GestureEvent> {
        self.state.borrow_mut().side_queue.drain(..).collect()
    }

    // ── Fling pass-throughs ───────────────────────────────────────────────────

    /// Stops any active fling immediately.
    pub fn stop_fling(&self) {
        self.state.borrow_mut().fling.stop_fling();
    }

    /// Whether a fling cancellation is deferred pending tap suppression.
    pub fn fling_cancellation_deferred(&self) -> bool {
        self.state.borrow().fling.fling_cancellation_deferred()
    }

    /// Current momentum velocity; zero when no fling is active.
    pub fn current_fling_velocity(&self) -> Velocity {
        self.state.borrow().fling.current_velocity()
    }

    /// Whether the fling controller is driving a momentum scroll.
    pub fn fling_in_progress(&self) -> bool {
        self.state.borrow().fling.fling_in_progress()
    }

    /// Pass-through accessor to the tap-suppression sub-component.
    pub fn tap_suppression_controller(&self) -> Rc<dyn TapSuppressionController> {
        self.state.borrow().fling.tap_suppression_controller()
    }

    // ── Diagnostics ───────────────────────────────────────────────────────────

    /// Number of forwarded events still awaiting acknowledgment.
    pub fn pending_ack_count(&self) -> usize {
        self.state.borrow().awaiting_ack.len()
    }

    /// Number of acks that matched no outstanding entry.
    pub fn unmatched_ack_count(&self) -> u64 {
        self.state.borrow().unmatched_acks
    }

    /// Whether the debounce stage currently considers a scroll in progress.
    pub fn scrolling_in_progress(&self) -> bool {
        self.state.borrow().scrolling_in_progress
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
