//! Async driver loop for the gesture event queue.
//!
//! The engine itself is synchronous and single-threaded: it stores a
//! monotonic deadline for its quiet-period timer but never sleeps.  This
//! driver turns that deadline into a real retriggerable timer: it selects
//! over the inbound command channel and a `sleep_until` of the current
//! deadline, and calls
//! [`flush_debounced_events`](GestureEventQueue::flush_debounced_events)
//! when the deadline elapses.  Because the deadline is re-read on every loop
//! iteration, a scroll update that replaces the deadline automatically
//! extends the sleep — reset-extends, never stacks.
//!
//! The queue is `Rc`-based and therefore `!Send`; run the driver future on a
//! current-thread runtime inside a [`tokio::task::LocalSet`].

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant as TokioInstant};
use tracing::{debug, info, trace};

use gesture_core::{AckResult, AckSource, GestureEvent, GestureKind, LatencyTrace};
use gesture_queue::GestureEventQueue;

/// Commands accepted by the driver loop.
#[derive(Debug)]
pub enum QueueCommand {
    /// A recognized gesture from upstream.  Runs the fling pre-filter, then
    /// the debounce-or-forward path.
    Gesture(GestureEvent),
    /// An acknowledgment from the consumer.
    Ack {
        source: AckSource,
        result: AckResult,
        kind: GestureKind,
        latency: LatencyTrace,
    },
    /// Stop any active fling immediately.
    StopFling,
    /// Stop the driver loop.
    Shutdown,
}

/// Runs the queue until `Shutdown` is received or all senders are dropped.
pub async fn run_queue(queue: GestureEventQueue, mut commands: mpsc::Receiver<QueueCommand>) {
    info!("gesture queue driver started");
    loop {
        let deadline = queue.debounce_deadline();
        tokio::select! {
            command = commands.recv() => {
                match command {
                    Some(QueueCommand::Gesture(event)) => {
                        if queue.offer(&event) {
                            trace!(kind = ?event.kind(), "event consumed by fling controller");
                        } else {
                            let forwarded = queue.enqueue_or_forward(event);
                            if !forwarded {
                                trace!("event deferred pending scroll quiet period");
                            }
                        }
                    }
                    Some(QueueCommand::Ack { source, result, kind, latency }) => {
                        queue.process_ack(source, result, kind, &latency);
                    }
                    Some(QueueCommand::StopFling) => {
                        queue.stop_fling();
                    }
                    Some(QueueCommand::Shutdown) | None => {
                        debug!("gesture queue driver shutting down");
                        break;
                    }
                }
            }
            _ = sleep_until_deadline(deadline) => {
                trace!("debounce quiet period elapsed");
                queue.flush_debounced_events();
            }
        }
    }
}

/// Sleeps until the deadline, or forever when no timer is armed.
async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(TokioInstant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
