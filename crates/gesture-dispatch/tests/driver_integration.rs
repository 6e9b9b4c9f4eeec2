//! Integration tests for the driver loop.
//!
//! These exercise the real retriggerable timer: the engine only stores a
//! deadline, and the driver's `sleep_until` is what actually fires the
//! debounce flush.  Tokio's paused clock (`start_paused = true`) makes the
//! quiet period elapse deterministically.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::LocalSet;

use gesture_core::{
    AckResult, AckSource, DeviceSource, GestureEvent, GestureKind, LatencyTrace,
};
use gesture_dispatch::driver::{run_queue, QueueCommand};
use gesture_queue::{
    DisabledFlingController, DispatchSurface, GestureEventQueue, GestureQueueConfig,
};

// ── Test doubles ──────────────────────────────────────────────────────────────

/// Records sends and ack reports for assertions.
#[derive(Default)]
struct RecordingClient {
    sent: RefCell<Vec<GestureKind>>,
    acked: RefCell<Vec<GestureKind>>,
}

impl DispatchSurface for RecordingClient {
    fn send(&self, event: &GestureEvent) {
        self.sent.borrow_mut().push(event.kind());
    }

    fn report_ack(&self, event: &GestureEvent, _source: AckSource, _result: AckResult) {
        self.acked.borrow_mut().push(event.kind());
    }
}

fn make_queue(debounce_ms: u64) -> (GestureEventQueue, Rc<RecordingClient>) {
    let client = Rc::new(RecordingClient::default());
    let queue = GestureEventQueue::new(
        Rc::clone(&client) as Rc<dyn DispatchSurface>,
        Box::new(DisabledFlingController::new()),
        GestureQueueConfig {
            debounce_interval: Duration::from_millis(debounce_ms),
        },
    );
    (queue, client)
}

fn gesture(kind: GestureKind) -> QueueCommand {
    QueueCommand::Gesture(GestureEvent::new(kind, DeviceSource::Touchscreen))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_quiet_period_fires_through_the_driver_and_flushes() {
    let local = LocalSet::new();
    local
        .run_until(async {
            // Arrange
            let (queue, client) = make_queue(100);
            let (tx, rx) = mpsc::channel(16);
            let driver = tokio::task::spawn_local(run_queue(queue, rx));

            // Act – a scroll update arms the timer; the scroll end is deferred
            tx.send(gesture(GestureKind::ScrollUpdate)).await.unwrap();
            tx.send(gesture(GestureKind::ScrollEnd)).await.unwrap();

            // Give the driver a moment (well inside the quiet period)
            tokio::time::sleep(Duration::from_millis(10)).await;
            assert_eq!(
                *client.sent.borrow(),
                vec![GestureKind::ScrollUpdate],
                "scroll end must still be deferred inside the quiet period"
            );

            // Let the paused clock run past the quiet period
            tokio::time::sleep(Duration::from_millis(200)).await;

            // Assert
            assert_eq!(
                *client.sent.borrow(),
                vec![GestureKind::ScrollUpdate, GestureKind::ScrollEnd],
                "timer fire must flush the deferred scroll end exactly once"
            );

            tx.send(QueueCommand::Shutdown).await.unwrap();
            driver.await.unwrap();
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_continued_scrolling_extends_the_quiet_period() {
    let local = LocalSet::new();
    local
        .run_until(async {
            // Arrange
            let (queue, client) = make_queue(100);
            let (tx, rx) = mpsc::channel(16);
            let driver = tokio::task::spawn_local(run_queue(queue, rx));

            // Act – update, deferred tap, then another update at t=60ms which
            // must both extend the timer and drop the superseded tap
            tx.send(gesture(GestureKind::ScrollUpdate)).await.unwrap();
            tx.send(gesture(GestureKind::TapDown)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(60)).await;
            tx.send(gesture(GestureKind::ScrollUpdate)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(200)).await;

            // Assert – the tap was never forwarded
            assert_eq!(
                *client.sent.borrow(),
                vec![GestureKind::ScrollUpdate, GestureKind::ScrollUpdate]
            );

            tx.send(QueueCommand::Shutdown).await.unwrap();
            driver.await.unwrap();
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_fling_start_command_is_consumed_not_sent() {
    let local = LocalSet::new();
    local
        .run_until(async {
            // Arrange
            let (queue, client) = make_queue(0);
            let (tx, rx) = mpsc::channel(16);
            let driver = tokio::task::spawn_local(run_queue(queue, rx));

            // Act – the driver offers fling kinds to the controller first
            tx.send(gesture(GestureKind::FlingStart)).await.unwrap();
            tx.send(gesture(GestureKind::Tap)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(1)).await;

            // Assert – only the tap reached the dispatch surface
            assert_eq!(*client.sent.borrow(), vec![GestureKind::Tap]);

            tx.send(QueueCommand::Shutdown).await.unwrap();
            driver.await.unwrap();
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_ack_commands_release_in_forwarding_order() {
    let local = LocalSet::new();
    local
        .run_until(async {
            // Arrange
            let (queue, client) = make_queue(0);
            let (tx, rx) = mpsc::channel(16);
            let driver = tokio::task::spawn_local(run_queue(queue, rx));

            tx.send(gesture(GestureKind::ScrollBegin)).await.unwrap();
            tx.send(gesture(GestureKind::ScrollUpdate)).await.unwrap();

            // Act – acknowledge in reverse order
            for kind in [GestureKind::ScrollUpdate, GestureKind::ScrollBegin] {
                tx.send(QueueCommand::Ack {
                    source: AckSource::Consumer,
                    result: AckResult::Consumed,
                    kind,
                    latency: LatencyTrace::new(),
                })
                .await
                .unwrap();
            }
            tokio::time::sleep(Duration::from_millis(1)).await;

            // Assert – reports come back in forwarding order
            assert_eq!(
                *client.acked.borrow(),
                vec![GestureKind::ScrollBegin, GestureKind::ScrollUpdate]
            );

            tx.send(QueueCommand::Shutdown).await.unwrap();
            driver.await.unwrap();
        })
        .await;
}
