//! Gesture dispatch host entry point.
//!
//! Headless demo wiring: builds the engine with an inert fling controller
//! and a logging dispatch surface, feeds a synthetic scroll burst plus a tap
//! through the driver, acknowledges the forwarded events, and shuts down.
//!
//! ```text
//! main()
//!  └─ config::load()          -- TOML config, defaults on first run
//!  └─ LocalSet::run_until
//!       ├─ run_queue()        -- driver loop (current-thread task)
//!       └─ synthetic burst    -- gestures + acks over the command channel
//! ```

use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gesture_core::{
    AckResult, AckSource, DeviceSource, GestureEvent, GestureKind, LatencyTrace,
};
use gesture_queue::{DisabledFlingController, DispatchSurface, GestureEventQueue};

use gesture_dispatch::config;
use gesture_dispatch::driver::{run_queue, QueueCommand};

/// Dispatch surface that logs every send and every in-order ack report.
struct LoggingDispatch;

impl DispatchSurface for LoggingDispatch {
    fn send(&self, event: &GestureEvent) {
        info!(kind = ?event.kind(), trace = %event.latency().trace_id(), "send");
    }

    fn report_ack(&self, event: &GestureEvent, source: AckSource, result: AckResult) {
        info!(kind = ?event.kind(), ?source, ?result, "ack");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "gesture-dispatch.toml".to_string());
    let config = config::load(Path::new(&config_path))?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.engine.log_level.clone())),
        )
        .init();

    info!(
        debounce_ms = config.engine.debounce_interval_ms,
        "gesture dispatch host starting"
    );

    // The queue is Rc-based; everything runs on this thread's LocalSet.
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let queue = GestureEventQueue::new(
                Rc::new(LoggingDispatch),
                Box::new(DisabledFlingController::new()),
                config.queue_config(),
            );

            let (tx, rx) = mpsc::channel(64);
            let driver = tokio::task::spawn_local(run_queue(queue, rx));

            // Synthetic burst: a short scroll stream with a tap-down landing
            // mid-scroll.  The tap is deferred until the stream goes quiet.
            let burst = [
                GestureEvent::new(GestureKind::ScrollBegin, DeviceSource::Touchscreen),
                GestureEvent::with_deltas(
                    GestureKind::ScrollUpdate,
                    DeviceSource::Touchscreen,
                    0.0,
                    -12.0,
                ),
                GestureEvent::with_deltas(
                    GestureKind::ScrollUpdate,
                    DeviceSource::Touchscreen,
                    0.0,
                    -8.0,
                ),
                GestureEvent::new(GestureKind::TapDown, DeviceSource::Touchscreen),
            ];
            for event in burst {
                tx.send(QueueCommand::Gesture(event)).await?;
            }

            // Let the quiet period elapse so the deferred tap flushes.
            tokio::time::sleep(Duration::from_millis(
                config.engine.debounce_interval_ms + 20,
            ))
            .await;

            // Acknowledge everything that was forwarded, out of order on
            // purpose: the engine reports them back in forwarding order.
            for kind in [
                GestureKind::TapDown,
                GestureKind::ScrollUpdate,
                GestureKind::ScrollBegin,
                GestureKind::ScrollUpdate,
            ] {
                tx.send(QueueCommand::Ack {
                    source: AckSource::Consumer,
                    result: AckResult::NotConsumed,
                    kind,
                    latency: LatencyTrace::new(),
                })
                .await?;
            }

            tx.send(QueueCommand::Shutdown).await?;
            driver.await?;
            info!("gesture dispatch host done");
            Ok(())
        })
        .await
}
