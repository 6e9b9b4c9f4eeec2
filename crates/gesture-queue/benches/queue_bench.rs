//! Benchmarks for the ack-ordering buffer and the debounce decision path.
//!
//! Run with `cargo bench -p gesture-queue`.

use std::rc::Rc;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use gesture_core::{
    AckResult, AckSource, DeviceSource, GestureEvent, GestureKind, LatencyTrace,
};
use gesture_queue::{
    DisabledFlingController, DispatchSurface, GestureEventQueue, GestureQueueConfig,
};

/// Swallows everything; keeps the benchmark focused on queue overhead.
struct NullDispatch;

impl DispatchSurface for NullDispatch {
    fn send(&self, _event: &GestureEvent) {}
    fn report_ack(&self, _event: &GestureEvent, _source: AckSource, _result: AckResult) {}
}

fn make_queue(debounce_interval: Duration) -> GestureEventQueue {
    GestureEventQueue::new(
        Rc::new(NullDispatch),
        Box::new(DisabledFlingController::new()),
        GestureQueueConfig { debounce_interval },
    )
}

fn bench_ack_release(c: &mut Criterion) {
    // Alternating kinds so acks scan past completed entries.
    let kinds = [
        GestureKind::ScrollBegin,
        GestureKind::ScrollUpdate,
        GestureKind::TapDown,
        GestureKind::Tap,
    ];

    c.bench_function("ack_release_depth_64", |b| {
        b.iter_batched(
            || {
                let queue = make_queue(Duration::ZERO);
                for i in 0..64 {
                    queue.enqueue_or_forward(GestureEvent::new(
                        kinds[i % kinds.len()],
                        DeviceSource::Touchscreen,
                    ));
                }
                queue
            },
            |queue| {
                // Ack back-to-front: worst case for the release loop, every
                // entry completes before anything can release.
                for i in (0..64).rev() {
                    queue.process_ack(
                        AckSource::Consumer,
                        AckResult::Consumed,
                        kinds[i % kinds.len()],
                        &LatencyTrace::new(),
                    );
                }
                assert_eq!(queue.pending_ack_count(), 0);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_debounce_decision(c: &mut Criterion) {
    c.bench_function("debounce_scroll_update_stream", |b| {
        b.iter_batched(
            || make_queue(Duration::from_millis(30)),
            |queue| {
                for _ in 0..256 {
                    queue.enqueue_or_forward(GestureEvent::with_deltas(
                        GestureKind::ScrollUpdate,
                        DeviceSource::Touchscreen,
                        0.0,
                        -4.0,
                    ));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_ack_release, bench_debounce_decision);
criterion_main!(benches);
