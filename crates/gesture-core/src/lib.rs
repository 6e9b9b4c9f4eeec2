//! # gesture-core
//!
//! Shared value types for the gesture dispatch engine: gesture events, the
//! closed set of gesture kinds, latency traces, and acknowledgment metadata.
//!
//! This crate is used by both the queue engine (`gesture-queue`) and host
//! applications (`gesture-dispatch`).  It has zero dependencies on OS APIs,
//! async runtimes, or network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! A gesture recognizer (upstream, not part of this workspace) turns raw
//! touch/trackpad samples into discrete *gesture events*: scroll-begin,
//! scroll-update, pinch-begin, taps, and so on.  Those events flow through
//! the dispatch engine to a remote consumer, which later *acknowledges* each
//! one with a consumed/not-consumed verdict.
//!
//! This crate defines:
//!
//! - **`event`** – The [`GestureEvent`] value itself: a kind, a delta
//!   payload, the source device, and an attached [`LatencyTrace`].
//!
//! - **`ack`** – Acknowledgment metadata: who produced the ack
//!   ([`AckSource`]) and whether the consumer used the event
//!   ([`AckResult`]).

// Declare the two top-level modules.  Rust will look for each in a
// subdirectory or file with the same name (e.g., src/event/mod.rs).
pub mod ack;
pub mod event;

// Re-export the most-used types at the crate root so callers can write
// `gesture_core::GestureEvent` instead of `gesture_core::event::GestureEvent`.
pub use ack::{AckInfo, AckResult, AckSource};
pub use event::latency::{LatencyAnnotation, LatencyStage, LatencyTrace};
pub use event::{DeviceSource, GestureEvent, GestureKind, Velocity};
