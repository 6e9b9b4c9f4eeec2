//! # gesture-queue
//!
//! The gesture input dispatch and acknowledgment-ordering engine.  Sits
//! between a stream of recognized gestures and a remote event consumer,
//! deciding which events to forward immediately, which to defer or coalesce
//! around a scroll stream, and how to reconstitute a strictly-ordered
//! acknowledgment stream when acks arrive out of order.
//!
//! # Architecture overview (for beginners)
//!
//! Events flow through three stages:
//!
//! ```text
//! event ──▶ fling pre-filter ──▶ debounce stage ──▶ forward
//!              │ consumed            │ deferred        │
//!              ▼                     ▼                 ▼
//!        FlingController      debounce queue    DispatchSurface::send
//!                             (quiet-period            │
//!                              timer flush)            ▼ … async …
//!                                               ack-ordering buffer
//!                                                      │ in order
//!                                                      ▼
//!                                            DispatchSurface::report_ack
//! ```
//!
//! - **`fling`** – The [`FlingController`] collaborator trait.  It is offered
//!   every event first and owns the two momentum kinds (fling-start,
//!   fling-cancel) outright.
//!
//! - **`dispatch`** – The [`DispatchSurface`] collaborator trait: transmits
//!   forwarded events and receives the in-order acknowledgment reports.
//!
//! - **`queue`** – [`GestureEventQueue`], the engine itself.
//!
//! The engine is single-threaded and cooperative: every entry point runs on
//! one logical thread, no operation blocks, and the only locking construct
//! is a `RefCell` that is never held across a collaborator call.

pub mod dispatch;
pub mod fling;
pub mod queue;

pub use dispatch::DispatchSurface;
pub use fling::{DisabledFlingController, FlingController, TapSuppressionController};
pub use queue::{GestureEventQueue, GestureQueueConfig};
