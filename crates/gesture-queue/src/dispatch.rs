//! Dispatch surface collaborator trait.
//!
//! The dispatch surface is the queue's window to the outside world: it
//! actually transmits forwarded events to the remote consumer and receives
//! the strictly-ordered acknowledgment reports once the queue has
//! reconstituted them.

use gesture_core::{AckResult, AckSource, GestureEvent};

/// The object the queue calls to transmit events and report completed acks.
///
/// Methods take `&self`; implementations use interior mutability so one
/// shared handle can be held by the queue and by test recorders alike.
///
/// # Re-entrancy
///
/// The consumer may acknowledge *synchronously*: a call to
/// [`GestureEventQueue::process_ack`](crate::GestureEventQueue::process_ack)
/// is allowed from inside `send` (the consumer acked before control
/// returned) and from inside `report_ack` (reporting one ack triggered
/// another).  The queue guarantees this is safe and preserves ordering.
pub trait DispatchSurface {
    /// Transmits an event to the consumer.  Fire-and-forget: completion is
    /// signalled later through
    /// [`process_ack`](crate::GestureEventQueue::process_ack).
    fn send(&self, event: &GestureEvent);

    /// Reports a completed event back to the owner, strictly in the order
    /// the events were forwarded.
    fn report_ack(&self, event: &GestureEvent, source: AckSource, result: AckResult);
}
