//! Acknowledgment metadata for forwarded gesture events.
//!
//! Every event forwarded to the consumer is eventually *acknowledged*: the
//! consumer reports back whether it used ("consumed") the event, together
//! with which part of the consumer produced the verdict.  The dispatch
//! engine buffers forwarded events until their acknowledgment arrives and
//! releases results strictly in forwarding order.

use serde::{Deserialize, Serialize};

/// Which component produced an acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AckSource {
    /// The remote consumer's main processing path.
    Consumer,
    /// The consumer's compositor fast path (event never reached the main
    /// path, e.g. a scroll handled entirely by compositor-side scrolling).
    CompositorThread,
    /// The dispatch engine itself synthesised the ack locally.
    Engine,
}

/// The consumer's verdict on a forwarded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AckResult {
    /// The consumer handled the event; default follow-up behaviour (e.g.
    /// fling) should be suppressed.
    Consumed,
    /// The consumer ignored the event; the engine may act on it.
    NotConsumed,
}

/// A completed acknowledgment: source plus verdict.
///
/// A pending entry whose ack info is still absent is in the "Unknown" state;
/// `Option<AckInfo>` is therefore the three-valued
/// Unknown/Consumed/NotConsumed status from the engine's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckInfo {
    pub source: AckSource,
    pub result: AckResult,
}

impl AckInfo {
    pub fn new(source: AckSource, result: AckResult) -> Self {
        Self { source, result }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
