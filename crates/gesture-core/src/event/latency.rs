//! Latency tracing for gesture events.
//!
//! Every [`GestureEvent`](super::GestureEvent) carries a [`LatencyTrace`]: an
//! opaque, append-only record of *when* the event passed *which* pipeline
//! stage.  Stages annotate the trace as the event moves downstream, and when
//! the consumer acknowledges an event its own timing data is merged back in.
//!
//! # Why append-only? (for beginners)
//!
//! Acknowledgments can arrive out of order and from different sources, so
//! two traces for the same event may need to be combined.  Merging is
//! defined so that existing annotations are never mutated or reordered and
//! only *unseen* stages are appended.  That makes the merge commutative for
//! the purposes of the dispatch engine: it never matters which half arrived
//! first, the union is the same.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline stages recorded in a [`LatencyTrace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatencyStage {
    /// The recognizer produced the event.
    Generated,
    /// The event entered the dispatch engine.
    QueuedMain,
    /// The event was handed to the dispatch surface for transmission.
    DispatchedToConsumer,
    /// The consumer's acknowledgment was received.
    AckReceivedFromConsumer,
}

/// One timestamped stage entry in a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyAnnotation {
    pub stage: LatencyStage,
    /// Microseconds since Unix epoch at the time the stage was recorded.
    pub timestamp_us: u64,
}

/// An append-only timing record attached to a gesture event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyTrace {
    /// Correlates all annotations for one event across process boundaries.
    trace_id: Uuid,
    annotations: Vec<LatencyAnnotation>,
}

impl LatencyTrace {
    /// Creates an empty trace with a fresh id.
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4(),
            annotations: Vec::new(),
        }
    }

    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    pub fn annotations(&self) -> &[LatencyAnnotation] {
        &self.annotations
    }

    /// Appends a stage annotation.  Duplicate stages are ignored so that a
    /// stage recorded twice (e.g. by a retried dispatch) keeps its original
    /// timestamp.
    pub fn annotate(&mut self, stage: LatencyStage, timestamp_us: u64) {
        if self.has_stage(stage) {
            return;
        }
        self.annotations.push(LatencyAnnotation {
            stage,
            timestamp_us,
        });
    }

    /// Merges another trace into this one, appending every annotation whose
    /// stage is not already present.  Existing annotations are never
    /// mutated or reordered.
    pub fn merge_from(&mut self, other: &LatencyTrace) {
        for annotation in &other.annotations {
            if !self.has_stage(annotation.stage) {
                self.annotations.push(*annotation);
            }
        }
    }

    fn has_stage(&self, stage: LatencyStage) -> bool {
        self.annotations.iter().any(|a| a.stage == stage)
    }
}

impl Default for LatencyTrace {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_appends_in_order() {
        // Arrange
        let mut trace = LatencyTrace::new();

        // Act
        trace.annotate(LatencyStage::Generated, 100);
        trace.annotate(LatencyStage::QueuedMain, 250);

        // Assert
        let stages: Vec<_> = trace.annotations().iter().map(|a| a.stage).collect();
        assert_eq!(stages, vec![LatencyStage::Generated, LatencyStage::QueuedMain]);
    }

    #[test]
    fn test_annotate_ignores_duplicate_stage() {
        // Arrange
        let mut trace = LatencyTrace::new();
        trace.annotate(LatencyStage::Generated, 100);

        // Act – second annotation for the same stage must not overwrite
        trace.annotate(LatencyStage::Generated, 999);

        // Assert
        assert_eq!(trace.annotations().len(), 1);
        assert_eq!(trace.annotations()[0].timestamp_us, 100);
    }

    #[test]
    fn test_merge_appends_only_unseen_stages() {
        // Arrange
        let mut ours = LatencyTrace::new();
        ours.annotate(LatencyStage::Generated, 100);
        ours.annotate(LatencyStage::QueuedMain, 200);

        let mut theirs = LatencyTrace::new();
        theirs.annotate(LatencyStage::QueuedMain, 555); // already present in ours
        theirs.annotate(LatencyStage::AckReceivedFromConsumer, 900);

        // Act
        ours.merge_from(&theirs);

        // Assert – QueuedMain kept its original timestamp, ack stage appended
        assert_eq!(ours.annotations().len(), 3);
        assert_eq!(ours.annotations()[1].timestamp_us, 200);
        assert_eq!(
            ours.annotations()[2].stage,
            LatencyStage::AckReceivedFromConsumer
        );
    }

    #[test]
    fn test_merge_is_commutative_up_to_stage_set() {
        // Arrange – two traces with one shared and one distinct stage each
        let mut a = LatencyTrace::new();
        a.annotate(LatencyStage::Generated, 1);
        a.annotate(LatencyStage::QueuedMain, 2);

        let mut b = LatencyTrace::new();
        b.annotate(LatencyStage::QueuedMain, 20);
        b.annotate(LatencyStage::DispatchedToConsumer, 30);

        let mut ab = a.clone();
        ab.merge_from(&b);
        let mut ba = b.clone();
        ba.merge_from(&a);

        // Act – compare the resulting stage sets
        let mut ab_stages: Vec<_> = ab.annotations().iter().map(|x| x.stage).collect();
        let mut ba_stages: Vec<_> = ba.annotations().iter().map(|x| x.stage).collect();
        ab_stages.sort_by_key(|s| *s as u8);
        ba_stages.sort_by_key(|s| *s as u8);

        // Assert
        assert_eq!(ab_stages, ba_stages);
    }
}
