//! Observability events and the injected sink contract.
//!
//! The engine surfaces per-round accounting and per-candidate collaborator
//! failures as structured events through an explicitly injected sink, with a
//! defined lifecycle owned by the caller (opened once, flushed per record,
//! closed at process exit). Events are recorded on the engine thread only,
//! after each round's barrier — sinks never see concurrent calls.

use crate::trace::TerminationReasonV1;

/// Maximum chars of candidate state carried in a failure event.
const STATE_PREVIEW_CHARS: usize = 80;

/// A structured observability event emitted during a search run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEventV1 {
    /// A round finished and its survivors were appended to the trace.
    RoundCompleted {
        round: u32,
        /// Children proposed by the expansion strategy.
        generated: usize,
        /// Children rejected by verification.
        rejected: usize,
        /// Parents or children excluded by collaborator failure.
        failed: usize,
        /// Survivors retained after truncation to the beam width.
        kept: usize,
    },
    /// An expansion strategy call failed; the parent was excluded this round.
    ExpansionFailed {
        round: u32,
        state_preview: String,
        detail: String,
    },
    /// A scorer call failed; the child was excluded this round.
    ScoringFailed {
        round: u32,
        state_preview: String,
        detail: String,
    },
    /// The run terminated.
    RunTerminated { reason: TerminationReasonV1 },
}

/// Bounded prefix of a candidate state for inclusion in failure events.
#[must_use]
pub fn state_preview(state: &str) -> String {
    state.chars().take(STATE_PREVIEW_CHARS).collect()
}

/// Injected observability sink.
///
/// Sink failures must stay inside the sink (count them, drop the event) —
/// observability must never take down a run.
pub trait EventSink {
    /// Record one event. Called from the engine thread only.
    fn record(&mut self, event: &SearchEventV1);
}

/// Discards every event. The default for callers that don't observe runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: &SearchEventV1) {}
}

/// In-memory sink collecting events for inspection in tests.
#[derive(Debug, Default)]
pub struct VecSink {
    pub events: Vec<SearchEventV1>,
}

impl EventSink for VecSink {
    fn record(&mut self, event: &SearchEventV1) {
        self.events.push(event.clone());
    }
}
