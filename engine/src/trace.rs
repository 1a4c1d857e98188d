//! Run trace types: the engine's return contract.

use crate::candidate::CandidateV1;

/// Why a search run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// `max_steps` rounds completed.
    StepBudgetExhausted,
    /// A round produced zero surviving children; no further rounds ran.
    DeadEnd { round: u32 },
}

/// Per-round accounting recorded alongside the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummaryV1 {
    pub round: u32,
    /// Children proposed by the expansion strategy.
    pub generated: usize,
    /// Children rejected by verification.
    pub rejected: usize,
    /// Parents or children excluded by collaborator failure.
    pub failed: usize,
    /// Survivors retained after truncation to the beam width.
    pub kept: usize,
}

/// The result of a search run.
///
/// `trace` is the historical trace: the concatenation, in round order, of
/// each round's locally sorted, beam-limited survivors. It is NOT globally
/// re-sorted across rounds — a later round's worst survivor may outscore an
/// earlier round's best. Consumers wanting a global top-K must re-sort
/// explicitly; [`BeamRunV1::top`] does exactly that. The per-round slices
/// themselves are in non-increasing score order.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamRunV1 {
    /// Round-ordered survivor trace (see type docs — not globally sorted).
    pub trace: Vec<CandidateV1>,
    /// One summary per completed round, in round order.
    pub rounds: Vec<RoundSummaryV1>,
    /// Why the run stopped.
    pub termination: TerminationReasonV1,
}

impl BeamRunV1 {
    /// The explicit global re-sort: the `k` best candidates across all
    /// rounds, score descending, trace order on ties.
    #[must_use]
    pub fn top(&self, k: usize) -> Vec<&CandidateV1> {
        let mut all: Vec<&CandidateV1> = self.trace.iter().collect();
        all.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        all.truncate(k);
        all
    }

    /// Survivors of the last recorded round, in their round-sorted order.
    /// Empty when no round ran, or when the run dead-ended (the dead round
    /// kept nothing).
    #[must_use]
    pub fn final_frontier(&self) -> &[CandidateV1] {
        match self.rounds.last() {
            Some(last) => {
                let start = self.trace.len() - last.kept;
                &self.trace[start..]
            }
            None => &[],
        }
    }
}
