//! Beam policy types.

use crate::error::SearchError;

/// Budget and scheduling configuration for one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeamPolicyV1 {
    /// Bound on rounds. Must be positive.
    pub max_steps: u32,
    /// Frontier width bound. Must be positive.
    pub beam_size: usize,
    /// Bound on intra-round concurrency. Must be positive; `1` runs the
    /// round fully synchronously.
    pub worker_threads: usize,
    /// Per-round scorer memoization (default: off).
    pub score_memo: ScoreMemoV1,
}

impl BeamPolicyV1 {
    /// Validate the policy before any round runs.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for any non-positive bound.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_steps == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_steps must be positive (got 0)".into(),
            });
        }
        if self.beam_size == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "beam_size must be positive (got 0)".into(),
            });
        }
        if self.worker_threads == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "worker_threads must be positive (got 0)".into(),
            });
        }
        Ok(())
    }
}

impl Default for BeamPolicyV1 {
    fn default() -> Self {
        Self {
            max_steps: 8,
            beam_size: 8,
            worker_threads: 4,
            score_memo: ScoreMemoV1::Off,
        }
    }
}

/// Whether identical child states within one round share a single scorer
/// call.
///
/// `PerRound` only deduplicates *scorer invocations*: every child keeps its
/// own local bonus on top of the shared scorer value, so kept/pruned
/// decisions are unchanged — only collaborator call counts differ. Off by
/// default because call counts are observable to metered collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMemoV1 {
    /// Every kept child is scored individually.
    Off,
    /// Children with byte-identical states are scored once per round.
    PerRound,
}
