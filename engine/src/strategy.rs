//! Expansion strategy contract.

use crate::error::CollaboratorError;

/// One successor proposal from an expansion strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalV1 {
    /// The proposed successor state.
    pub state: String,
    /// Additive tie-break signal applied on top of the scorer's output.
    pub local_bonus: f64,
}

impl ProposalV1 {
    #[must_use]
    pub fn new(state: impl Into<String>, local_bonus: f64) -> Self {
        Self {
            state: state.into(),
            local_bonus,
        }
    }
}

/// Collaborator producing successor states from a given state.
///
/// # Contract
///
/// - The returned sequence is ordered; the engine preserves that order for
///   tie-breaking within a round.
/// - `Ok(vec![])` marks a dead end for that candidate this round — a normal
///   outcome, not a failure.
/// - `Err` signals a per-call collaborator failure, kept distinct from "no
///   expansions". The engine excludes the candidate for the round and
///   surfaces an observability event; the run continues.
pub trait ExpansionStrategy: Send + Sync {
    /// Propose successor states for the given candidate state.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError`] when the strategy could not produce a
    /// proposal list at all.
    fn propose(&self, state: &str) -> Result<Vec<ProposalV1>, CollaboratorError>;
}
