//! Candidate hypothesis value with lineage.

/// An immutable hypothesis carried through the beam.
///
/// A candidate is a value object: `extend` produces a new, independent
/// candidate and leaves `self` untouched, so one parent may root several
/// divergent children within the same round.
///
/// `score` is round-local. The engine *assigns* it after scoring each round
/// (it does not accumulate across the candidate's ancestry) — the additive
/// delta taken by [`CandidateV1::extend`] is provisional only and is
/// overwritten before the candidate can reach the frontier. See
/// [`crate::search::beam_search`].
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateV1 {
    /// Opaque hypothesis text. The engine assumes no internal structure.
    pub state: String,
    /// Quality value for the round that produced this candidate.
    pub score: f64,
    /// Prior states, oldest first. Append-only.
    pub history: Vec<String>,
}

impl CandidateV1 {
    /// Construct the initial candidate for a search run.
    #[must_use]
    pub fn root(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            score: 0.0,
            history: Vec::new(),
        }
    }

    /// Derive a child candidate.
    ///
    /// The child's state is `new_state`, its score is `self.score +
    /// delta_score`, and its history is this candidate's history with this
    /// candidate's own state appended. Pure; no error conditions.
    #[must_use]
    pub fn extend(&self, new_state: impl Into<String>, delta_score: f64) -> Self {
        let mut history = self.history.clone();
        history.push(self.state.clone());
        Self {
            state: new_state.into(),
            score: self.score + delta_score,
            history,
        }
    }

    /// Number of `extend` steps since the root candidate.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.history.len()
    }
}
