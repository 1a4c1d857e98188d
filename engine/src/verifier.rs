//! Validity predicates over candidates.

use crate::candidate::CandidateV1;

/// A pass/fail validity check over a candidate.
///
/// # Contract
///
/// - `check` must be pure and side-effect-free: same candidate, same answer.
/// - `check` must be total — it must not fail or panic on well-formed input.
///
/// Verifiers compose by conjunction: a candidate is accepted only if every
/// configured verifier accepts it (see [`verify_all`]).
pub trait Verifier: Send + Sync {
    /// Returns `true` if the candidate passes this check.
    fn check(&self, candidate: &CandidateV1) -> bool;
}

/// Accepts candidates whose trimmed state is non-empty.
#[derive(Debug, Clone, Copy)]
pub struct NonEmptyAnswer;

impl Verifier for NonEmptyAnswer {
    fn check(&self, candidate: &CandidateV1) -> bool {
        !candidate.state.trim().is_empty()
    }
}

/// Rejects candidates whose state contains the literal substring
/// "contradiction" (case-insensitive).
///
/// A placeholder lexical guard, not semantic checking.
#[derive(Debug, Clone, Copy)]
pub struct NoContradiction;

impl Verifier for NoContradiction {
    fn check(&self, candidate: &CandidateV1) -> bool {
        !candidate.state.to_lowercase().contains("contradiction")
    }
}

/// Trivial pass-through, used to disable verification.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysTrue;

impl Verifier for AlwaysTrue {
    fn check(&self, _candidate: &CandidateV1) -> bool {
        true
    }
}

/// Short-circuiting conjunction over a verifier list.
///
/// An empty list accepts everything.
#[must_use]
pub fn verify_all(verifiers: &[Box<dyn Verifier>], candidate: &CandidateV1) -> bool {
    verifiers.iter().all(|v| v.check(candidate))
}
