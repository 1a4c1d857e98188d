//! Search entry point and the round loop.
//!
//! Each round: expand every frontier member through the injected strategy,
//! filter children through the verifier conjunction, assign round-local
//! scores, stable-sort descending, truncate to the beam width, append the
//! survivors to the trace. A round with zero survivors terminates the run.
//!
//! Expansion and scoring of distinct candidates within one round are
//! independent and run on a bounded worker pool; the round itself is a
//! barrier, and rounds are strictly sequential. Results are collected in
//! input order, so the tie-break order is identical to the sequential
//! schedule regardless of worker count.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;
use sha2::{Digest, Sha256};

use crate::candidate::CandidateV1;
use crate::error::SearchError;
use crate::event::{state_preview, EventSink, SearchEventV1};
use crate::policy::{BeamPolicyV1, ScoreMemoV1};
use crate::scorer::{CandidateScorer, ScoreV1};
use crate::strategy::ExpansionStrategy;
use crate::trace::{BeamRunV1, RoundSummaryV1, TerminationReasonV1};
use crate::verifier::{verify_all, Verifier};

/// Outcome of one strategy call, with panics folded into failures.
enum ExpandOutcome {
    Proposed(Vec<crate::strategy::ProposalV1>),
    Failed(String),
}

/// Outcome of one scorer call, with panics folded into failures.
#[derive(Clone)]
enum ScoreOutcome {
    Scored(ScoreV1),
    Failed(String),
}

/// How a kept child obtains its scorer result under the memo policy.
enum ScorePlan {
    /// This child gets its own scorer call.
    Fresh,
    /// This child reuses the scorer result of an earlier child (by index).
    Shared(usize),
}

/// A verified child awaiting its round score.
struct PendingChild {
    candidate: CandidateV1,
    local_bonus: f64,
}

/// Run score-guided beam refinement from an initial candidate.
///
/// Returns the round-ordered trace described on [`BeamRunV1`] — per-round
/// slices are sorted, the concatenation is not. Collaborator failures are
/// contained per candidate: a failing (or panicking) strategy call excludes
/// that parent's expansions for the round, a failing scorer call excludes
/// that child, and each surfaces an event through `sink`; one bad candidate
/// never aborts a healthy beam.
///
/// # Errors
///
/// Returns [`SearchError`] only for pre-flight failures (invalid policy,
/// worker pool setup). Once rounds begin, the run always completes with a
/// full trace.
pub fn beam_search(
    initial: CandidateV1,
    task: &str,
    strategy: &dyn ExpansionStrategy,
    verifiers: &[Box<dyn Verifier>],
    scorer: &dyn CandidateScorer,
    policy: &BeamPolicyV1,
    sink: &mut dyn EventSink,
) -> Result<BeamRunV1, SearchError> {
    policy.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(policy.worker_threads)
        .build()
        .map_err(|e| SearchError::WorkerPool {
            detail: e.to_string(),
        })?;

    let mut frontier = vec![initial];
    let mut trace: Vec<CandidateV1> = Vec::new();
    let mut rounds: Vec<RoundSummaryV1> = Vec::new();
    let mut termination = TerminationReasonV1::StepBudgetExhausted;

    for round in 0..policy.max_steps {
        let mut generated = 0usize;
        let mut rejected = 0usize;
        let mut failed = 0usize;

        // Expansion barrier: one strategy call per frontier member, collected
        // in frontier order.
        let expansions: Vec<ExpandOutcome> = pool.install(|| {
            frontier
                .par_iter()
                .map(|c| run_propose(strategy, &c.state))
                .collect()
        });

        // Build children in production order: frontier order outer, proposal
        // order inner. This order is the tie-break for the round sort.
        let mut pending: Vec<PendingChild> = Vec::new();
        for (parent, outcome) in frontier.iter().zip(expansions) {
            match outcome {
                ExpandOutcome::Failed(detail) => {
                    failed += 1;
                    sink.record(&SearchEventV1::ExpansionFailed {
                        round,
                        state_preview: state_preview(&parent.state),
                        detail,
                    });
                }
                ExpandOutcome::Proposed(proposals) => {
                    for proposal in proposals {
                        generated += 1;
                        // The delta is always zero here; the local bonus is
                        // applied on top of the scorer output below.
                        let child = parent.extend(proposal.state, 0.0);
                        if verify_all(verifiers, &child) {
                            pending.push(PendingChild {
                                candidate: child,
                                local_bonus: proposal.local_bonus,
                            });
                        } else {
                            rejected += 1;
                        }
                    }
                }
            }
        }

        // Scoring barrier: one scorer call per kept child (or per distinct
        // state under the memo), collected in child order.
        let plan = build_score_plan(&pending, policy.score_memo);
        let fresh: Vec<usize> = plan
            .iter()
            .enumerate()
            .filter_map(|(i, p)| matches!(p, ScorePlan::Fresh).then_some(i))
            .collect();
        let fresh_outcomes: Vec<ScoreOutcome> = pool.install(|| {
            fresh
                .par_iter()
                .map(|&i| run_score(scorer, task, &pending[i].candidate.state))
                .collect()
        });
        let mut outcomes: Vec<Option<ScoreOutcome>> = (0..pending.len()).map(|_| None).collect();
        for (&i, outcome) in fresh.iter().zip(fresh_outcomes) {
            outcomes[i] = Some(outcome);
        }
        for (i, p) in plan.iter().enumerate() {
            if let ScorePlan::Shared(j) = p {
                outcomes[i] = outcomes[*j].clone();
            }
        }

        // Assign round-local scores. This overwrites the provisional score
        // coming out of `extend` — scores never accumulate across ancestry.
        let mut survivors: Vec<CandidateV1> = Vec::new();
        for (child, outcome) in pending.into_iter().zip(outcomes) {
            let PendingChild {
                mut candidate,
                local_bonus,
            } = child;
            match outcome {
                Some(ScoreOutcome::Scored(score)) => {
                    candidate.score = score.value + local_bonus;
                    survivors.push(candidate);
                }
                Some(ScoreOutcome::Failed(detail)) => {
                    failed += 1;
                    sink.record(&SearchEventV1::ScoringFailed {
                        round,
                        state_preview: state_preview(&candidate.state),
                        detail,
                    });
                }
                // Unreachable: every index is Fresh or Shared-of-Fresh.
                None => {
                    failed += 1;
                }
            }
        }

        // Stable sort, score descending: ties keep production order. A NaN
        // score compares as equal, falling back to production order too.
        survivors.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        survivors.truncate(policy.beam_size);

        let kept = survivors.len();
        rounds.push(RoundSummaryV1 {
            round,
            generated,
            rejected,
            failed,
            kept,
        });
        sink.record(&SearchEventV1::RoundCompleted {
            round,
            generated,
            rejected,
            failed,
            kept,
        });

        if survivors.is_empty() {
            termination = TerminationReasonV1::DeadEnd { round };
            break;
        }

        trace.extend(survivors.iter().cloned());
        frontier = survivors;
    }

    sink.record(&SearchEventV1::RunTerminated {
        reason: termination,
    });

    Ok(BeamRunV1 {
        trace,
        rounds,
        termination,
    })
}

fn run_propose(strategy: &dyn ExpansionStrategy, state: &str) -> ExpandOutcome {
    match catch_unwind(AssertUnwindSafe(|| strategy.propose(state))) {
        Ok(Ok(proposals)) => ExpandOutcome::Proposed(proposals),
        Ok(Err(e)) => ExpandOutcome::Failed(e.detail),
        Err(_) => ExpandOutcome::Failed("expansion strategy panicked".into()),
    }
}

fn run_score(scorer: &dyn CandidateScorer, task: &str, state: &str) -> ScoreOutcome {
    match catch_unwind(AssertUnwindSafe(|| scorer.score(task, state))) {
        Ok(Ok(score)) => ScoreOutcome::Scored(score),
        Ok(Err(e)) => ScoreOutcome::Failed(e.detail),
        Err(_) => ScoreOutcome::Failed("scorer panicked".into()),
    }
}

/// Decide which children get their own scorer call.
///
/// With the memo off, every child is fresh. With the per-round memo on,
/// the first child with a given state hash is fresh and later ones share
/// its result. The memo never outlives the round.
fn build_score_plan(pending: &[PendingChild], memo: ScoreMemoV1) -> Vec<ScorePlan> {
    match memo {
        ScoreMemoV1::Off => pending.iter().map(|_| ScorePlan::Fresh).collect(),
        ScoreMemoV1::PerRound => {
            let mut first_seen: HashMap<String, usize> = HashMap::new();
            pending
                .iter()
                .enumerate()
                .map(|(i, child)| {
                    let key = memo_key(&child.candidate.state);
                    match first_seen.get(&key) {
                        Some(&j) => ScorePlan::Shared(j),
                        None => {
                            first_seen.insert(key, i);
                            ScorePlan::Fresh
                        }
                    }
                })
                .collect()
        }
    }
}

/// Memo key: hex digest of the state bytes.
fn memo_key(state: &str) -> String {
    hex::encode(Sha256::digest(state.as_bytes()))
}
