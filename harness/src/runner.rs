//! Session orchestration: wire a completion backend into a search run.
//!
//! The runner owns composition only — strategy, evaluator, scorer, and
//! verifiers are assembled here and handed to the engine, which owns the
//! algorithm.

use winnower_engine::{
    beam_search, BeamPolicyV1, BeamRunV1, BlendedScorer, CandidateV1, EventSink, NoContradiction,
    NonEmptyAnswer, SearchError, Verifier,
};

use crate::backend::CompletionBackend;
use crate::judgment::RubricEvaluator;
use crate::strategies::{AlternativesStrategy, DEFAULT_MAX_ALTERNATIVES};

/// Configuration for one refinement session.
#[derive(Debug, Clone)]
pub struct SessionConfigV1 {
    /// The task description given to the strategy and the evaluator.
    pub task: String,
    /// Scoring rubric override; `None` uses the default rubric.
    pub rubric: Option<String>,
    /// Engine budgets and scheduling.
    pub policy: BeamPolicyV1,
    /// Cap on alternatives requested per expansion.
    pub max_alternatives: usize,
}

impl SessionConfigV1 {
    #[must_use]
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            rubric: None,
            policy: BeamPolicyV1::default(),
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }
}

/// Run a refinement session from an empty root candidate.
///
/// Composes the backend-driven alternatives strategy, a rubric evaluator
/// behind the blended scorer, and the reference verifier pair
/// ([`NonEmptyAnswer`], [`NoContradiction`]).
///
/// # Errors
///
/// Returns [`SearchError`] for pre-flight policy failures; collaborator
/// failures during the run are contained per candidate and surface through
/// `sink`.
pub fn run_session<B: CompletionBackend>(
    config: &SessionConfigV1,
    backend: &B,
    sink: &mut dyn EventSink,
) -> Result<BeamRunV1, SearchError> {
    let strategy = AlternativesStrategy::with_limit(backend, config.max_alternatives);
    let evaluator = match &config.rubric {
        Some(rubric) => RubricEvaluator::with_rubric(backend, rubric.clone()),
        None => RubricEvaluator::new(backend),
    };
    let scorer = BlendedScorer::new(evaluator);
    let verifiers: Vec<Box<dyn Verifier>> =
        vec![Box::new(NonEmptyAnswer), Box::new(NoContradiction)];

    beam_search(
        CandidateV1::root(""),
        &config.task,
        &strategy,
        &verifiers,
        &scorer,
        &config.policy,
        sink,
    )
}
