//! Structured quality judgments: rubric prompts and reply parsing.

use winnower_engine::{CollaboratorError, QualityEvaluator, ScoreV1};

use crate::backend::CompletionBackend;

/// Default scoring rubric appended to every judgment prompt.
const DEFAULT_RUBRIC: &str = "You are a verifier. Score the candidate's hypothesis for \
     correctness given the task. Return a single JSON object: \
     {\"score\": number between 0 and 1, \"reason\": \"short justification\"}";

/// System instruction for judgment completions.
const JUDGE_SYSTEM: &str = "Act as a strict verifier.";

/// Parse a backend reply as a structured judgment.
///
/// Accepts a bare JSON object, or an object embedded in prose (the slice
/// from the first `{` to the last `}` is retried). A missing `score` or
/// `reason` field defaults to `0.0` / `""`; the score is clamped into
/// `[0.0, 1.0]`. Anything unparseable yields the `(0.0, "unparseable")`
/// fallback — malformed output is recovered locally, never surfaced as an
/// error.
#[must_use]
pub fn parse_judgment(text: &str) -> ScoreV1 {
    let trimmed = text.trim();
    let object = parse_object(trimmed).or_else(|| {
        let start = trimmed.find('{')?;
        let end = trimmed.rfind('}')?;
        if start < end {
            parse_object(&trimmed[start..=end])
        } else {
            None
        }
    });

    match object {
        Some(obj) => {
            let score = obj
                .get("score")
                .and_then(serde_json::Value::as_f64)
                .unwrap_or(0.0);
            let reason = obj
                .get("reason")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("")
                .to_string();
            ScoreV1::new(score.clamp(0.0, 1.0), reason)
        }
        None => ScoreV1::new(0.0, "unparseable"),
    }
}

fn parse_object(text: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Quality evaluator that prompts a completion backend with a rubric and
/// parses the structured reply.
///
/// The rubric is read-only configuration; the evaluator is otherwise a pure
/// function from `(task, state)` to a judgment.
#[derive(Debug)]
pub struct RubricEvaluator<B> {
    backend: B,
    rubric: String,
}

impl<B: CompletionBackend> RubricEvaluator<B> {
    /// Evaluator with the default rubric.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_rubric(backend, DEFAULT_RUBRIC)
    }

    /// Evaluator with a caller-supplied rubric.
    #[must_use]
    pub fn with_rubric(backend: B, rubric: impl Into<String>) -> Self {
        Self {
            backend,
            rubric: rubric.into(),
        }
    }

    fn prompt(&self, task: &str, state: &str) -> String {
        format!(
            "Task:\n{task}\n\nCandidate:\n{state}\n\n{rubric}",
            rubric = self.rubric
        )
    }
}

impl<B: CompletionBackend> QualityEvaluator for RubricEvaluator<B> {
    fn judge(&self, task: &str, state: &str) -> Result<ScoreV1, CollaboratorError> {
        let reply = self
            .backend
            .complete(&self.prompt(task, state), Some(JUDGE_SYSTEM))?;
        Ok(parse_judgment(&reply))
    }
}
