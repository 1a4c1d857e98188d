//! Backend-driven expansion strategies.

use winnower_engine::{CollaboratorError, ExpansionStrategy, ProposalV1};

use crate::backend::CompletionBackend;

/// Default cap on alternatives requested per expansion.
pub(crate) const DEFAULT_MAX_ALTERNATIVES: usize = 3;

/// System instruction for alternative-generation completions.
const ALTERNATIVES_SYSTEM: &str = "Generate alternatives only. No explanations.";

/// Local bonus attached to the fallback proposal when the backend produced
/// no usable line — a ranking penalty, not a probability.
const NO_ANSWER_BONUS: f64 = -1.0;

/// Expansion strategy that asks the backend for short alternative answers,
/// one per line.
///
/// Replies are split on lines; bullet dashes and surrounding whitespace are
/// trimmed and blank lines dropped. At most `max_alternatives` proposals are
/// returned, each with a zero local bonus. When no usable line remains, the
/// single fallback proposal `("No Answer", -1.0)` keeps the branch alive
/// with a score handicap instead of dead-ending it.
#[derive(Debug)]
pub struct AlternativesStrategy<B> {
    backend: B,
    max_alternatives: usize,
}

impl<B: CompletionBackend> AlternativesStrategy<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_limit(backend, DEFAULT_MAX_ALTERNATIVES)
    }

    #[must_use]
    pub fn with_limit(backend: B, max_alternatives: usize) -> Self {
        Self {
            backend,
            max_alternatives,
        }
    }
}

impl<B: CompletionBackend> ExpansionStrategy for AlternativesStrategy<B> {
    fn propose(&self, state: &str) -> Result<Vec<ProposalV1>, CollaboratorError> {
        let prompt = format!(
            "Propose up to {} short ALTERNATIVE answers, each on its own line, \
             no preamble. Current guess: {state}",
            self.max_alternatives
        );
        let reply = self.backend.complete(&prompt, Some(ALTERNATIVES_SYSTEM))?;

        let proposals: Vec<ProposalV1> = reply
            .lines()
            .map(|line| line.trim_matches(|c: char| c == '-' || c.is_whitespace()))
            .filter(|line| !line.is_empty())
            .take(self.max_alternatives)
            .map(|line| ProposalV1::new(line, 0.0))
            .collect();

        if proposals.is_empty() {
            return Ok(vec![ProposalV1::new("No Answer", NO_ANSWER_BONUS)]);
        }
        Ok(proposals)
    }
}
