//! Text completion backend contract.

use winnower_engine::CollaboratorError;

/// The seam behind which concrete text generators and evaluators live.
///
/// Network clients, their retry/backoff policies, authentication, and usage
/// accounting all belong to implementations of this trait, outside this
/// repository. The harness only composes completions into expansion
/// strategies and quality evaluators.
///
/// # Contract
///
/// - `complete` may block (e.g. on network I/O); the engine isolates slow or
///   failing calls per candidate, so an implementation should enforce its
///   own timeout rather than hang indefinitely.
/// - A failure is reported as [`CollaboratorError`]; the engine excludes the
///   affected candidate for the round and the run continues.
pub trait CompletionBackend: Send + Sync {
    /// Produce a completion for `prompt`, optionally under a system
    /// instruction.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError`] when no completion could be produced.
    fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, CollaboratorError>;
}

impl<B: CompletionBackend + ?Sized> CompletionBackend for &B {
    fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, CollaboratorError> {
        (**self).complete(prompt, system)
    }
}
