//! Winnower Harness: collaborator plumbing around the engine.
//!
//! The harness does NOT implement search logic — it delegates to
//! `winnower_engine`. It owns the seams and adapters the engine's
//! collaborators plug into:
//!
//! - [`CompletionBackend`] — the contract concrete text generators and
//!   evaluators implement (network clients live outside this repo)
//! - [`RubricEvaluator`] / [`parse_judgment`] — structured quality judgments
//!   with malformed-output recovery
//! - [`AlternativesStrategy`] — backend-driven expansion proposals
//! - [`JsonlSink`] — file-backed observability with a per-record flush
//! - [`run_session`] — composition of all of the above into one search run
//!
//! ```text
//! winnower_engine  ←  winnower_harness
//! (beam rounds)       (backends, judgments, sinks, sessions)
//! ```

#![forbid(unsafe_code)]

pub mod backend;
pub mod judgment;
pub mod runner;
pub mod sink;
pub mod strategies;

pub use backend::CompletionBackend;
pub use judgment::{parse_judgment, RubricEvaluator};
pub use runner::{run_session, SessionConfigV1};
pub use sink::{JsonlSink, SinkError};
pub use strategies::AlternativesStrategy;
