//! JSONL event sink: file-backed observability for search runs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use winnower_engine::{EventSink, SearchEventV1, TerminationReasonV1};

/// Error opening an event sink.
#[derive(Debug)]
pub enum SinkError {
    /// I/O error during open.
    Io { detail: String },
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
        }
    }
}

impl std::error::Error for SinkError {}

/// File sink writing one JSON line per event.
///
/// Lifecycle: opened once per process via [`JsonlSink::create`], flushed
/// after every record so a crash loses at most the in-flight event, closed
/// when dropped. Write failures never reach the engine — they are counted
/// and the event is dropped; check [`JsonlSink::write_failures`] after the
/// run.
#[derive(Debug)]
pub struct JsonlSink {
    writer: BufWriter<File>,
    write_failures: u64,
}

impl JsonlSink {
    /// Open (or truncate) the sink file.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Io`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path).map_err(|e| SinkError::Io {
            detail: format!("create {}: {e}", path.display()),
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            write_failures: 0,
        })
    }

    /// Events that could not be written.
    #[must_use]
    pub fn write_failures(&self) -> u64 {
        self.write_failures
    }

    fn write_line(&mut self, value: &serde_json::Value) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl EventSink for JsonlSink {
    fn record(&mut self, event: &SearchEventV1) {
        let value = event_json(event);
        if self.write_line(&value).is_err() {
            self.write_failures += 1;
        }
    }
}

/// Render an event as a flat JSON object.
fn event_json(event: &SearchEventV1) -> serde_json::Value {
    match event {
        SearchEventV1::RoundCompleted {
            round,
            generated,
            rejected,
            failed,
            kept,
        } => serde_json::json!({
            "event": "round_completed",
            "round": round,
            "generated": generated,
            "rejected": rejected,
            "failed": failed,
            "kept": kept,
        }),
        SearchEventV1::ExpansionFailed {
            round,
            state_preview,
            detail,
        } => serde_json::json!({
            "event": "expansion_failed",
            "round": round,
            "state_preview": state_preview,
            "detail": detail,
        }),
        SearchEventV1::ScoringFailed {
            round,
            state_preview,
            detail,
        } => serde_json::json!({
            "event": "scoring_failed",
            "round": round,
            "state_preview": state_preview,
            "detail": detail,
        }),
        SearchEventV1::RunTerminated { reason } => match reason {
            TerminationReasonV1::StepBudgetExhausted => serde_json::json!({
                "event": "run_terminated",
                "reason": "step_budget_exhausted",
            }),
            TerminationReasonV1::DeadEnd { round } => serde_json::json!({
                "event": "run_terminated",
                "reason": "dead_end",
                "round": round,
            }),
        },
    }
}
