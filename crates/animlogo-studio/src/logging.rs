//! Structured run logging.
//!
//! Every pipeline run gets a fresh `run_id` so the log lines of one logo
//! (image call, submit, polls, download) can be grouped.

use tracing::{error, info, warn, Span};
use uuid::Uuid;

/// Logger that tags lines with the run ID and operation.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    operation: &'static str,
}

impl RunLogger {
    /// Start a new run for `operation` (e.g. "generate_image", "animate").
    pub fn new(operation: &'static str) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            operation,
        }
    }

    /// Log the start of the run.
    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = self.operation,
            "Run started: {}", message
        );
    }

    /// Log an intermediate step.
    pub fn log_progress(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = self.operation,
            "Run progress: {}", message
        );
    }

    /// Log a recoverable problem.
    pub fn log_warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            operation = self.operation,
            "Run warning: {}", message
        );
    }

    /// Log a failure that ends the run.
    pub fn log_error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            operation = self.operation,
            "Run error: {}", message
        );
    }

    /// Log successful completion.
    pub fn log_completion(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = self.operation,
            "Run completed: {}", message
        );
    }

    /// Unique ID shared by every line of this run.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn operation(&self) -> &str {
        self.operation
    }

    /// Span covering the whole run; attach it with `Instrument::instrument`.
    pub fn span(&self) -> Span {
        tracing::info_span!(
            "run",
            run_id = %self.run_id,
            operation = self.operation
        )
    }
}
