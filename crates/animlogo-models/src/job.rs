//! Remote video job lifecycle.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a long-running remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobHandle(pub String);

impl JobHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result carried by a terminal job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobOutcome {
    /// The operation finished and reported its generated videos.
    Videos {
        /// Download locators, in the order the API returned them
        locators: Vec<String>,
        /// Content-filter reasons reported alongside the result
        #[serde(default)]
        filtered_reasons: Vec<String>,
    },
    /// The operation finished with an error.
    Failed { code: i32, message: String },
}

/// One observation of the remote job, as returned by submit or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub handle: JobHandle,
    pub done: bool,
    pub outcome: Option<JobOutcome>,
}

impl JobSnapshot {
    pub fn pending(handle: JobHandle) -> Self {
        Self {
            handle,
            done: false,
            outcome: None,
        }
    }

    pub fn finished(handle: JobHandle, outcome: JobOutcome) -> Self {
        Self {
            handle,
            done: true,
            outcome: Some(outcome),
        }
    }
}

/// Local view of the asynchronous video operation.
///
/// Created from the submit response and only changed by poll results.
/// Once `done` is set no further refresh is expected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoJob {
    handle: JobHandle,
    done: bool,
    outcome: Option<JobOutcome>,
    submitted_at: DateTime<Utc>,
    polls: u32,
}

impl VideoJob {
    /// Start tracking a freshly submitted job.
    pub fn submitted(snapshot: JobSnapshot) -> Self {
        Self {
            handle: snapshot.handle,
            done: snapshot.done,
            outcome: snapshot.outcome,
            submitted_at: Utc::now(),
            polls: 0,
        }
    }

    /// Record the result of one status refresh.
    ///
    /// The handle is kept from submission; the refresh only moves `done`
    /// and the outcome forward.
    pub fn apply(&mut self, snapshot: JobSnapshot) {
        self.polls += 1;
        self.done = snapshot.done;
        if snapshot.outcome.is_some() {
            self.outcome = snapshot.outcome;
        }
    }

    pub fn handle(&self) -> &JobHandle {
        &self.handle
    }

    pub fn is_terminal(&self) -> bool {
        self.done
    }

    /// Consume the job, yielding its outcome.
    pub fn into_outcome(self) -> Option<JobOutcome> {
        self.outcome
    }

    /// Number of refreshes applied so far.
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Seconds since submission.
    pub fn elapsed_secs(&self) -> i64 {
        (Utc::now() - self.submitted_at).num_seconds()
    }
}
