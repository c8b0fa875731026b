//! Orchestrator configuration.

use std::time::Duration;

/// Video orchestration settings.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Wait between two status refreshes
    pub poll_interval: Duration,
    /// Give up after this many refreshes (None = poll until the job finishes)
    pub max_polls: Option<u32>,
    /// Log a progress line every N refreshes
    pub log_every: u32,
    /// Number of videos requested per job
    pub sample_count: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(8),
            max_polls: None,
            log_every: 4,
            sample_count: 1,
        }
    }
}

impl OrchestratorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            poll_interval: Duration::from_secs(
                std::env::var("VIDEO_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8),
            ),
            max_polls: std::env::var("VIDEO_MAX_POLLS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &u32| *n > 0),
            log_every: std::env::var("VIDEO_POLL_LOG_EVERY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &u32| *n > 0)
                .unwrap_or(4),
            sample_count: 1,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }
}
