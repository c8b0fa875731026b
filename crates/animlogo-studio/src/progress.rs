//! Single-slot progress reporting for the video wait.

use std::fmt;
use std::sync::Arc;

use animlogo_models::ProgressStage;
use tokio::sync::watch;

/// Receiver of progress stages pushed by the orchestrator.
pub trait ProgressSink: Send + Sync {
    fn report(&self, stage: ProgressStage);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressStage) + Send + Sync,
{
    fn report(&self, stage: ProgressStage) {
        self(stage)
    }
}

/// Latest-value progress slot.
///
/// Each report overwrites the previous stage. Readers either poll
/// [`ProgressReporter::current`] or `changed()` on a subscribed receiver;
/// a slow reader may skip intermediate stages. An optional tap sees every
/// report in order.
#[derive(Clone)]
pub struct ProgressReporter {
    slot: Arc<watch::Sender<Option<ProgressStage>>>,
    tap: Option<Arc<dyn ProgressSink>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
            tap: None,
        }
    }

    /// Forward every report to `tap` as well.
    pub fn with_tap(mut self, tap: Arc<dyn ProgressSink>) -> Self {
        self.tap = Some(tap);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ProgressStage>> {
        self.slot.subscribe()
    }

    pub fn current(&self) -> Option<ProgressStage> {
        *self.slot.borrow()
    }

    /// Empty the slot once the animation settles.
    pub fn clear(&self) {
        self.slot.send_replace(None);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("current", &self.current())
            .field("tap", &self.tap.is_some())
            .finish()
    }
}

impl ProgressSink for ProgressReporter {
    fn report(&self, stage: ProgressStage) {
        self.slot.send_replace(Some(stage));
        if let Some(tap) = &self.tap {
            tap.report(stage);
        }
    }
}
