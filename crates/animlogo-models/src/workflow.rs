//! Workflow states and progress stages.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the pipeline currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// No usable API credential is selected
    #[default]
    AwaitingCredential,
    /// Waiting for a logo description
    ComposingLogo,
    /// A logo exists and is waiting to be animated
    ComposingAnimation,
    /// Both the logo and its animation are available
    Complete,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::AwaitingCredential => "awaiting_credential",
            WorkflowState::ComposingLogo => "composing_logo",
            WorkflowState::ComposingAnimation => "composing_animation",
            WorkflowState::Complete => "complete",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stage reported while a video job is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    /// The job-creation request is being sent
    Submitting,
    /// The job was accepted and is being polled
    Processing,
}

impl ProgressStage {
    /// Short stage label.
    pub fn label(&self) -> &'static str {
        match self {
            ProgressStage::Submitting => "submitting",
            ProgressStage::Processing => "processing",
        }
    }

    /// Status text for display.
    pub fn message(&self) -> &'static str {
        match self {
            ProgressStage::Submitting => "Initiating video generation...",
            ProgressStage::Processing => "Processing video (this may take a minute)...",
        }
    }
}

impl fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
