//! AnimLogo studio.
//!
//! This crate contains the generation pipeline:
//! - Credential gate in front of every API call
//! - Logo image generation
//! - Video job orchestration (submit, poll, download)
//! - The workflow state machine and its progress reporter
//! - Writing the finished media to disk

pub mod config;
pub mod credential;
pub mod error;
pub mod export;
pub mod image;
pub mod logging;
pub mod orchestrator;
pub mod progress;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use config::OrchestratorConfig;
pub use credential::{CredentialGate, CredentialProvider, EnvCredentialProvider};
pub use error::{is_credential_expired, CredentialError, StudioError, StudioResult};
pub use image::ImageGenerator;
pub use logging::RunLogger;
pub use orchestrator::VideoOrchestrator;
pub use progress::{ProgressReporter, ProgressSink};
pub use workflow::{Workflow, WorkflowView};
