//! Shared data models for the AnimLogo generation pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Logo and animation requests with their size/ratio/resolution options
//! - Generated media payloads (image and video)
//! - The remote video job lifecycle
//! - Workflow states and progress stages

pub mod job;
pub mod media;
pub mod request;
pub mod workflow;

// Re-export common types
pub use job::{JobHandle, JobOutcome, JobSnapshot, VideoJob};
pub use media::{GeneratedImage, GeneratedVideo, MediaParseError};
pub use request::{
    AnimationRequest, ImageSize, LogoAspectRatio, LogoRequest, OptionParseError, Resolution,
    VideoAspectRatio,
};
pub use workflow::{ProgressStage, WorkflowState};
