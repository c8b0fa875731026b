//! Gemini API client for AnimLogo.
//!
//! This crate provides:
//! - Image generation via `generateContent`
//! - Long-running Veo video jobs via `predictLongRunning` and operation polling
//! - Download of generated media with the API key as access parameter
//!
//! The endpoint traits in [`endpoint`] are what the studio depends on;
//! [`GeminiClient`] is the REST implementation.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod types;
mod wire;

pub use client::GeminiClient;
pub use config::GenAiConfig;
pub use endpoint::{AssetFetcher, ImageEndpoint, VideoJobEndpoint};
pub use error::{GenAiError, GenAiResult};
pub use types::{
    ApiKey, ContentPart, FetchedAsset, ImageGenerationRequest, ImageGenerationResponse,
    InlineData, VideoGenerationRequest,
};
