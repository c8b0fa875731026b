//! Ports for the generative services the pipeline talks to.
//!
//! The studio core only sees these traits, so tests and alternative
//! transports can stand in for [`crate::GeminiClient`].

use async_trait::async_trait;

use animlogo_models::{JobHandle, JobSnapshot};

use crate::error::GenAiResult;
use crate::types::{
    ApiKey, FetchedAsset, ImageGenerationRequest, ImageGenerationResponse, VideoGenerationRequest,
};

/// Synchronous image generation.
#[async_trait]
pub trait ImageEndpoint: Send + Sync {
    /// Run one generation and return the content parts of the response.
    async fn generate_content(
        &self,
        key: &ApiKey,
        request: &ImageGenerationRequest,
    ) -> GenAiResult<ImageGenerationResponse>;
}

/// Long-running video generation jobs.
#[async_trait]
pub trait VideoJobEndpoint: Send + Sync {
    /// Create a job. The returned snapshot carries the job handle.
    async fn submit(&self, key: &ApiKey, request: &VideoGenerationRequest)
        -> GenAiResult<JobSnapshot>;

    /// Fetch the current status of a job.
    async fn refresh(&self, key: &ApiKey, handle: &JobHandle) -> GenAiResult<JobSnapshot>;
}

/// Download of generated artifacts.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Download `locator`, passing the credential as an access parameter.
    async fn fetch(&self, key: &ApiKey, locator: &str) -> GenAiResult<FetchedAsset>;
}
