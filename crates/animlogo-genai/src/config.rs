//! GenAI client configuration.

use std::time::Duration;

use crate::error::{GenAiError, GenAiResult};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Configuration for the GenAI REST client.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    /// API root, without the version segment
    pub base_url: String,
    /// Model used for logo images
    pub image_model: String,
    /// Model used for logo animations
    pub video_model: String,
    /// Request timeout (covers media downloads)
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl GenAiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> GenAiResult<Self> {
        let base_url = std::env::var("GEMINI_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let config = Self {
            base_url,
            image_model: std::env::var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            video_model: std::env::var("GEMINI_VIDEO_MODEL")
                .unwrap_or_else(|_| DEFAULT_VIDEO_MODEL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("GEMINI_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
            connect_timeout: Duration::from_secs(
                std::env::var("GEMINI_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        };

        config.validate()?;
        Ok(config)
    }

    /// Point the client at a different API root (used by tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> GenAiResult<()> {
        url::Url::parse(&self.base_url).map_err(|e| {
            GenAiError::config(format!("Invalid GEMINI_API_BASE_URL '{}': {}", self.base_url, e))
        })?;

        if self.image_model.trim().is_empty() || self.video_model.trim().is_empty() {
            return Err(GenAiError::config("Model names cannot be empty"));
        }

        Ok(())
    }

    /// Base URL without a trailing slash.
    pub(crate) fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
