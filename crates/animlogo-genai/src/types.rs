//! Request/response types exchanged with the generative endpoints.

use std::fmt;

use animlogo_models::{ImageSize, LogoAspectRatio, Resolution, VideoAspectRatio};

/// API credential used for every call and for media downloads.
///
/// Never prints the secret; use [`ApiKey::expose`] where the raw value is
/// needed on the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key. Blank input yields `None`.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

/// Single-shot image generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub image_size: ImageSize,
    pub aspect_ratio: LogoAspectRatio,
}

/// Decoded inline payload of a content part.
#[derive(Clone, PartialEq, Eq)]
pub struct InlineData {
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

impl fmt::Debug for InlineData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineData")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// One part of a model response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentPart {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: Some(mime_type.into()),
                data,
            }),
        }
    }
}

/// Content parts of the first candidate, in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageGenerationResponse {
    pub parts: Vec<ContentPart>,
}

/// Image-to-video job creation request.
#[derive(Clone, PartialEq, Eq)]
pub struct VideoGenerationRequest {
    pub prompt: String,
    /// Raw image bytes (no data-URL header)
    pub image_bytes: Vec<u8>,
    pub mime_type: String,
    pub resolution: Resolution,
    pub aspect_ratio: VideoAspectRatio,
    /// Number of videos requested
    pub sample_count: u32,
}

impl fmt::Debug for VideoGenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoGenerationRequest")
            .field("prompt", &self.prompt)
            .field("image_bytes", &self.image_bytes.len())
            .field("mime_type", &self.mime_type)
            .field("resolution", &self.resolution)
            .field("aspect_ratio", &self.aspect_ratio)
            .field("sample_count", &self.sample_count)
            .finish()
    }
}

/// Bytes downloaded from a result locator.
#[derive(Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

impl fmt::Debug for FetchedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchedAsset")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}
