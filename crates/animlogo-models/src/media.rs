//! Generated media payloads.
//!
//! Both payloads are opaque: the pipeline never decodes or re-encodes the
//! pixels, it only moves the bytes between the endpoints and the caller.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Mime type assumed when the image model does not report one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Mime type assumed when the media download does not report one.
pub const DEFAULT_VIDEO_MIME: &str = "video/mp4";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MediaParseError {
    #[error("Not a data URL: expected 'data:<mime>;base64,<payload>'")]
    NotDataUrl,
    #[error("Data URL does not carry an image mime type: {0}")]
    NotImage(String),
    #[error("Invalid base64 payload: {0}")]
    InvalidPayload(String),
    #[error("Image payload is empty")]
    Empty,
}

/// Static logo produced by the image model.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    mime_type: String,
    data: Vec<u8>,
}

impl GeneratedImage {
    /// Build an image from raw bytes.
    ///
    /// Returns `None` when the payload is empty or the mime type is not an
    /// `image/*` type, so a half-filled image can never be constructed.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Option<Self> {
        let mime_type = mime_type.into();
        if data.is_empty() || !mime_type.starts_with("image/") {
            return None;
        }
        Some(Self { mime_type, data })
    }

    /// Parse a self-describing data handle, stripping the header.
    pub fn from_data_url(url: &str) -> Result<Self, MediaParseError> {
        let rest = url.trim().strip_prefix("data:").ok_or(MediaParseError::NotDataUrl)?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or(MediaParseError::NotDataUrl)?;

        if !mime_type.starts_with("image/") {
            return Err(MediaParseError::NotImage(mime_type.to_string()));
        }

        let data = BASE64
            .decode(payload.as_bytes())
            .map_err(|e| MediaParseError::InvalidPayload(e.to_string()))?;

        Self::new(mime_type, data).ok_or(MediaParseError::Empty)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw image bytes, without any data-handle header.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Payload as standard base64, as the video endpoint expects it.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.data)
    }

    /// Self-describing handle (`data:<mime>;base64,<payload>`) for previews.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// File extension matching the mime type.
    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

impl fmt::Debug for GeneratedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Final animation, held in memory for playback or download.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVideo {
    mime_type: String,
    data: Vec<u8>,
    /// Locator the video was downloaded from (without credentials)
    source_uri: String,
    completed_at: DateTime<Utc>,
}

impl GeneratedVideo {
    pub fn new(mime_type: Option<String>, data: Vec<u8>, source_uri: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.unwrap_or_else(|| DEFAULT_VIDEO_MIME.to_string()),
            data,
            source_uri: source_uri.into(),
            completed_at: Utc::now(),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Suggested download file name.
    pub fn file_name(&self) -> &'static str {
        match self.mime_type.as_str() {
            "video/webm" => "company_logo_animation.webm",
            "video/quicktime" => "company_logo_animation.mov",
            _ => "company_logo_animation.mp4",
        }
    }
}

impl fmt::Debug for GeneratedVideo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedVideo")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .field("source_uri", &self.source_uri)
            .field("completed_at", &self.completed_at)
            .finish()
    }
}
