//! Logo and animation request definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default motion prompt offered by the animation form.
pub const DEFAULT_MOTION_PROMPT: &str =
    "The logo should shine and rotate elegantly in 3D space with gold dust particles.";

/// Output size of the generated logo image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum ImageSize {
    /// 1K output
    #[default]
    #[serde(rename = "1K")]
    Small,
    /// 2K output
    #[serde(rename = "2K")]
    Medium,
    /// 4K output
    #[serde(rename = "4K")]
    Large,
}

impl ImageSize {
    pub const ALL: &'static [ImageSize] = &[ImageSize::Small, ImageSize::Medium, ImageSize::Large];

    /// Value sent to the image model.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Small => "1K",
            ImageSize::Medium => "2K",
            ImageSize::Large => "4K",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1k" | "small" => Ok(ImageSize::Small),
            "2k" | "medium" => Ok(ImageSize::Medium),
            "4k" | "large" => Ok(ImageSize::Large),
            _ => Err(OptionParseError::new("image size", s)),
        }
    }
}

/// Aspect ratios supported by the image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum LogoAspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait3x4,
    #[serde(rename = "4:3")]
    Landscape4x3,
    #[serde(rename = "9:16")]
    Portrait9x16,
    #[serde(rename = "16:9")]
    Landscape16x9,
}

impl LogoAspectRatio {
    pub const ALL: &'static [LogoAspectRatio] = &[
        LogoAspectRatio::Square,
        LogoAspectRatio::Portrait3x4,
        LogoAspectRatio::Landscape4x3,
        LogoAspectRatio::Portrait9x16,
        LogoAspectRatio::Landscape16x9,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogoAspectRatio::Square => "1:1",
            LogoAspectRatio::Portrait3x4 => "3:4",
            LogoAspectRatio::Landscape4x3 => "4:3",
            LogoAspectRatio::Portrait9x16 => "9:16",
            LogoAspectRatio::Landscape16x9 => "16:9",
        }
    }
}

impl fmt::Display for LogoAspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogoAspectRatio {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|ratio| ratio.as_str() == s.trim())
            .ok_or_else(|| OptionParseError::new("logo aspect ratio", s))
    }
}

/// Aspect ratios supported by the video model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum VideoAspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Landscape16x9,
    #[serde(rename = "9:16")]
    Portrait9x16,
}

impl VideoAspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoAspectRatio::Landscape16x9 => "16:9",
            VideoAspectRatio::Portrait9x16 => "9:16",
        }
    }

    /// Label shown next to the ratio in pickers.
    pub fn label(&self) -> &'static str {
        match self {
            VideoAspectRatio::Landscape16x9 => "Landscape (16:9)",
            VideoAspectRatio::Portrait9x16 => "Portrait (9:16)",
        }
    }
}

impl fmt::Display for VideoAspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VideoAspectRatio {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "16:9" | "landscape" => Ok(VideoAspectRatio::Landscape16x9),
            "9:16" | "portrait" => Ok(VideoAspectRatio::Portrait9x16),
            _ => Err(OptionParseError::new("video aspect ratio", s)),
        }
    }
}

/// Target resolution of the rendered animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum Resolution {
    #[serde(rename = "720p")]
    P720,
    #[default]
    #[serde(rename = "1080p")]
    P1080,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::P720 => "720p",
            Resolution::P1080 => "1080p",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "720p" | "720" => Ok(Resolution::P720),
            "1080p" | "1080" => Ok(Resolution::P1080),
            _ => Err(OptionParseError::new("resolution", s)),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown {kind}: {value}")]
pub struct OptionParseError {
    kind: &'static str,
    value: String,
}

impl OptionParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// A logo description submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LogoRequest {
    /// Free-form description of the brand and logo
    pub description: String,
    #[serde(default)]
    pub image_size: ImageSize,
    #[serde(default)]
    pub aspect_ratio: LogoAspectRatio,
}

impl LogoRequest {
    pub fn new(
        description: impl Into<String>,
        image_size: ImageSize,
        aspect_ratio: LogoAspectRatio,
    ) -> Self {
        Self {
            description: description.into(),
            image_size,
            aspect_ratio,
        }
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Logo description must not be empty".to_string());
        }
        Ok(())
    }
}

/// How the generated logo should be animated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnimationRequest {
    /// Motion prompt for the video model
    pub motion_description: String,
    #[serde(default)]
    pub aspect_ratio: VideoAspectRatio,
    #[serde(default)]
    pub resolution: Resolution,
}

impl AnimationRequest {
    pub fn new(
        motion_description: impl Into<String>,
        aspect_ratio: VideoAspectRatio,
        resolution: Resolution,
    ) -> Self {
        Self {
            motion_description: motion_description.into(),
            aspect_ratio,
            resolution,
        }
    }
}

impl Default for AnimationRequest {
    fn default() -> Self {
        Self {
            motion_description: DEFAULT_MOTION_PROMPT.to_string(),
            aspect_ratio: VideoAspectRatio::default(),
            resolution: Resolution::default(),
        }
    }
}
