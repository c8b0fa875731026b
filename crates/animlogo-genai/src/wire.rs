//! JSON shapes of the Gemini REST API.

use animlogo_models::{
    ImageSize, JobHandle, JobOutcome, JobSnapshot, LogoAspectRatio, Resolution, VideoAspectRatio,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// generateContent
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content<'a> {
    pub parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageConfig {
    pub aspect_ratio: LogoAspectRatio,
    pub image_size: ImageSize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<WireInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireInlineData {
    #[serde(default, alias = "mime_type")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: String,
}

// =============================================================================
// predictLongRunning
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct PredictRequest<'a> {
    pub instances: Vec<VideoInstance<'a>>,
    pub parameters: VideoParameters,
}

#[derive(Debug, Serialize)]
pub(crate) struct VideoInstance<'a> {
    pub prompt: &'a str,
    pub image: VideoImage<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoImage<'a> {
    pub bytes_base64_encoded: String,
    pub mime_type: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoParameters {
    pub aspect_ratio: VideoAspectRatio,
    pub resolution: Resolution,
    pub sample_count: u32,
}

// =============================================================================
// Operations
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct Operation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
    #[serde(default)]
    pub response: Option<OperationResponse>,
    #[serde(default)]
    pub error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OperationResponse {
    #[serde(default)]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
    #[serde(default)]
    pub rai_media_filtered_reasons: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedSample {
    #[serde(default)]
    pub video: Option<SampleVideo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SampleVideo {
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl Operation {
    /// Convert to a snapshot, using `fallback` when the body omits the name.
    pub fn into_snapshot(self, fallback: Option<&JobHandle>) -> Option<JobSnapshot> {
        let handle = match (self.name, fallback) {
            (Some(name), _) if !name.is_empty() => JobHandle::new(name),
            (_, Some(handle)) => handle.clone(),
            _ => return None,
        };

        if !self.done.unwrap_or(false) {
            return Some(JobSnapshot::pending(handle));
        }

        let outcome = match self.error {
            Some(error) => JobOutcome::Failed {
                code: error.code,
                message: error.message,
            },
            None => {
                let video_response = self.response.and_then(|r| r.generate_video_response);
                let (locators, filtered_reasons) = match video_response {
                    Some(v) => (
                        v.generated_samples
                            .into_iter()
                            .filter_map(|s| s.video.and_then(|video| video.uri))
                            .filter(|uri| !uri.is_empty())
                            .collect(),
                        v.rai_media_filtered_reasons,
                    ),
                    None => (Vec::new(), Vec::new()),
                };
                JobOutcome::Videos {
                    locators,
                    filtered_reasons,
                }
            }
        };

        Some(JobSnapshot::finished(handle, outcome))
    }
}
