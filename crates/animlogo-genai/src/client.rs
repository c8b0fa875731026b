//! Gemini REST client.
//!
//! Implements the endpoint ports over the public Gemini API:
//! - `models/{model}:generateContent` for logo images
//! - `models/{model}:predictLongRunning` plus operation GETs for animations
//! - plain GETs of result locators for the rendered video

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::{header, Client, Response};
use tracing::{debug, warn};

use animlogo_models::{JobHandle, JobSnapshot};

use crate::config::GenAiConfig;
use crate::endpoint::{AssetFetcher, ImageEndpoint, VideoJobEndpoint};
use crate::error::{GenAiError, GenAiResult};
use crate::types::{
    ApiKey, ContentPart, FetchedAsset, ImageGenerationRequest, ImageGenerationResponse,
    InlineData, VideoGenerationRequest,
};
use crate::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig,
    Operation, PredictRequest, TextPart, VideoImage, VideoInstance, VideoParameters,
};

/// Client for the Gemini image and Veo video endpoints.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    config: GenAiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(config: GenAiConfig) -> GenAiResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("animlogo-genai/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GenAiError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> GenAiResult<Self> {
        Self::new(GenAiConfig::from_env()?)
    }

    pub fn config(&self) -> &GenAiConfig {
        &self.config
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.config.api_root(), model, method)
    }

    fn operation_url(&self, handle: &JobHandle) -> String {
        format!(
            "{}/v1beta/{}",
            self.config.api_root(),
            handle.as_str().trim_start_matches('/')
        )
    }

    /// Map transport errors without the request URL, which carries the key.
    fn network(e: reqwest::Error) -> GenAiError {
        GenAiError::Network(e.without_url())
    }

    async fn ensure_success(response: Response, what: &str) -> GenAiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("{} returned {}", what, status);
        Err(GenAiError::from_http_status(status.as_u16(), &body))
    }

    /// Decode one response part. A payload that is not valid base64 is
    /// dropped so the remaining parts can still be scanned.
    fn decode_part(index: usize, part: crate::wire::ResponsePart) -> ContentPart {
        let inline_data = match part.inline_data {
            Some(inline) if !inline.data.is_empty() => match BASE64.decode(inline.data.as_bytes()) {
                Ok(data) => Some(InlineData {
                    mime_type: inline.mime_type,
                    data,
                }),
                Err(e) => {
                    warn!(part = index, "Dropping inline data that is not valid base64: {}", e);
                    None
                }
            },
            _ => None,
        };

        ContentPart {
            text: part.text,
            inline_data,
        }
    }
}

#[async_trait]
impl ImageEndpoint for GeminiClient {
    async fn generate_content(
        &self,
        key: &ApiKey,
        request: &ImageGenerationRequest,
    ) -> GenAiResult<ImageGenerationResponse> {
        let url = self.model_url(&self.config.image_model, "generateContent");

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![TextPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                image_config: ImageConfig {
                    aspect_ratio: request.aspect_ratio,
                    image_size: request.image_size,
                },
            },
        };

        debug!(
            model = %self.config.image_model,
            size = %request.image_size,
            aspect_ratio = %request.aspect_ratio,
            "Sending image generation request"
        );

        let response = self
            .http
            .post(&url)
            .query(&[("key", key.expose())])
            .json(&body)
            .send()
            .await
            .map_err(Self::network)?;

        let response = Self::ensure_success(response, "generateContent").await?;
        let parsed: GenerateContentResponse = response.json().await.map_err(Self::network)?;

        let parts = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, part)| Self::decode_part(index, part))
            .collect();

        Ok(ImageGenerationResponse { parts })
    }
}

#[async_trait]
impl VideoJobEndpoint for GeminiClient {
    async fn submit(
        &self,
        key: &ApiKey,
        request: &VideoGenerationRequest,
    ) -> GenAiResult<JobSnapshot> {
        let url = self.model_url(&self.config.video_model, "predictLongRunning");

        let body = PredictRequest {
            instances: vec![VideoInstance {
                prompt: &request.prompt,
                image: VideoImage {
                    bytes_base64_encoded: BASE64.encode(&request.image_bytes),
                    mime_type: &request.mime_type,
                },
            }],
            parameters: VideoParameters {
                aspect_ratio: request.aspect_ratio,
                resolution: request.resolution,
                sample_count: request.sample_count,
            },
        };

        debug!(
            model = %self.config.video_model,
            resolution = %request.resolution,
            aspect_ratio = %request.aspect_ratio,
            image_bytes = request.image_bytes.len(),
            "Submitting video generation job"
        );

        let response = self
            .http
            .post(&url)
            .query(&[("key", key.expose())])
            .json(&body)
            .send()
            .await
            .map_err(Self::network)?;

        let response = Self::ensure_success(response, "predictLongRunning").await?;
        let operation: Operation = response.json().await.map_err(Self::network)?;

        operation
            .into_snapshot(None)
            .ok_or_else(|| GenAiError::invalid_response("Operation response has no name"))
    }

    async fn refresh(&self, key: &ApiKey, handle: &JobHandle) -> GenAiResult<JobSnapshot> {
        let url = self.operation_url(handle);

        let response = self
            .http
            .get(&url)
            .query(&[("key", key.expose())])
            .send()
            .await
            .map_err(Self::network)?;

        let response = Self::ensure_success(response, "operations.get").await?;
        let operation: Operation = response.json().await.map_err(Self::network)?;

        operation
            .into_snapshot(Some(handle))
            .ok_or_else(|| GenAiError::invalid_response("Operation response has no name"))
    }
}

#[async_trait]
impl AssetFetcher for GeminiClient {
    async fn fetch(&self, key: &ApiKey, locator: &str) -> GenAiResult<FetchedAsset> {
        let url = url::Url::parse(locator).map_err(|e| {
            GenAiError::InvalidRequest(format!("Invalid result locator '{}': {}", locator, e))
        })?;

        debug!(locator = %url, "Downloading generated asset");

        let response = self
            .http
            .get(url)
            .query(&[("key", key.expose())])
            .send()
            .await
            .map_err(Self::network)?;

        let response = Self::ensure_success(response, "asset download").await?;

        let mime_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && v != "application/octet-stream");

        let data = response.bytes().await.map_err(Self::network)?.to_vec();
        if data.is_empty() {
            return Err(GenAiError::invalid_response("Downloaded asset is empty"));
        }

        Ok(FetchedAsset { mime_type, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animlogo_models::{ImageSize, JobOutcome, LogoAspectRatio, Resolution, VideoAspectRatio};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        let config = GenAiConfig {
            image_model: "image-model".to_string(),
            video_model: "video-model".to_string(),
            ..GenAiConfig::default()
        }
        .with_base_url(server.uri());
        GeminiClient::new(config).unwrap()
    }

    fn key() -> ApiKey {
        ApiKey::new("test-key").unwrap()
    }

    fn video_request() -> VideoGenerationRequest {
        VideoGenerationRequest {
            prompt: "spin".to_string(),
            image_bytes: vec![1, 2, 3],
            mime_type: "image/png".to_string(),
            resolution: Resolution::P720,
            aspect_ratio: VideoAspectRatio::Portrait9x16,
            sample_count: 1,
        }
    }

    #[tokio::test]
    async fn test_generate_content_decodes_inline_parts() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/image-model:generateContent"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": {"imageConfig": {"aspectRatio": "4:3", "imageSize": "4K"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"parts": [
                        {"text": "Here is your logo"},
                        {"inlineData": {"mimeType": "image/png", "data": "AQID"}}
                    ]}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = ImageGenerationRequest {
            prompt: "logo".to_string(),
            image_size: ImageSize::Large,
            aspect_ratio: LogoAspectRatio::Landscape4x3,
        };
        let response = client_for(&server)
            .generate_content(&key(), &request)
            .await
            .unwrap();

        assert_eq!(response.parts.len(), 2);
        assert_eq!(response.parts[0].text.as_deref(), Some("Here is your logo"));
        assert!(response.parts[0].inline_data.is_none());
        let inline = response.parts[1].inline_data.as_ref().unwrap();
        assert_eq!(inline.mime_type.as_deref(), Some("image/png"));
        assert_eq!(inline.data, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_generate_content_without_candidates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/image-model:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let request = ImageGenerationRequest {
            prompt: "logo".to_string(),
            image_size: ImageSize::Small,
            aspect_ratio: LogoAspectRatio::Square,
        };
        let response = client_for(&server)
            .generate_content(&key(), &request)
            .await
            .unwrap();
        assert!(response.parts.is_empty());
    }

    #[tokio::test]
    async fn test_generate_content_drops_bad_base64() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/image-model:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [
                    {"inlineData": {"mimeType": "image/png", "data": "***"}}
                ]}}]
            })))
            .mount(&server)
            .await;

        let request = ImageGenerationRequest {
            prompt: "logo".to_string(),
            image_size: ImageSize::Small,
            aspect_ratio: LogoAspectRatio::Square,
        };
        let response = client_for(&server)
            .generate_content(&key(), &request)
            .await
            .unwrap();
        assert_eq!(response.parts.len(), 1);
        assert!(response.parts[0].inline_data.is_none());
    }

    #[tokio::test]
    async fn test_generate_content_keeps_image_before_malformed_part() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/image-model:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [
                    {"inlineData": {"mimeType": "image/png", "data": "AQID"}},
                    {"inlineData": {"mimeType": "image/png", "data": "!!not-base64!!"}}
                ]}}]
            })))
            .mount(&server)
            .await;

        let request = ImageGenerationRequest {
            prompt: "logo".to_string(),
            image_size: ImageSize::Small,
            aspect_ratio: LogoAspectRatio::Square,
        };
        let response =
            tokio_test::assert_ok!(client_for(&server).generate_content(&key(), &request).await);

        assert_eq!(response.parts.len(), 2);
        let inline = response.parts[0].inline_data.as_ref().unwrap();
        assert_eq!(inline.data, vec![1, 2, 3]);
        assert!(response.parts[1].inline_data.is_none());
    }

    #[tokio::test]
    async fn test_generate_content_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/image-model:generateContent"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED"}
            })))
            .mount(&server)
            .await;

        let request = ImageGenerationRequest {
            prompt: "logo".to_string(),
            image_size: ImageSize::Small,
            aspect_ratio: LogoAspectRatio::Square,
        };
        let err = client_for(&server)
            .generate_content(&key(), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, GenAiError::PermissionDenied(ref m) if m.contains("API key not valid")));
    }

    #[tokio::test]
    async fn test_submit_sends_single_sample_with_image() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/video-model:predictLongRunning"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "instances": [{
                    "prompt": "spin",
                    "image": {"bytesBase64Encoded": "AQID", "mimeType": "image/png"}
                }],
                "parameters": {"aspectRatio": "9:16", "resolution": "720p", "sampleCount": 1}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"name": "models/video-model/operations/op-1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = client_for(&server)
            .submit(&key(), &video_request())
            .await
            .unwrap();
        assert_eq!(snapshot.handle.as_str(), "models/video-model/operations/op-1");
        assert!(!snapshot.done);
    }

    #[tokio::test]
    async fn test_submit_without_operation_name() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/video-model:predictLongRunning"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .submit(&key(), &video_request())
            .await
            .unwrap_err();
        assert!(matches!(err, GenAiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_refresh_reads_result_locator() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1beta/models/video-model/operations/op-1"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "models/video-model/operations/op-1",
                "done": true,
                "response": {"generateVideoResponse": {"generatedSamples": [
                    {"video": {"uri": "https://files.example.com/v1beta/files/x:download?alt=media"}}
                ]}}
            })))
            .mount(&server)
            .await;

        let handle = JobHandle::new("models/video-model/operations/op-1");
        let snapshot = client_for(&server)
            .refresh(&key(), &handle)
            .await
            .unwrap();

        assert!(snapshot.done);
        match snapshot.outcome {
            Some(JobOutcome::Videos { locators, .. }) => {
                assert_eq!(
                    locators,
                    vec!["https://files.example.com/v1beta/files/x:download?alt=media"]
                );
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_not_found_keeps_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1beta/models/video-model/operations/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {
                    "code": 404,
                    "message": "Requested entity was not found.",
                    "status": "NOT_FOUND"
                }
            })))
            .mount(&server)
            .await;

        let handle = JobHandle::new("models/video-model/operations/gone");
        let err = client_for(&server)
            .refresh(&key(), &handle)
            .await
            .unwrap_err();

        assert!(matches!(err, GenAiError::NotFound(_)));
        assert!(err.to_string().contains("Requested entity was not found"));
    }

    #[tokio::test]
    async fn test_fetch_appends_key_to_locator() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1beta/files/x:download"))
            .and(query_param("alt", "media"))
            .and(query_param("key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "video/mp4")
                    .set_body_bytes(vec![0u8, 0, 0, 24, 102, 116, 121, 112]),
            )
            .expect(1)
            .mount(&server)
            .await;

        let locator = format!("{}/v1beta/files/x:download?alt=media", server.uri());
        let asset = client_for(&server).fetch(&key(), &locator).await.unwrap();

        assert_eq!(asset.mime_type.as_deref(), Some("video/mp4"));
        assert_eq!(asset.data.len(), 8);
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_locator() {
        let server = MockServer::start().await;
        let err = tokio_test::assert_err!(client_for(&server).fetch(&key(), "not a url").await);
        assert!(matches!(err, GenAiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1beta/files/y:download"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
            .mount(&server)
            .await;

        let locator = format!("{}/v1beta/files/y:download?alt=media", server.uri());
        let err = client_for(&server).fetch(&key(), &locator).await.unwrap_err();
        assert!(matches!(err, GenAiError::ServerError(500, _)));
        assert!(err.is_retryable());
    }
}
