//! Logo image generation.

use std::sync::Arc;

use tracing::Instrument;

use animlogo_genai::{ApiKey, ImageEndpoint, ImageGenerationRequest, ImageGenerationResponse};
use animlogo_models::media::DEFAULT_IMAGE_MIME;
use animlogo_models::{GeneratedImage, LogoRequest};

use crate::error::{StudioError, StudioResult};
use crate::logging::RunLogger;

/// Wrap a user description in the fixed logo style directive.
pub fn compose_logo_prompt(description: &str) -> String {
    format!(
        "A professional, high-quality, modern minimalist corporate logo for: {}. \
         Clean lines, vector style, white background.",
        description.trim()
    )
}

/// Pick the first part carrying a usable image.
///
/// Parts without inline data, with an empty payload, or with a non-image
/// mime type are skipped. A missing mime type is taken as PNG.
pub fn extract_image(response: ImageGenerationResponse) -> Option<GeneratedImage> {
    response.parts.into_iter().find_map(|part| {
        let inline = part.inline_data?;
        let mime_type = inline
            .mime_type
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
        GeneratedImage::new(mime_type, inline.data)
    })
}

/// Single-shot logo generator.
#[derive(Clone)]
pub struct ImageGenerator {
    endpoint: Arc<dyn ImageEndpoint>,
}

impl ImageGenerator {
    pub fn new(endpoint: Arc<dyn ImageEndpoint>) -> Self {
        Self { endpoint }
    }

    /// Generate one logo image for `request`.
    pub async fn generate_image(
        &self,
        key: &ApiKey,
        request: &LogoRequest,
    ) -> StudioResult<GeneratedImage> {
        request.validate().map_err(StudioError::InvalidRequest)?;

        let logger = RunLogger::new("generate_image");
        let span = logger.span();

        async {
            logger.log_start(&format!(
                "size={} aspect_ratio={}",
                request.image_size, request.aspect_ratio
            ));

            let call = ImageGenerationRequest {
                prompt: compose_logo_prompt(&request.description),
                image_size: request.image_size,
                aspect_ratio: request.aspect_ratio,
            };

            let response = self
                .endpoint
                .generate_content(key, &call)
                .await
                .map_err(|e| {
                    logger.log_error(&e.to_string());
                    StudioError::ImageGeneration(e)
                })?;

            let image = extract_image(response).ok_or_else(|| {
                logger.log_warning("Response contained no inline image");
                StudioError::NoImageData
            })?;

            logger.log_completion(&format!("{} bytes of {}", image.len(), image.mime_type()));
            Ok(image)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedImageEndpoint;
    use animlogo_genai::{ContentPart, GenAiError, InlineData};
    use animlogo_models::{ImageSize, LogoAspectRatio};

    fn key() -> ApiKey {
        ApiKey::new("test-key").unwrap()
    }

    fn aura() -> LogoRequest {
        LogoRequest::new(
            "A tech startup called Aura",
            ImageSize::Medium,
            LogoAspectRatio::Square,
        )
    }

    #[test]
    fn test_prompt_wraps_description() {
        let prompt = compose_logo_prompt("  Aura  ");
        assert!(prompt.starts_with("A professional, high-quality, modern minimalist corporate logo for: Aura."));
        assert!(prompt.ends_with("Clean lines, vector style, white background."));
    }

    #[test]
    fn test_extract_skips_text_and_empty_parts() {
        let response = ImageGenerationResponse {
            parts: vec![
                ContentPart::text("Here is your logo"),
                ContentPart::inline("image/png", Vec::new()),
                ContentPart {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: None,
                        data: vec![7, 8],
                    }),
                },
                ContentPart::inline("image/jpeg", vec![9]),
            ],
        };

        let image = extract_image(response).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.data(), &[7, 8]);
    }

    #[test]
    fn test_extract_rejects_non_image_payload() {
        let response = ImageGenerationResponse {
            parts: vec![ContentPart::inline("application/json", vec![1])],
        };
        assert!(extract_image(response).is_none());
    }

    #[tokio::test]
    async fn test_generate_image_sends_options() {
        let endpoint = Arc::new(ScriptedImageEndpoint::returning(Ok(
            ImageGenerationResponse {
                parts: vec![ContentPart::inline("image/png", vec![1, 2, 3])],
            },
        )));
        let generator = ImageGenerator::new(endpoint.clone());

        let image = generator.generate_image(&key(), &aura()).await.unwrap();
        assert_eq!(image.len(), 3);

        let calls = endpoint.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].image_size, ImageSize::Medium);
        assert_eq!(calls[0].aspect_ratio, LogoAspectRatio::Square);
        assert!(calls[0].prompt.contains("A tech startup called Aura"));
    }

    #[tokio::test]
    async fn test_generate_image_without_image_part() {
        let endpoint = Arc::new(ScriptedImageEndpoint::returning(Ok(
            ImageGenerationResponse {
                parts: vec![ContentPart::text("I cannot draw that")],
            },
        )));
        let generator = ImageGenerator::new(endpoint);

        let err = generator.generate_image(&key(), &aura()).await.unwrap_err();
        assert!(matches!(err, StudioError::NoImageData));
    }

    #[tokio::test]
    async fn test_generate_image_endpoint_failure() {
        let endpoint = Arc::new(ScriptedImageEndpoint::returning(Err(
            GenAiError::RateLimited("quota".into()),
        )));
        let generator = ImageGenerator::new(endpoint);

        let err = generator.generate_image(&key(), &aura()).await.unwrap_err();
        assert!(matches!(err, StudioError::ImageGeneration(GenAiError::RateLimited(_))));
    }

    #[tokio::test]
    async fn test_generate_image_rejects_blank_description() {
        let endpoint = Arc::new(ScriptedImageEndpoint::returning(Ok(
            ImageGenerationResponse::default(),
        )));
        let generator = ImageGenerator::new(endpoint.clone());

        let request = LogoRequest::new(" ", ImageSize::Small, LogoAspectRatio::Square);
        let err = generator.generate_image(&key(), &request).await.unwrap_err();
        assert!(matches!(err, StudioError::InvalidRequest(_)));
        assert!(endpoint.calls().is_empty());
    }
}
