//! Video generation orchestration.
//!
//! Drives one long-running video job from submission to download:
//! 1. Submit the image-to-video job (exactly once, never retried here)
//! 2. Poll the operation at a fixed interval until it reports `done`
//! 3. Classify the terminal outcome
//! 4. Download the first generated video into memory

use std::sync::Arc;

use tracing::Instrument;

use animlogo_genai::{ApiKey, AssetFetcher, VideoGenerationRequest, VideoJobEndpoint};
use animlogo_models::{
    AnimationRequest, GeneratedImage, GeneratedVideo, JobOutcome, ProgressStage, VideoJob,
};

use crate::config::OrchestratorConfig;
use crate::error::{StudioError, StudioResult};
use crate::logging::RunLogger;
use crate::progress::ProgressSink;

/// Runs video jobs against the injected endpoints.
#[derive(Clone)]
pub struct VideoOrchestrator {
    jobs: Arc<dyn VideoJobEndpoint>,
    fetcher: Arc<dyn AssetFetcher>,
    config: OrchestratorConfig,
}

impl VideoOrchestrator {
    pub fn new(
        jobs: Arc<dyn VideoJobEndpoint>,
        fetcher: Arc<dyn AssetFetcher>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            jobs,
            fetcher,
            config,
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Animate `image` and return the downloaded video.
    ///
    /// Reports [`ProgressStage::Submitting`] before the submit call and
    /// [`ProgressStage::Processing`] once the job is accepted.
    pub async fn animate(
        &self,
        key: &ApiKey,
        image: &GeneratedImage,
        request: &AnimationRequest,
        progress: &dyn ProgressSink,
    ) -> StudioResult<GeneratedVideo> {
        let logger = RunLogger::new("animate");
        let span = logger.span();

        self.run(&logger, key, image, request, progress)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        logger: &RunLogger,
        key: &ApiKey,
        image: &GeneratedImage,
        request: &AnimationRequest,
        progress: &dyn ProgressSink,
    ) -> StudioResult<GeneratedVideo> {
        logger.log_start(&format!(
            "resolution={} aspect_ratio={} image_bytes={}",
            request.resolution,
            request.aspect_ratio,
            image.len()
        ));

        progress.report(ProgressStage::Submitting);

        let call = VideoGenerationRequest {
            prompt: request.motion_description.clone(),
            image_bytes: image.data().to_vec(),
            mime_type: image.mime_type().to_string(),
            resolution: request.resolution,
            aspect_ratio: request.aspect_ratio,
            sample_count: self.config.sample_count,
        };

        let snapshot = self.jobs.submit(key, &call).await.map_err(|e| {
            logger.log_error(&format!("Submit failed: {}", e));
            StudioError::JobSubmit(e)
        })?;

        let job = VideoJob::submitted(snapshot);
        logger.log_progress(&format!("Submitted job {}", job.handle()));

        progress.report(ProgressStage::Processing);

        let job = self.poll_until_done(logger, key, job).await?;
        let locator = Self::result_locator(logger, job)?;

        let asset = self.fetcher.fetch(key, &locator).await.map_err(|e| {
            logger.log_error(&format!("Download failed: {}", e));
            StudioError::AssetFetch(e)
        })?;

        let video = GeneratedVideo::new(asset.mime_type, asset.data, locator);
        logger.log_completion(&format!("{} bytes of {}", video.len(), video.mime_type()));
        Ok(video)
    }

    async fn poll_until_done(
        &self,
        logger: &RunLogger,
        key: &ApiKey,
        mut job: VideoJob,
    ) -> StudioResult<VideoJob> {
        let log_every = self.config.log_every.max(1);

        while !job.is_terminal() {
            if let Some(max_polls) = self.config.max_polls {
                if job.polls() >= max_polls {
                    logger.log_error(&format!(
                        "Job {} still running after {} polls",
                        job.handle(),
                        job.polls()
                    ));
                    return Err(StudioError::Timeout { polls: job.polls() });
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;

            let snapshot = self
                .jobs
                .refresh(key, job.handle())
                .await
                .map_err(|e| {
                    let err = StudioError::job_poll(e);
                    if err.is_credential_expired() {
                        logger.log_warning("API key rejected while polling");
                    } else {
                        logger.log_error(&format!("Poll failed: {}", err));
                    }
                    err
                })?;
            job.apply(snapshot);

            if job.polls() % log_every == 0 {
                logger.log_progress(&format!(
                    "Job {} still processing ({} polls, {}s elapsed)",
                    job.handle(),
                    job.polls(),
                    job.elapsed_secs()
                ));
            }
        }

        Ok(job)
    }

    fn result_locator(logger: &RunLogger, job: VideoJob) -> StudioResult<String> {
        match job.into_outcome() {
            Some(JobOutcome::Failed { code, message }) => {
                logger.log_error(&format!("Job failed with code {}: {}", code, message));
                Err(StudioError::JobFailed { code, message })
            }
            Some(JobOutcome::Videos {
                locators,
                filtered_reasons,
            }) => locators.into_iter().next().ok_or_else(|| {
                let detail = if filtered_reasons.is_empty() {
                    "response contained no video".to_string()
                } else {
                    format!("filtered: {}", filtered_reasons.join("; "))
                };
                logger.log_warning(&detail);
                StudioError::NoVideoResult(detail)
            }),
            None => Err(StudioError::NoVideoResult(
                "operation finished without a response".to_string(),
            )),
        }
    }
}
