//! Workflow state machine.
//!
//! Sequences the credential gate, logo generation and animation. Media live
//! inside the stage that needs them, so a state without its image or video
//! cannot be represented. Every action:
//! - clears the previous error first
//! - changes the stage only once the triggered call has settled
//! - turns failures into user-facing error text instead of returning them

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use animlogo_genai::{AssetFetcher, ImageEndpoint, VideoJobEndpoint};
use animlogo_models::{
    AnimationRequest, GeneratedImage, GeneratedVideo, LogoRequest, ProgressStage, WorkflowState,
};

use crate::config::OrchestratorConfig;
use crate::credential::{CredentialGate, CredentialProvider};
use crate::error::StudioError;
use crate::image::ImageGenerator;
use crate::orchestrator::VideoOrchestrator;
use crate::progress::ProgressReporter;

enum Stage {
    AwaitingCredential,
    ComposingLogo,
    ComposingAnimation {
        image: GeneratedImage,
    },
    Complete {
        image: GeneratedImage,
        video: GeneratedVideo,
    },
}

impl Stage {
    fn state(&self) -> WorkflowState {
        match self {
            Stage::AwaitingCredential => WorkflowState::AwaitingCredential,
            Stage::ComposingLogo => WorkflowState::ComposingLogo,
            Stage::ComposingAnimation { .. } => WorkflowState::ComposingAnimation,
            Stage::Complete { .. } => WorkflowState::Complete,
        }
    }
}

/// Serializable view of the workflow for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowView {
    pub state: WorkflowState,
    pub error: Option<String>,
    pub retryable: bool,
    pub progress: Option<ProgressStage>,
    pub progress_message: Option<&'static str>,
    pub image_mime_type: Option<String>,
    pub image_bytes: usize,
    pub video_mime_type: Option<String>,
    pub video_bytes: usize,
}

/// The logo pipeline for one session.
pub struct Workflow {
    gate: CredentialGate,
    images: ImageGenerator,
    orchestrator: VideoOrchestrator,
    progress: ProgressReporter,
    stage: Stage,
    error: Option<String>,
    retryable: bool,
}

impl Workflow {
    pub fn new(
        gate: CredentialGate,
        images: ImageGenerator,
        orchestrator: VideoOrchestrator,
        progress: ProgressReporter,
    ) -> Self {
        Self {
            gate,
            images,
            orchestrator,
            progress,
            stage: Stage::AwaitingCredential,
            error: None,
            retryable: false,
        }
    }

    /// Wire a workflow whose endpoints are all served by one client.
    pub fn with_client<C>(
        client: Arc<C>,
        provider: Arc<dyn CredentialProvider>,
        config: OrchestratorConfig,
        progress: ProgressReporter,
    ) -> Self
    where
        C: ImageEndpoint + VideoJobEndpoint + AssetFetcher + 'static,
    {
        Self::new(
            CredentialGate::new(provider),
            ImageGenerator::new(client.clone()),
            VideoOrchestrator::new(client.clone(), client, config),
            progress,
        )
    }

    pub fn state(&self) -> WorkflowState {
        self.stage.state()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether re-running the failed action may succeed without user changes.
    pub fn can_retry(&self) -> bool {
        self.retryable
    }

    pub fn image(&self) -> Option<&GeneratedImage> {
        match &self.stage {
            Stage::ComposingAnimation { image } | Stage::Complete { image, .. } => Some(image),
            _ => None,
        }
    }

    pub fn video(&self) -> Option<&GeneratedVideo> {
        match &self.stage {
            Stage::Complete { video, .. } => Some(video),
            _ => None,
        }
    }

    pub fn progress(&self) -> &ProgressReporter {
        &self.progress
    }

    pub fn view(&self) -> WorkflowView {
        let progress = self.progress.current();
        WorkflowView {
            state: self.state(),
            error: self.error.clone(),
            retryable: self.retryable,
            progress,
            progress_message: progress.map(|stage| stage.message()),
            image_mime_type: self.image().map(|i| i.mime_type().to_string()),
            image_bytes: self.image().map_or(0, GeneratedImage::len),
            video_mime_type: self.video().map(|v| v.mime_type().to_string()),
            video_bytes: self.video().map_or(0, GeneratedVideo::len),
        }
    }

    /// Check once for an already selected key.
    pub async fn start(&mut self) -> WorkflowState {
        if let Stage::AwaitingCredential = self.stage {
            if self.gate.has_credential().await {
                info!("API key already selected");
                self.transition(Stage::ComposingLogo);
            }
        }
        self.state()
    }

    /// Run the host key picker.
    ///
    /// Also serves as "switch key" from any later stage; a new key always
    /// starts over at the logo form with media discarded.
    pub async fn select_credential(&mut self) -> WorkflowState {
        self.clear_error();

        match self.gate.request_credential().await {
            Ok(()) => self.transition(Stage::ComposingLogo),
            Err(e) => self.fail(e),
        }
        self.state()
    }

    /// Generate the logo image.
    pub async fn submit_logo(&mut self, request: LogoRequest) -> WorkflowState {
        self.clear_error();

        if !matches!(self.stage, Stage::ComposingLogo) {
            return self.reject("submit_logo");
        }

        let key = match self.gate.api_key() {
            Ok(key) => key,
            Err(e) => return self.lose_credential(e),
        };

        match self.images.generate_image(&key, &request).await {
            Ok(image) => self.transition(Stage::ComposingAnimation { image }),
            Err(e) => self.fail(e),
        }
        self.state()
    }

    /// Animate the current logo.
    pub async fn submit_animation(&mut self, request: AnimationRequest) -> WorkflowState {
        self.clear_error();

        if !matches!(self.stage, Stage::ComposingAnimation { .. }) {
            return self.reject("submit_animation");
        }

        let key = match self.gate.api_key() {
            Ok(key) => key,
            Err(e) => return self.lose_credential(e),
        };

        let outcome = match &self.stage {
            Stage::ComposingAnimation { image } => {
                self.orchestrator
                    .animate(&key, image, &request, &self.progress)
                    .await
            }
            _ => return self.reject("submit_animation"),
        };
        self.progress.clear();

        match outcome {
            Ok(video) => {
                if let Stage::ComposingAnimation { image } =
                    std::mem::replace(&mut self.stage, Stage::ComposingLogo)
                {
                    self.stage = Stage::Complete { image, video };
                    info!(
                        from = %WorkflowState::ComposingAnimation,
                        to = %WorkflowState::Complete,
                        "Workflow transition"
                    );
                }
            }
            Err(e) if e.requires_credential() => return self.lose_credential(e),
            Err(e) => self.fail(e),
        }
        self.state()
    }

    /// Discard the logo and go back to the logo form.
    pub fn redesign(&mut self) -> WorkflowState {
        self.clear_error();

        match self.stage {
            Stage::ComposingAnimation { .. } => {
                self.transition(Stage::ComposingLogo);
                self.state()
            }
            _ => self.reject("redesign"),
        }
    }

    /// Discard all media and start a new logo. Safe to call repeatedly.
    pub fn reset(&mut self) -> WorkflowState {
        self.clear_error();

        match self.stage {
            Stage::AwaitingCredential => self.reject("reset"),
            _ => {
                self.progress.clear();
                self.transition(Stage::ComposingLogo);
                self.state()
            }
        }
    }

    fn transition(&mut self, next: Stage) {
        let from = self.stage.state();
        self.stage = next;
        let to = self.stage.state();
        if from != to {
            info!(from = %from, to = %to, "Workflow transition");
        }
    }

    fn fail(&mut self, error: StudioError) {
        warn!(state = %self.state(), "Workflow action failed: {}", error);
        self.error = Some(error.user_message());
        self.retryable = error.is_retryable();
    }

    fn clear_error(&mut self) {
        self.error = None;
        self.retryable = false;
    }

    fn lose_credential(&mut self, error: StudioError) -> WorkflowState {
        self.transition(Stage::AwaitingCredential);
        self.fail(error);
        self.state()
    }

    fn reject(&mut self, action: &'static str) -> WorkflowState {
        let state = self.state();
        self.fail(StudioError::invalid_action(action, state));
        state
    }
}
