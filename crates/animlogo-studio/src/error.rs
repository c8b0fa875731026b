//! Studio error types.

use animlogo_genai::GenAiError;
use thiserror::Error;

pub type StudioResult<T> = Result<T, StudioError>;

/// API message returned when the selected key no longer resolves to a
/// project that may run the job.
pub const ENTITY_NOT_FOUND_SIGNATURE: &str = "Requested entity was not found";

/// Failures reported by the host credential provider.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Credential provider error: {0}")]
    Host(String),

    #[error("No credential was selected")]
    NotSelected,
}

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No API key is selected")]
    MissingCredential,

    #[error("Credential selection failed: {0}")]
    Credential(#[from] CredentialError),

    #[error("Action '{action}' is not available while {state}")]
    InvalidAction { action: &'static str, state: String },

    #[error("Image generation failed: {0}")]
    ImageGeneration(GenAiError),

    #[error("No image data found in response")]
    NoImageData,

    #[error("Video job submission failed: {0}")]
    JobSubmit(GenAiError),

    #[error("API key session expired: {0}")]
    CredentialExpired(String),

    #[error("Video job polling failed: {0}")]
    JobPoll(GenAiError),

    #[error("Video job failed (code {code}): {message}")]
    JobFailed { code: i32, message: String },

    #[error("Video job still running after {polls} polls")]
    Timeout { polls: u32 },

    #[error("Video generation completed but returned no video: {0}")]
    NoVideoResult(String),

    #[error("Video download failed: {0}")]
    AssetFetch(GenAiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// True if a failure means the API key session has expired.
///
/// The API reports an expired or revoked key during job polling as a
/// not-found error carrying [`ENTITY_NOT_FOUND_SIGNATURE`]; this is the only
/// place that signature is matched.
pub fn is_credential_expired(error: &GenAiError) -> bool {
    error.to_string().contains(ENTITY_NOT_FOUND_SIGNATURE)
}

impl StudioError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn invalid_action(action: &'static str, state: impl ToString) -> Self {
        Self::InvalidAction {
            action,
            state: state.to_string(),
        }
    }

    /// Classify a failed status refresh.
    pub fn job_poll(error: GenAiError) -> Self {
        if is_credential_expired(&error) {
            Self::CredentialExpired(error.to_string())
        } else {
            Self::JobPoll(error)
        }
    }

    pub fn is_credential_expired(&self) -> bool {
        matches!(self, StudioError::CredentialExpired(_))
    }

    /// True for failures that leave the workflow without a usable key.
    pub fn requires_credential(&self) -> bool {
        matches!(
            self,
            StudioError::CredentialExpired(_) | StudioError::MissingCredential
        )
    }

    /// Check if error is retryable by re-running the same action.
    pub fn is_retryable(&self) -> bool {
        match self {
            StudioError::ImageGeneration(e)
            | StudioError::JobSubmit(e)
            | StudioError::JobPoll(e)
            | StudioError::AssetFetch(e) => e.is_retryable(),
            StudioError::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Text shown to the user when the error reaches the workflow boundary.
    pub fn user_message(&self) -> String {
        match self {
            StudioError::CredentialExpired(_) | StudioError::MissingCredential => {
                "Your API key session might have expired. Please re-select your key.".to_string()
            }
            StudioError::Credential(e) => format!("Failed to select an API key. {}", e),
            StudioError::InvalidRequest(msg) => msg.clone(),
            StudioError::InvalidAction { .. } => self.to_string(),
            StudioError::ImageGeneration(_) | StudioError::NoImageData => {
                format!("Failed to generate logo. {}", self)
            }
            StudioError::JobSubmit(_)
            | StudioError::JobPoll(_)
            | StudioError::JobFailed { .. }
            | StudioError::Timeout { .. }
            | StudioError::NoVideoResult(_)
            | StudioError::AssetFetch(_) => format!("Failed to animate logo. {}", self),
            StudioError::Io(e) => format!("Failed to save media. {}", e),
        }
    }
}
