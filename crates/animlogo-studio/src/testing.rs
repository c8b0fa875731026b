//! Scripted endpoint fakes for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use animlogo_genai::{
    ApiKey, AssetFetcher, FetchedAsset, GenAiError, GenAiResult, ImageEndpoint,
    ImageGenerationRequest, ImageGenerationResponse, VideoGenerationRequest, VideoJobEndpoint,
};
use animlogo_models::{JobHandle, JobOutcome, JobSnapshot};

pub const HANDLE: &str = "models/veo/operations/test-op";

pub fn pending() -> JobSnapshot {
    JobSnapshot::pending(JobHandle::new(HANDLE))
}

pub fn finished_with(locator: &str) -> JobSnapshot {
    JobSnapshot::finished(
        JobHandle::new(HANDLE),
        JobOutcome::Videos {
            locators: vec![locator.to_string()],
            filtered_reasons: Vec::new(),
        },
    )
}

pub fn entity_not_found() -> GenAiError {
    GenAiError::from_http_status(
        404,
        r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#,
    )
}

pub struct ScriptedImageEndpoint {
    responses: Mutex<VecDeque<GenAiResult<ImageGenerationResponse>>>,
    calls: Mutex<Vec<ImageGenerationRequest>>,
}

impl ScriptedImageEndpoint {
    pub fn returning(response: GenAiResult<ImageGenerationResponse>) -> Self {
        Self::sequence(vec![response])
    }

    pub fn sequence(responses: Vec<GenAiResult<ImageGenerationResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ImageGenerationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageEndpoint for ScriptedImageEndpoint {
    async fn generate_content(
        &self,
        _key: &ApiKey,
        request: &ImageGenerationRequest,
    ) -> GenAiResult<ImageGenerationResponse> {
        self.calls.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected generate_content call")
    }
}

#[derive(Debug, Clone)]
pub enum VideoCall {
    Submit(VideoGenerationRequest),
    Refresh(JobHandle, Instant),
}

pub struct ScriptedVideoEndpoint {
    submit: Mutex<Option<GenAiResult<JobSnapshot>>>,
    refreshes: Mutex<VecDeque<GenAiResult<JobSnapshot>>>,
    calls: Mutex<Vec<VideoCall>>,
}

impl ScriptedVideoEndpoint {
    pub fn new(
        submit: GenAiResult<JobSnapshot>,
        refreshes: Vec<GenAiResult<JobSnapshot>>,
    ) -> Self {
        Self {
            submit: Mutex::new(Some(submit)),
            refreshes: Mutex::new(refreshes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<VideoCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn refresh_times(&self) -> Vec<Instant> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                VideoCall::Refresh(_, at) => Some(at),
                VideoCall::Submit(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl VideoJobEndpoint for ScriptedVideoEndpoint {
    async fn submit(
        &self,
        _key: &ApiKey,
        request: &VideoGenerationRequest,
    ) -> GenAiResult<JobSnapshot> {
        self.calls
            .lock()
            .unwrap()
            .push(VideoCall::Submit(request.clone()));
        self.submit
            .lock()
            .unwrap()
            .take()
            .expect("submit called more than once")
    }

    async fn refresh(&self, _key: &ApiKey, handle: &JobHandle) -> GenAiResult<JobSnapshot> {
        self.calls
            .lock()
            .unwrap()
            .push(VideoCall::Refresh(handle.clone(), Instant::now()));
        self.refreshes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(pending()))
    }
}

pub struct ScriptedFetcher {
    result: Mutex<Option<GenAiResult<FetchedAsset>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedFetcher {
    pub fn returning(result: GenAiResult<FetchedAsset>) -> Self {
        Self {
            result: Mutex::new(Some(result)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn video(bytes: &[u8]) -> Self {
        Self::returning(Ok(FetchedAsset {
            mime_type: Some("video/mp4".to_string()),
            data: bytes.to_vec(),
        }))
    }

    /// `(locator, key)` pairs seen so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetFetcher for ScriptedFetcher {
    async fn fetch(&self, key: &ApiKey, locator: &str) -> GenAiResult<FetchedAsset> {
        self.calls
            .lock()
            .unwrap()
            .push((locator.to_string(), key.expose().to_string()));
        self.result
            .lock()
            .unwrap()
            .take()
            .expect("fetch called more than once")
    }
}
