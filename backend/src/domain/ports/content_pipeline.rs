//! Driving port for the generative content pipeline.
//!
//! The pipeline owns a three-stage flow: `upload` (initial) → `processing`
//! → `result` (terminal success). Failures and explicit resets return the
//! flow to `upload`; the persisted post row is deliberately not rolled back
//! (see [`PostRepository::mark_failed`](super::PostRepository::mark_failed)).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Principal};

/// Stage of the generative flow as presented to callers.
///
/// Caption selection happens client-side within `result` and is
/// side-effect free; only publishing persists the choice and resets the
/// flow to `upload`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Waiting for a file; the initial stage and the target of every reset.
    Upload,
    /// Side effects in flight; no cancellation primitive exists.
    Processing,
    /// Artefacts ready; caption selection pending.
    Result,
}

impl PipelineStage {
    /// Stage the flow lands in after any failed transition.
    #[must_use]
    pub fn after_failure() -> Self {
        Self::Upload
    }

    /// Stable string form for payloads and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Processing => "processing",
            Self::Result => "result",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload for the upload transition.
#[derive(Debug, Clone)]
pub struct UploadImageRequest {
    /// Explicitly passed principal; only technicians pass the guard.
    pub principal: Principal,
    /// Client-supplied file name, sanitised before use in the object path.
    pub filename: String,
    /// MIME type forwarded to the object store.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

/// Response payload for a successful upload transition.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadImageResponse {
    pub post_id: Uuid,
    /// Always [`PipelineStage::Result`] on success.
    pub stage: PipelineStage,
    pub raw_image_url: String,
    pub enhanced_image_url: String,
    pub captions: Vec<String>,
}

/// Request payload for the publish transition.
#[derive(Debug, Clone)]
pub struct PublishPostRequest {
    pub principal: Principal,
    pub post_id: Uuid,
    /// Must be one of the captions attached at generation time.
    pub selected_caption: String,
}

/// Response payload for a successful publish transition.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishPostResponse {
    pub post_id: Uuid,
    /// Always [`PipelineStage::Upload`]: publishing resets the flow.
    pub stage: PipelineStage,
}

/// Driving port implemented by the pipeline service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentPipelineCommand: Send + Sync {
    /// Run the upload transition: store bytes, create the post row, invoke
    /// the caption gateway, and persist the generation artefacts.
    async fn upload_image(
        &self,
        request: UploadImageRequest,
    ) -> Result<UploadImageResponse, Error>;

    /// Run the publish transition: persist the selected caption and complete
    /// the post.
    async fn publish_post(
        &self,
        request: PublishPostRequest,
    ) -> Result<PublishPostResponse, Error>;
}

/// Fixture implementation returning canned outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureContentPipelineCommand;

#[async_trait]
impl ContentPipelineCommand for FixtureContentPipelineCommand {
    async fn upload_image(
        &self,
        _request: UploadImageRequest,
    ) -> Result<UploadImageResponse, Error> {
        Ok(UploadImageResponse {
            post_id: Uuid::nil(),
            stage: PipelineStage::Result,
            raw_image_url: "https://storage.invalid/object/public/posts/fixture.jpg".to_owned(),
            enhanced_image_url:
                "https://storage.invalid/object/public/posts/fixture.jpg?enhanced=ai".to_owned(),
            captions: vec!["A fresh fade".to_owned()],
        })
    }

    async fn publish_post(
        &self,
        request: PublishPostRequest,
    ) -> Result<PublishPostResponse, Error> {
        Ok(PublishPostResponse {
            post_id: request.post_id,
            stage: PipelineStage::Upload,
        })
    }
}
