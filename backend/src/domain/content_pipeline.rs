//! Generative content pipeline service.
//!
//! Orchestrates one upload cycle: store the raw bytes, create the post row,
//! request captions from the gateway, persist the artefacts; later, publish
//! the technician's selected caption. All side effects run sequentially and
//! the gateway is only invoked after the raw image is durably stored and its
//! public URL derived.
//!
//! Failure policy: the first failing side effect aborts the remaining
//! sequence and surfaces a single user-facing error. Rows already created
//! stay behind (`processing`, or `failed` after a gateway error); nothing is
//! deleted or retried.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::ports::{
    CaptionSource, CaptionSourceError, ContentPipelineCommand, ObjectStore, ObjectStoreError,
    PipelineStage, PostRepository, PostRepositoryError, PublishPostRequest, PublishPostResponse,
    UploadImageRequest, UploadImageResponse,
};
use crate::domain::{Error, PostDraft, PostTransitionError, UserId};

fn map_object_store_error(error: ObjectStoreError) -> Error {
    match error {
        ObjectStoreError::Transport { message } => {
            Error::service_unavailable(format!("image upload failed: {message}"))
        }
        ObjectStoreError::UpstreamStatus { status, message } => Error::bad_gateway(format!(
            "image upload rejected with status {status}: {message}"
        )),
    }
}

fn map_post_repository_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post storage unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post storage error: {message}"))
        }
    }
}

fn map_caption_source_error(error: CaptionSourceError) -> Error {
    match error {
        CaptionSourceError::Configuration { message } => {
            Error::internal(format!("caption generation unavailable: {message}"))
        }
        CaptionSourceError::Transport { message } => {
            Error::bad_gateway(format!("caption generation failed: {message}"))
        }
        CaptionSourceError::UpstreamStatus { status, message } => Error::bad_gateway(format!(
            "caption generation failed with status {status}: {message}"
        )),
    }
}

fn map_transition_error(error: PostTransitionError) -> Error {
    match error {
        PostTransitionError::InvalidCaption(inner) => Error::invalid_request(inner.to_string()),
        PostTransitionError::InvalidTransition { .. } => Error::conflict(error.to_string()),
        PostTransitionError::InvalidArtifacts(inner) => Error::internal(inner.to_string()),
    }
}

/// Strip any path component and replace characters unsafe in object paths.
fn sanitise_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches(['-', '.']);
    if trimmed.is_empty() {
        "upload".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Build the per-upload object path: `{owner}/{timestamp_millis}_{filename}`.
///
/// The store performs no uniqueness check; the millisecond timestamp keeps
/// paths from colliding across uploads by the same technician.
pub(crate) fn upload_object_path(
    owner: &UserId,
    uploaded_at: DateTime<Utc>,
    filename: &str,
) -> String {
    format!(
        "{owner}/{}_{}",
        uploaded_at.timestamp_millis(),
        sanitise_filename(filename)
    )
}

/// Pipeline service implementing the content pipeline driving port.
#[derive(Clone)]
pub struct ContentPipelineService {
    store: Arc<dyn ObjectStore>,
    captions: Arc<dyn CaptionSource>,
    posts: Arc<dyn PostRepository>,
}

impl ContentPipelineService {
    /// Create the service over its driven ports.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        captions: Arc<dyn CaptionSource>,
        posts: Arc<dyn PostRepository>,
    ) -> Self {
        Self {
            store,
            captions,
            posts,
        }
    }
}

#[async_trait]
impl ContentPipelineCommand for ContentPipelineService {
    async fn upload_image(
        &self,
        request: UploadImageRequest,
    ) -> Result<UploadImageResponse, Error> {
        let UploadImageRequest {
            principal,
            filename,
            content_type,
            bytes,
        } = request;

        // Guard before any side effect: a rejected principal must leave no
        // object, no row, and no gateway call behind.
        if !principal.is_technician() {
            return Err(Error::forbidden(
                "only technicians can upload generative content",
            ));
        }
        if bytes.is_empty() {
            return Err(Error::invalid_request("image payload must not be empty"));
        }

        let path = upload_object_path(principal.user_id(), Utc::now(), &filename);
        self.store
            .put(&path, &bytes, &content_type)
            .await
            .map_err(map_object_store_error)?;
        let raw_image_url = self.store.public_url(&path);

        let draft = PostDraft::new(*principal.user_id(), raw_image_url.clone())
            .map_err(|err| Error::internal(format!("derived post draft invalid: {err}")))?;
        let post = self
            .posts
            .create(&draft)
            .await
            .map_err(map_post_repository_error)?;

        // The provider fetches the image by URL, so this call is only issued
        // once the raw upload is durable and resolvable.
        let artifacts = match self.captions.generate(&raw_image_url).await {
            Ok(artifacts) => artifacts,
            Err(error) => {
                if let Err(mark_error) = self.posts.mark_failed(post.id()).await {
                    warn!(
                        post_id = %post.id(),
                        error = %mark_error,
                        "could not record inference failure on post"
                    );
                }
                return Err(map_caption_source_error(error));
            }
        };

        let generated = post
            .attach_generation(artifacts.enhanced_image_url.clone(), artifacts.captions.clone())
            .map_err(map_transition_error)?;
        self.posts
            .update(&generated)
            .await
            .map_err(map_post_repository_error)?;

        info!(post_id = %generated.id(), "generation artefacts attached");

        Ok(UploadImageResponse {
            post_id: generated.id(),
            stage: PipelineStage::Result,
            raw_image_url,
            enhanced_image_url: artifacts.enhanced_image_url,
            captions: artifacts.captions,
        })
    }

    async fn publish_post(
        &self,
        request: PublishPostRequest,
    ) -> Result<PublishPostResponse, Error> {
        let PublishPostRequest {
            principal,
            post_id,
            selected_caption,
        } = request;

        if !principal.is_technician() {
            return Err(Error::forbidden(
                "only technicians can publish generative content",
            ));
        }

        let post = self
            .posts
            .find_by_id(post_id)
            .await
            .map_err(map_post_repository_error)?
            .ok_or_else(|| Error::not_found(format!("post {post_id} not found")))?;

        if post.technician_id() != principal.user_id() {
            return Err(Error::forbidden("posts can only be published by their owner"));
        }

        let published = post.publish(&selected_caption).map_err(map_transition_error)?;
        self.posts
            .update(&published)
            .await
            .map_err(map_post_repository_error)?;

        info!(post_id = %published.id(), "post published to portfolio");

        Ok(PublishPostResponse {
            post_id: published.id(),
            stage: PipelineStage::Upload,
        })
    }
}

#[cfg(test)]
#[path = "content_pipeline_tests.rs"]
mod tests;
