//! Driven port for the hosted image-captioning model.
//!
//! The domain owns the artefact shape so the pipeline stays adapter-agnostic.
//! Adapters are expected to tolerate empty or malformed provider bodies by
//! substituting a generic caption; callers therefore always receive a
//! non-empty caption list on `Ok`.

use async_trait::async_trait;

use super::define_port_error;

/// Output of one captioning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionArtifacts {
    /// Candidate captions, generic but never empty.
    pub captions: Vec<String>,
    /// Cosmetically "enhanced" image URL derived from the input URL by
    /// string substitution. No pixel transformation occurs; the value is
    /// not authoritative image data.
    pub enhanced_image_url: String,
}

define_port_error! {
    /// Errors surfaced while requesting captions.
    pub enum CaptionSourceError {
        /// Provider credential missing; surfaced before any request is made.
        Configuration { message: String } =>
            "caption source not configured: {message}",
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "caption request transport failed: {message}",
        /// Provider answered with a non-success status.
        UpstreamStatus { status: u16, message: String } =>
            "caption provider returned status {status}: {message}",
    }
}

/// Port for requesting captions for a publicly dereferenceable image URL.
///
/// The provider fetches the image server-side, so `image_url` must resolve
/// from the public internet. One request per call; no retries, no caching.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Request captions and the derived enhanced URL for one image.
    async fn generate(&self, image_url: &str) -> Result<CaptionArtifacts, CaptionSourceError>;
}

/// Fixture implementation returning deterministic artefacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCaptionSource;

#[async_trait]
impl CaptionSource for FixtureCaptionSource {
    async fn generate(&self, image_url: &str) -> Result<CaptionArtifacts, CaptionSourceError> {
        Ok(CaptionArtifacts {
            captions: vec![
                "A fresh fade".to_owned(),
                "Fresh from the chair: a fresh fade!".to_owned(),
                "New style, new confidence. Loving a fresh fade!".to_owned(),
            ],
            enhanced_image_url: format!("{image_url}?enhanced=ai"),
        })
    }
}
