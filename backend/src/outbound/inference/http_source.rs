//! Reqwest-backed caption source adapter.
//!
//! Owns transport details only: request serialisation, HTTP error mapping,
//! and decoding of the provider's `[{"generated_text": ...}]` payload. The
//! caption variants and the cosmetic enhanced-URL substitution are derived
//! locally from one upstream caption; no second model call is made.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::warn;
use zeroize::Zeroizing;

use super::dto::{CaptionRequestDto, CaptionResultDto};
use crate::domain::ports::{CaptionArtifacts, CaptionSource, CaptionSourceError};

/// Caption used when the provider answers 2xx with an empty or malformed
/// body. Callers still receive a full variant list, just a generic one.
const FALLBACK_CAPTION: &str = "a sharp cut with serious style";

/// Marker appended to the raw URL to form the "enhanced" one.
const ENHANCED_MARKER: &str = "enhanced=ai";

/// Caption source adapter that POSTs to one hosted model endpoint.
pub struct HttpCaptionSource {
    client: Client,
    endpoint: Url,
    token: Zeroizing<String>,
}

impl HttpCaptionSource {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the credential is blank and a
    /// transport error when the reqwest client cannot be constructed. The
    /// credential check runs here so a misconfigured deployment fails before
    /// any request is attempted.
    pub fn new(
        endpoint: Url,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CaptionSourceError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(CaptionSourceError::configuration(
                "inference API token must not be empty",
            ));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CaptionSourceError::transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            token: Zeroizing::new(token),
        })
    }
}

#[async_trait]
impl CaptionSource for HttpCaptionSource {
    async fn generate(&self, image_url: &str) -> Result<CaptionArtifacts, CaptionSourceError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.token.as_str())
            .json(&CaptionRequestDto { inputs: image_url })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let caption = extract_caption(body.as_ref());
        Ok(CaptionArtifacts {
            captions: caption_variants(&caption),
            enhanced_image_url: derive_enhanced_url(image_url),
        })
    }
}

/// Adapter installed when no credential is configured.
///
/// Fails deterministically on the first call instead of sending an
/// unauthenticated request upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingCredentialCaptionSource;

#[async_trait]
impl CaptionSource for MissingCredentialCaptionSource {
    async fn generate(&self, _image_url: &str) -> Result<CaptionArtifacts, CaptionSourceError> {
        Err(CaptionSourceError::configuration(
            "inference API token is not configured",
        ))
    }
}

/// Pull the first non-blank caption out of the provider body, falling back
/// to [`FALLBACK_CAPTION`] on empty or malformed payloads.
fn extract_caption(body: &[u8]) -> String {
    let results: Vec<CaptionResultDto> = match serde_json::from_slice(body) {
        Ok(results) => results,
        Err(error) => {
            warn!(%error, "caption provider body did not decode; using fallback caption");
            return FALLBACK_CAPTION.to_owned();
        }
    };

    results
        .into_iter()
        .find_map(|result| {
            result
                .generated_text
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty())
        })
        .unwrap_or_else(|| {
            warn!("caption provider body held no generated text; using fallback caption");
            FALLBACK_CAPTION.to_owned()
        })
}

/// Synthesise the fixed set of three variants around one upstream caption.
fn caption_variants(caption: &str) -> Vec<String> {
    vec![
        capitalise_first(caption),
        format!("Fresh from the chair: {caption}!"),
        format!("New style, new confidence. Loving {caption}!"),
    ]
}

fn capitalise_first(caption: &str) -> String {
    let mut chars = caption.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derive the "enhanced" URL by string substitution alone: swap the scheme
/// to https and append a marker parameter. No image processing happens
/// anywhere; the result is cosmetic and not authoritative.
fn derive_enhanced_url(image_url: &str) -> String {
    let secured = image_url
        .strip_prefix("http://")
        .map_or_else(|| image_url.to_owned(), |rest| format!("https://{rest}"));
    if secured.contains('?') {
        format!("{secured}&{ENHANCED_MARKER}")
    } else {
        format!("{secured}?{ENHANCED_MARKER}")
    }
}

fn map_transport_error(error: reqwest::Error) -> CaptionSourceError {
    CaptionSourceError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CaptionSourceError {
    CaptionSourceError::upstream_status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
