//! Post aggregate: one raw-upload, inference, publish cycle.
//!
//! The aggregate owns the `ai_status` state machine and rejects any
//! transition that would break the publication invariants:
//!
//! - a post never exists without a raw image URL;
//! - a post never reaches `completed` without a non-empty selected caption
//!   that is a member of the captions attached at generation time, and a
//!   non-empty enhanced image URL.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// Lifecycle status of a post, persisted as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiStatus {
    /// Raw image stored; inference outcome not yet known.
    Processing,
    /// Inference succeeded; captions await selection.
    Generated,
    /// Published with a selected caption.
    Completed,
    /// Inference failed after the raw upload succeeded.
    Failed,
}

impl AiStatus {
    /// Stable string form used by the record store.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Generated => "generated",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Whether the status machine permits moving from `self` to `next`.
    #[must_use]
    pub fn can_transition(&self, next: AiStatus) -> bool {
        matches!(
            (self, next),
            (Self::Processing, Self::Generated)
                | (Self::Processing, Self::Failed)
                | (Self::Generated, Self::Completed)
        )
    }
}

impl std::str::FromStr for AiStatus {
    type Err = PostValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(Self::Processing),
            "generated" => Ok(Self::Generated),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(PostValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for AiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised by [`Post::from_parts`] and [`PostDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// Raw image URL was missing or blank.
    EmptyRawImageUrl,
    /// Status string did not name a known status.
    UnknownStatus { value: String },
    /// A `generated` or `completed` post is missing its enhanced image URL.
    MissingEnhancedImage,
    /// A `generated` or `completed` post carries no candidate captions.
    MissingGeneratedCaptions,
    /// A `completed` post is missing its selected caption.
    MissingSelectedCaption,
    /// The selected caption is not one of the generated candidates.
    SelectedCaptionNotGenerated,
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRawImageUrl => write!(f, "raw image url must not be empty"),
            Self::UnknownStatus { value } => write!(f, "unknown post status {value}"),
            Self::MissingEnhancedImage => {
                write!(f, "post is missing its enhanced image url")
            }
            Self::MissingGeneratedCaptions => {
                write!(f, "post is missing its generated captions")
            }
            Self::MissingSelectedCaption => {
                write!(f, "completed post is missing its selected caption")
            }
            Self::SelectedCaptionNotGenerated => {
                write!(f, "selected caption is not one of the generated captions")
            }
        }
    }
}

impl std::error::Error for PostValidationError {}

/// Errors raised by status transitions on an existing post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostTransitionError {
    /// The requested transition is not permitted from the current status.
    InvalidTransition { from: AiStatus, to: AiStatus },
    /// Generation artefacts were empty or blank.
    InvalidArtifacts(PostValidationError),
    /// The caption offered at publish time fails validation.
    InvalidCaption(PostValidationError),
}

impl fmt::Display for PostTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, to } => {
                write!(f, "post cannot move from {from} to {to}")
            }
            Self::InvalidArtifacts(inner) | Self::InvalidCaption(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for PostTransitionError {}

/// Input payload for creating a post; the record store assigns id and
/// creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    technician_id: UserId,
    raw_image_url: String,
    customer_id: Option<Uuid>,
    booking_id: Option<Uuid>,
    style_tags: Vec<String>,
}

impl PostDraft {
    /// Validate and build a draft. The raw image URL must be non-blank.
    pub fn new(
        technician_id: UserId,
        raw_image_url: impl Into<String>,
    ) -> Result<Self, PostValidationError> {
        let raw_image_url = raw_image_url.into();
        if raw_image_url.trim().is_empty() {
            return Err(PostValidationError::EmptyRawImageUrl);
        }
        Ok(Self {
            technician_id,
            raw_image_url,
            customer_id: None,
            booking_id: None,
            style_tags: Vec::new(),
        })
    }

    /// Attribute the post to a customer and, optionally, a booking.
    #[must_use]
    pub fn with_attribution(mut self, customer_id: Option<Uuid>, booking_id: Option<Uuid>) -> Self {
        self.customer_id = customer_id;
        self.booking_id = booking_id;
        self
    }

    /// Attach style tags.
    #[must_use]
    pub fn with_style_tags(mut self, style_tags: Vec<String>) -> Self {
        self.style_tags = style_tags;
        self
    }

    /// Owning technician.
    #[must_use]
    pub fn technician_id(&self) -> &UserId {
        &self.technician_id
    }

    /// Public URL of the raw upload.
    #[must_use]
    pub fn raw_image_url(&self) -> &str {
        &self.raw_image_url
    }

    /// Optional customer attribution.
    #[must_use]
    pub fn customer_id(&self) -> Option<Uuid> {
        self.customer_id
    }

    /// Optional booking attribution.
    #[must_use]
    pub fn booking_id(&self) -> Option<Uuid> {
        self.booking_id
    }

    /// Style tags in submission order.
    #[must_use]
    pub fn style_tags(&self) -> &[String] {
        &self.style_tags
    }
}

/// Field bundle for [`Post::from_parts`], typically read from the record
/// store.
#[derive(Debug, Clone)]
pub struct PostParts {
    pub id: Uuid,
    pub technician_id: UserId,
    pub customer_id: Option<Uuid>,
    pub booking_id: Option<Uuid>,
    pub raw_image_url: String,
    pub enhanced_image_url: Option<String>,
    pub generated_captions: Vec<String>,
    pub selected_caption: Option<String>,
    pub ai_status: AiStatus,
    pub style_tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A persisted generative-content submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    id: Uuid,
    technician_id: UserId,
    customer_id: Option<Uuid>,
    booking_id: Option<Uuid>,
    raw_image_url: String,
    enhanced_image_url: Option<String>,
    generated_captions: Vec<String>,
    selected_caption: Option<String>,
    ai_status: AiStatus,
    style_tags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl Post {
    /// Validate a full field bundle into a post.
    ///
    /// Enforces the publication invariants for whatever status the bundle
    /// claims, so rows corrupted out of band are rejected at the boundary.
    pub fn from_parts(parts: PostParts) -> Result<Self, PostValidationError> {
        let PostParts {
            id,
            technician_id,
            customer_id,
            booking_id,
            raw_image_url,
            enhanced_image_url,
            generated_captions,
            selected_caption,
            ai_status,
            style_tags,
            created_at,
        } = parts;

        if raw_image_url.trim().is_empty() {
            return Err(PostValidationError::EmptyRawImageUrl);
        }

        if matches!(ai_status, AiStatus::Generated | AiStatus::Completed) {
            if enhanced_image_url
                .as_deref()
                .is_none_or(|url| url.trim().is_empty())
            {
                return Err(PostValidationError::MissingEnhancedImage);
            }
            if generated_captions.is_empty() {
                return Err(PostValidationError::MissingGeneratedCaptions);
            }
        }

        if ai_status == AiStatus::Completed {
            match selected_caption.as_deref() {
                None => return Err(PostValidationError::MissingSelectedCaption),
                Some(caption) if caption.trim().is_empty() => {
                    return Err(PostValidationError::MissingSelectedCaption);
                }
                Some(caption) if !generated_captions.iter().any(|c| c == caption) => {
                    return Err(PostValidationError::SelectedCaptionNotGenerated);
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            id,
            technician_id,
            customer_id,
            booking_id,
            raw_image_url,
            enhanced_image_url,
            generated_captions,
            selected_caption,
            ai_status,
            style_tags,
            created_at,
        })
    }

    /// Attach inference output: `processing` → `generated`.
    pub fn attach_generation(
        self,
        enhanced_image_url: impl Into<String>,
        generated_captions: Vec<String>,
    ) -> Result<Self, PostTransitionError> {
        self.ensure_transition(AiStatus::Generated)?;

        let enhanced_image_url = enhanced_image_url.into();
        if enhanced_image_url.trim().is_empty() {
            return Err(PostTransitionError::InvalidArtifacts(
                PostValidationError::MissingEnhancedImage,
            ));
        }
        if generated_captions.is_empty() || generated_captions.iter().any(|c| c.trim().is_empty()) {
            return Err(PostTransitionError::InvalidArtifacts(
                PostValidationError::MissingGeneratedCaptions,
            ));
        }

        Ok(Self {
            enhanced_image_url: Some(enhanced_image_url),
            generated_captions,
            ai_status: AiStatus::Generated,
            ..self
        })
    }

    /// Publish with the technician's chosen caption: `generated` → `completed`.
    ///
    /// The caption must be non-empty and a member of the captions attached at
    /// generation time.
    pub fn publish(self, selected_caption: &str) -> Result<Self, PostTransitionError> {
        self.ensure_transition(AiStatus::Completed)?;

        if selected_caption.trim().is_empty() {
            return Err(PostTransitionError::InvalidCaption(
                PostValidationError::MissingSelectedCaption,
            ));
        }
        if !self.generated_captions.iter().any(|c| c == selected_caption) {
            return Err(PostTransitionError::InvalidCaption(
                PostValidationError::SelectedCaptionNotGenerated,
            ));
        }

        Ok(Self {
            selected_caption: Some(selected_caption.to_owned()),
            ai_status: AiStatus::Completed,
            ..self
        })
    }

    /// Record an inference failure: `processing` → `failed`.
    pub fn fail(self) -> Result<Self, PostTransitionError> {
        self.ensure_transition(AiStatus::Failed)?;
        Ok(Self {
            ai_status: AiStatus::Failed,
            ..self
        })
    }

    fn ensure_transition(&self, next: AiStatus) -> Result<(), PostTransitionError> {
        if self.ai_status.can_transition(next) {
            Ok(())
        } else {
            Err(PostTransitionError::InvalidTransition {
                from: self.ai_status,
                to: next,
            })
        }
    }

    /// Record store identity.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning technician; immutable after creation.
    #[must_use]
    pub fn technician_id(&self) -> &UserId {
        &self.technician_id
    }

    /// Optional customer attribution.
    #[must_use]
    pub fn customer_id(&self) -> Option<Uuid> {
        self.customer_id
    }

    /// Optional booking attribution.
    #[must_use]
    pub fn booking_id(&self) -> Option<Uuid> {
        self.booking_id
    }

    /// Public URL of the unmodified upload.
    #[must_use]
    pub fn raw_image_url(&self) -> &str {
        &self.raw_image_url
    }

    /// Public URL of the pseudo-enhanced image, once generation succeeded.
    #[must_use]
    pub fn enhanced_image_url(&self) -> Option<&str> {
        self.enhanced_image_url.as_deref()
    }

    /// Candidate captions in the order the gateway produced them.
    #[must_use]
    pub fn generated_captions(&self) -> &[String] {
        &self.generated_captions
    }

    /// Caption chosen by the technician at publish time.
    #[must_use]
    pub fn selected_caption(&self) -> Option<&str> {
        self.selected_caption.as_deref()
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn ai_status(&self) -> AiStatus {
        self.ai_status
    }

    /// Style tags in submission order.
    #[must_use]
    pub fn style_tags(&self) -> &[String] {
        &self.style_tags
    }

    /// Record creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
