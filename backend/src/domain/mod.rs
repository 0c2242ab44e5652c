//! Domain entities, ports, and services.
//!
//! Types here are transport and storage agnostic. Inbound adapters map them
//! to HTTP; outbound adapters implement the driven ports under [`ports`].

pub mod ports;

mod booking;
mod booking_service;
mod content_pipeline;
mod directory;
mod directory_service;
mod error;
mod identity;
mod post;
mod trace_id;

pub use booking::{Booking, BookingDraft, BookingStatus, BookingValidationError};
pub use booking_service::BookingService;
pub use content_pipeline::ContentPipelineService;
pub use directory::{Profile, ServiceOffering, TechnicianListing};
pub use directory_service::{DirectoryService, IdentityService, PortfolioService};
pub use error::{Error, ErrorCode};
pub use identity::{IdentityValidationError, Principal, Role, UserId};
pub use post::{
    AiStatus, Post, PostDraft, PostParts, PostTransitionError, PostValidationError,
};
pub use trace_id::{TraceId, TRACE_ID_HEADER};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
