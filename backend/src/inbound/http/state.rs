//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BookingCommand, BookingQuery, CaptionSource, ContentPipelineCommand, DirectoryQuery,
    FixtureBookingCommand, FixtureBookingQuery, FixtureCaptionSource,
    FixtureContentPipelineCommand, FixtureDirectoryQuery, FixtureIdentityQuery,
    FixturePortfolioQuery, IdentityQuery, PortfolioQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Generative content pipeline (upload, publish).
    pub pipeline: Arc<dyn ContentPipelineCommand>,
    /// Published portfolio reads.
    pub portfolio: Arc<dyn PortfolioQuery>,
    /// Booking creation.
    pub bookings: Arc<dyn BookingCommand>,
    /// Booking reads.
    pub bookings_query: Arc<dyn BookingQuery>,
    /// Technician and service directory reads.
    pub directory: Arc<dyn DirectoryQuery>,
    /// Principal resolution for session user ids.
    pub identity: Arc<dyn IdentityQuery>,
    /// Caption gateway consumed directly by the compatibility endpoint.
    pub captions: Arc<dyn CaptionSource>,
}

impl HttpState {
    /// State wired entirely with fixture ports; useful for tests and for
    /// running the HTTP surface without external dependencies.
    #[must_use]
    pub fn fixture() -> Self {
        Self {
            pipeline: Arc::new(FixtureContentPipelineCommand),
            portfolio: Arc::new(FixturePortfolioQuery),
            bookings: Arc::new(FixtureBookingCommand),
            bookings_query: Arc::new(FixtureBookingQuery),
            directory: Arc::new(FixtureDirectoryQuery),
            identity: Arc::new(FixtureIdentityQuery),
            captions: Arc::new(FixtureCaptionSource),
        }
    }
}
