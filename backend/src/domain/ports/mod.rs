//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_command;
mod booking_query;
mod booking_repository;
mod caption_source;
mod content_pipeline;
mod directory_query;
mod directory_repository;
mod identity_query;
mod object_store;
mod portfolio_query;
mod post_repository;
mod profile_repository;

#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::{BookingCommand, CreateBookingRequest, FixtureBookingCommand};
#[cfg(test)]
pub use booking_query::MockBookingQuery;
pub use booking_query::{BookingQuery, FixtureBookingQuery};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use caption_source::MockCaptionSource;
pub use caption_source::{CaptionArtifacts, CaptionSource, CaptionSourceError, FixtureCaptionSource};
#[cfg(test)]
pub use content_pipeline::MockContentPipelineCommand;
pub use content_pipeline::{
    ContentPipelineCommand, FixtureContentPipelineCommand, PipelineStage, PublishPostRequest,
    PublishPostResponse, UploadImageRequest, UploadImageResponse,
};
#[cfg(test)]
pub use directory_query::MockDirectoryQuery;
pub use directory_query::{DirectoryQuery, FixtureDirectoryQuery};
#[cfg(test)]
pub use directory_repository::MockDirectoryRepository;
pub use directory_repository::{DirectoryRepository, DirectoryRepositoryError};
#[cfg(test)]
pub use identity_query::MockIdentityQuery;
pub use identity_query::{FixtureIdentityQuery, IdentityQuery};
#[cfg(test)]
pub use object_store::MockObjectStore;
pub use object_store::{FixtureObjectStore, ObjectStore, ObjectStoreError};
#[cfg(test)]
pub use portfolio_query::MockPortfolioQuery;
pub use portfolio_query::{FixturePortfolioQuery, PortfolioQuery};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
