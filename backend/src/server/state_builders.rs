//! Build the HTTP state from configuration.
//!
//! Real adapters are wired when their settings are present; otherwise the
//! matching fixture port is installed so the server always starts with a
//! complete dependency bundle.

use std::sync::Arc;

use tracing::warn;

use chairside::domain::ports::{CaptionSource, FixtureObjectStore, ObjectStore};
use chairside::domain::{
    BookingService, ContentPipelineService, DirectoryService, IdentityService, PortfolioService,
};
use chairside::inbound::http::state::HttpState;
use chairside::outbound::inference::{HttpCaptionSource, MissingCredentialCaptionSource};
use chairside::outbound::persistence::{
    DieselBookingRepository, DieselDirectoryRepository, DieselPostRepository,
    DieselProfileRepository,
};
use chairside::outbound::storage::HttpObjectStore;

use super::config::ServerConfig;

fn build_caption_source(config: &ServerConfig) -> Arc<dyn CaptionSource> {
    match &config.inference {
        Some(settings) => {
            match HttpCaptionSource::new(
                settings.endpoint.clone(),
                settings.token.clone(),
                settings.timeout,
            ) {
                Ok(source) => Arc::new(source),
                Err(error) => {
                    warn!(%error, "caption source misconfigured; caption requests will fail");
                    Arc::new(MissingCredentialCaptionSource)
                }
            }
        }
        None => {
            warn!("no inference token configured; caption requests will fail");
            Arc::new(MissingCredentialCaptionSource)
        }
    }
}

fn build_object_store(config: &ServerConfig) -> Arc<dyn ObjectStore> {
    match &config.storage {
        Some(settings) => {
            match HttpObjectStore::new(
                settings.base.clone(),
                settings.bucket.clone(),
                settings.token.clone(),
                settings.timeout,
            ) {
                Ok(store) => Arc::new(store),
                Err(error) => {
                    warn!(%error, "object store misconfigured; uploads will not persist");
                    Arc::new(FixtureObjectStore)
                }
            }
        }
        None => {
            warn!("no object storage configured; uploads will not persist");
            Arc::new(FixtureObjectStore)
        }
    }
}

/// Wire the dependency bundle for HTTP handlers.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let captions = build_caption_source(config);
    let store = build_object_store(config);

    match &config.db_pool {
        Some(pool) => {
            let posts = Arc::new(DieselPostRepository::new(pool.clone()));
            let bookings = Arc::new(BookingService::new(Arc::new(
                DieselBookingRepository::new(pool.clone()),
            )));
            HttpState {
                pipeline: Arc::new(ContentPipelineService::new(
                    store,
                    captions.clone(),
                    posts.clone(),
                )),
                portfolio: Arc::new(PortfolioService::new(posts)),
                bookings: bookings.clone(),
                bookings_query: bookings,
                directory: Arc::new(DirectoryService::new(Arc::new(
                    DieselDirectoryRepository::new(pool.clone()),
                ))),
                identity: Arc::new(IdentityService::new(Arc::new(
                    DieselProfileRepository::new(pool.clone()),
                ))),
                captions,
            }
        }
        None => {
            warn!("no database configured; serving fixture data");
            HttpState {
                captions,
                ..HttpState::fixture()
            }
        }
    }
}
