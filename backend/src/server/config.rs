//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use chairside::outbound::persistence::DbPool;
use url::Url;

/// Settings for the hosted captioning model.
pub struct InferenceSettings {
    /// Full model endpoint, e.g. `https://<host>/models/<model-id>`.
    pub endpoint: Url,
    /// Bearer credential for the provider.
    pub token: String,
    /// Request timeout for caption calls.
    pub timeout: Duration,
}

/// Settings for the hosted object store.
pub struct StorageSettings {
    /// Storage API root, e.g. `https://<project>.example/storage/v1`.
    pub base: Url,
    /// Bucket holding raw uploads.
    pub bucket: String,
    /// Bearer credential for writes.
    pub token: String,
    /// Request timeout for uploads.
    pub timeout: Duration,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) inference: Option<InferenceSettings>,
    pub(crate) storage: Option<StorageSettings>,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            inference: None,
            storage: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server falls back to fixture ports, which keeps
    /// the HTTP surface runnable in development and tests.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach inference gateway settings.
    #[must_use]
    pub fn with_inference(mut self, settings: InferenceSettings) -> Self {
        self.inference = Some(settings);
        self
    }

    /// Attach object store settings.
    #[must_use]
    pub fn with_storage(mut self, settings: StorageSettings) -> Self {
        self.storage = Some(settings);
        self
    }
}
