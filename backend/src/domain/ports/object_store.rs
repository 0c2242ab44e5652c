//! Driven port for the object store holding raw uploads.
//!
//! Paths are caller-chosen; the store performs no uniqueness check, so
//! collision avoidance (and therefore overwrite avoidance) is the caller's
//! responsibility.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while writing to the object store.
    pub enum ObjectStoreError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "object store transport failed: {message}",
        /// Store answered with a non-success status.
        UpstreamStatus { status: u16, message: String } =>
            "object store returned status {status}: {message}",
    }
}

/// Port for uploading binary objects and deriving their public URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `path`. Overwrites silently on path collision.
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), ObjectStoreError>;

    /// Derive the stable public URL for `path`.
    ///
    /// Pure derivation; does not check that the object exists.
    fn public_url(&self, path: &str) -> String;
}

/// Fixture implementation that accepts every write.
#[derive(Debug, Clone, Default)]
pub struct FixtureObjectStore;

#[async_trait]
impl ObjectStore for FixtureObjectStore {
    async fn put(
        &self,
        _path: &str,
        _bytes: &[u8],
        _content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://storage.invalid/object/public/posts/{path}")
    }
}
