//! Reqwest-backed object store adapter.
//!
//! Targets a hosted storage HTTP API: objects are written with an
//! authenticated `POST {base}/object/{bucket}/{path}` and read publicly via
//! `{base}/object/public/{bucket}/{path}`. The public URL is a pure
//! derivation from the path, which is what lets the pipeline hand the URL to
//! the inference provider immediately after a successful write.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use crate::domain::ports::{ObjectStore, ObjectStoreError};

/// Object store adapter bound to one bucket.
pub struct HttpObjectStore {
    client: Client,
    base: String,
    bucket: String,
    token: Zeroizing<String>,
}

impl HttpObjectStore {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the reqwest client cannot be
    /// constructed.
    pub fn new(
        base: Url,
        bucket: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ObjectStoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ObjectStoreError::transport(err.to_string()))?;
        Ok(Self {
            client,
            base: base.as_str().trim_end_matches('/').to_owned(),
            bucket: bucket.into(),
            token: Zeroizing::new(token.into()),
        })
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/object/{}/{}", self.base, self.bucket, path)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        let response = self
            .client
            .post(self.object_url(path))
            .bearer_auth(self.token.as_str())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(map_status_error(status, body.as_ref()))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/object/public/{}/{}", self.base, self.bucket, path)
    }
}

fn map_transport_error(error: reqwest::Error) -> ObjectStoreError {
    ObjectStoreError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ObjectStoreError {
    let message = String::from_utf8_lossy(body)
        .chars()
        .take(160)
        .collect::<String>();
    ObjectStoreError::upstream_status(status.as_u16(), message)
}
