//! HTTP client wrapper for metadata requests.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::MetadataError;

/// Default timeout for metadata requests (connect and read combined).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Default metadata server base URL.
pub const DEFAULT_BASE_URL: &str = "http://metadata.google.internal";

/// Metadata API root, relative to the base URL.
pub const METADATA_PATH: &str = "/computeMetadata/v1";

/// Required header for GCE metadata requests.
const METADATA_FLAVOR_HEADER: &str = "Metadata-Flavor";

/// Required header value for GCE metadata requests.
const METADATA_FLAVOR_VALUE: &str = "Google";

/// HTTP client wrapper for metadata server requests.
///
/// Immutable once built; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    inner: Client,
    base_url: String,
    timeout: Duration,
}

impl MetadataClient {
    /// Create a new metadata client with the specified timeout and base URL.
    pub fn new(timeout: Duration, base_url: &str) -> Result<Self, reqwest::Error> {
        let inner = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Create a new metadata client with the default timeout and base URL.
    pub fn with_default_timeout() -> Result<Self, reqwest::Error> {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_BASE_URL)
    }

    /// Create a new metadata client with a custom base URL (for testing).
    pub fn with_base_url(base_url: &str) -> Result<Self, reqwest::Error> {
        Self::new(DEFAULT_TIMEOUT, base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the full URL of a path under the metadata API root.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            METADATA_PATH,
            path.trim_start_matches('/')
        )
    }

    /// Fetch a path under the metadata API root as text.
    pub async fn get_path(&self, path: &str) -> Result<String, MetadataError> {
        self.get(&self.url(path)).await
    }

    /// Fetch `url` with the metadata header attached and return the body as text.
    ///
    /// Succeeds only on status 200 with a non-empty body. Nothing is retried.
    pub async fn get(&self, url: &str) -> Result<String, MetadataError> {
        tracing::debug!(%url, "Fetching metadata.");

        let response = self
            .inner
            .get(url)
            .header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(%url, %status, "Metadata request rejected.");
            return Err(MetadataError::InvalidResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await.map_err(MetadataError::ReadFailure)?;
        if body.is_empty() {
            return Err(MetadataError::EmptyResponse);
        }

        tracing::trace!(%url, len = body.len(), "Fetched metadata.");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Check that the metadata server answers at the API root.
    pub(crate) async fn probe(&self) -> Result<(), MetadataError> {
        let url = format!("{}{}/", self.base_url, METADATA_PATH);

        let response = self
            .inner
            .get(&url)
            .header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            tracing::debug!(%url, status = %response.status(), "Metadata probe failed.");
            Err(MetadataError::NotDetected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(1));
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(DEFAULT_BASE_URL, "http://metadata.google.internal");
    }

    #[test]
    fn test_client_creation() {
        let client = MetadataClient::with_default_timeout().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_client_custom_timeout() {
        let client =
            MetadataClient::new(Duration::from_millis(250), "http://localhost:8080").unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = MetadataClient::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_url_construction() {
        let client = MetadataClient::with_default_timeout().unwrap();
        assert_eq!(
            client.url("instance/hostname"),
            "http://metadata.google.internal/computeMetadata/v1/instance/hostname"
        );
        assert_eq!(client.url("/instance/zone"), client.url("instance/zone"));
    }
}
