//! GceMetadata struct and the instance accessors.

use crate::client::MetadataClient;
use crate::error::MetadataError;
use crate::facts::InstanceFacts;

/// Fully qualified hostname; the first label is the instance name.
const HOSTNAME_PATH: &str = "instance/hostname";

/// Project id of the instance.
const PROJECT_ID_PATH: &str = "instance/project-id";

/// Zone, prefixed with `projects/<number>/zones/`.
const ZONE_PATH: &str = "instance/zone";

/// Custom instance attribute naming the cluster.
const CLUSTER_NAME_PATH: &str = "instance/attributes/cluster-name";

/// Internal address of the primary network interface.
const PRIVATE_IPV4_PATH: &str = "instance/network-interfaces/0/ip";

/// External address of the primary network interface.
const PUBLIC_IPV4_PATH: &str = "instance/network-interfaces/0/access-configs/0/external-ip";

/// Main interface for reading facts about the current instance.
///
/// # Example
///
/// ```ignore
/// use gce_metadata::{GceMetadata, MetadataError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), MetadataError> {
///     let metadata = GceMetadata::new()?;
///     println!("{} in {}", metadata.instance().await?, metadata.zone().await?);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GceMetadata {
    client: MetadataClient,
}

impl GceMetadata {
    /// Create an instance talking to the metadata server with the default timeout.
    pub fn new() -> Result<Self, MetadataError> {
        Ok(Self::with_client(MetadataClient::with_default_timeout()?))
    }

    /// Create an instance talking to a custom base URL.
    ///
    /// This is primarily useful for testing with mock servers.
    pub fn with_base_url(base_url: &str) -> Result<Self, MetadataError> {
        Ok(Self::with_client(MetadataClient::with_base_url(base_url)?))
    }

    /// Create an instance over an already configured client.
    pub fn with_client(client: MetadataClient) -> Self {
        Self { client }
    }

    /// Get the underlying client.
    pub fn client(&self) -> &MetadataClient {
        &self.client
    }

    /// Fetch an arbitrary URL with the metadata header attached.
    pub async fn get(&self, url: &str) -> Result<String, MetadataError> {
        self.client.get(url).await
    }

    /// Check that the metadata server is reachable.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::NotDetected` if the server answers with an
    /// error status, or the transport error if it cannot be reached.
    pub async fn probe(&self) -> Result<(), MetadataError> {
        self.client.probe().await
    }

    /// The instance name: the first label of the instance hostname.
    pub async fn instance(&self) -> Result<String, MetadataError> {
        let hostname = self.client.get_path(HOSTNAME_PATH).await?;
        Ok(host_label(&hostname).to_string())
    }

    /// The project id.
    pub async fn project(&self) -> Result<String, MetadataError> {
        self.client.get_path(PROJECT_ID_PATH).await
    }

    /// The zone name, without the project prefix.
    pub async fn zone(&self) -> Result<String, MetadataError> {
        let zone = self.client.get_path(ZONE_PATH).await?;
        Ok(last_segment(&zone).to_string())
    }

    /// The `cluster-name` instance attribute.
    pub async fn cluster(&self) -> Result<String, MetadataError> {
        self.client.get_path(CLUSTER_NAME_PATH).await
    }

    /// The internal IPv4 address of the primary interface.
    pub async fn private_ipv4(&self) -> Result<String, MetadataError> {
        self.client.get_path(PRIVATE_IPV4_PATH).await
    }

    /// The external IPv4 address of the primary interface.
    pub async fn public_ipv4(&self) -> Result<String, MetadataError> {
        self.client.get_path(PUBLIC_IPV4_PATH).await
    }

    /// Gather every fact in one pass, issuing the requests concurrently.
    ///
    /// A missing cluster attribute or external address is reported as `None`.
    /// Any other failure fails the whole snapshot.
    pub async fn facts(&self) -> Result<InstanceFacts, MetadataError> {
        let (instance, project, zone, cluster, private_ipv4, public_ipv4) = tokio::join!(
            self.instance(),
            self.project(),
            self.zone(),
            self.cluster(),
            self.private_ipv4(),
            self.public_ipv4(),
        );

        Ok(InstanceFacts {
            instance: instance?,
            project: project?,
            zone: zone?,
            cluster: optional(cluster)?,
            private_ipv4: private_ipv4?,
            public_ipv4: optional(public_ipv4)?,
        })
    }
}

fn optional(result: Result<String, MetadataError>) -> Result<Option<String>, MetadataError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// First `.`-separated label of a hostname.
fn host_label(hostname: &str) -> &str {
    hostname.split('.').next().unwrap_or(hostname)
}

/// Final `/`-separated segment of a resource path.
fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_label() {
        assert_eq!(host_label("abc123.c.myproj.internal"), "abc123");
        assert_eq!(host_label("abc123"), "abc123");
        assert_eq!(host_label(""), "");
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(
            last_segment("projects/12345/zones/us-central1-a"),
            "us-central1-a"
        );
        assert_eq!(last_segment("us-central1-a"), "us-central1-a");
    }

    #[test]
    fn test_optional() {
        let not_found = Err(MetadataError::InvalidResponse {
            status: 404,
            reason: "Not Found".to_string(),
        });
        assert_eq!(optional(not_found).unwrap(), None);
        assert_eq!(optional(Ok("x".to_string())).unwrap(), Some("x".to_string()));
        assert!(matches!(
            optional(Err(MetadataError::EmptyResponse)),
            Err(MetadataError::EmptyResponse)
        ));
    }

    #[test]
    fn test_with_base_url() {
        let metadata = GceMetadata::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(metadata.client().base_url(), "http://localhost:8080");
    }
}
