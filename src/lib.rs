//! Minimal Rust crate for reading instance facts from the GCE metadata server.
//!
//! Every value is fetched with a single GET against
//! `http://metadata.google.internal/computeMetadata/v1/`, carrying the
//! `Metadata-Flavor: Google` header and bounded by a one second timeout.
//! Nothing is cached and nothing is retried.
//!
//! # Example
//!
//! ```ignore
//! use gce_metadata::MetadataError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), MetadataError> {
//!     // One-off lookups with a fresh default client
//!     let zone = gce_metadata::zone().await?;
//!
//!     // Or share one client across several lookups
//!     let metadata = gce_metadata::GceMetadata::new()?;
//!     let facts = metadata.facts().await?;
//!     println!("{} runs in {}", facts.instance, zone);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Accessors
//!
//! | Accessor | Metadata path | Returned value |
//! |----------|---------------|----------------|
//! | `instance` | `instance/hostname` | First hostname label |
//! | `project` | `instance/project-id` | Body |
//! | `zone` | `instance/zone` | Last path segment |
//! | `cluster` | `instance/attributes/cluster-name` | Body |
//! | `private_ipv4` | `instance/network-interfaces/0/ip` | Body |
//! | `public_ipv4` | `instance/network-interfaces/0/access-configs/0/external-ip` | Body |

mod client;
mod error;
mod facts;
mod metadata;

pub use client::{MetadataClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, METADATA_PATH};
pub use error::MetadataError;
pub use facts::InstanceFacts;
pub use metadata::GceMetadata;

/// Fetch `url` with the metadata header and the default timeout.
pub async fn get(url: &str) -> Result<String, MetadataError> {
    MetadataClient::with_default_timeout()?.get(url).await
}

/// The instance name of the current instance.
pub async fn instance() -> Result<String, MetadataError> {
    GceMetadata::new()?.instance().await
}

/// The project id of the current instance.
pub async fn project() -> Result<String, MetadataError> {
    GceMetadata::new()?.project().await
}

/// The zone of the current instance.
pub async fn zone() -> Result<String, MetadataError> {
    GceMetadata::new()?.zone().await
}

/// The cluster the current instance belongs to.
pub async fn cluster() -> Result<String, MetadataError> {
    GceMetadata::new()?.cluster().await
}

/// The internal IPv4 address of the current instance.
pub async fn private_ipv4() -> Result<String, MetadataError> {
    GceMetadata::new()?.private_ipv4().await
}

/// The external IPv4 address of the current instance.
pub async fn public_ipv4() -> Result<String, MetadataError> {
    GceMetadata::new()?.public_ipv4().await
}
