//! Snapshot of the facts an instance uses to identify itself.

use std::fmt;

use serde::Serialize;

/// Everything the accessors report, gathered in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceFacts {
    pub instance: String,
    pub project: String,
    pub zone: String,
    /// `None` when the instance carries no `cluster-name` attribute.
    pub cluster: Option<String>,
    pub private_ipv4: String,
    /// `None` when the primary interface has no external access config.
    pub public_ipv4: Option<String>,
}

impl fmt::Display for InstanceFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "instance: {}", self.instance)?;
        writeln!(f, "project: {}", self.project)?;
        writeln!(f, "zone: {}", self.zone)?;
        writeln!(f, "cluster: {}", self.cluster.as_deref().unwrap_or("-"))?;
        writeln!(f, "private-ipv4: {}", self.private_ipv4)?;
        write!(f, "public-ipv4: {}", self.public_ipv4.as_deref().unwrap_or("-"))
    }
}
