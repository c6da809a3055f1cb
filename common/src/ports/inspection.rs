use async_trait::async_trait;

use crate::facts::FactSet;
use crate::host::DiscoveredHost;

/// Reads the live fact set of a discovered node.
#[async_trait]
pub trait NodeInspector: Send + Sync {
    async fn fetch_facts(&self, host: &DiscoveredHost) -> anyhow::Result<FactSet>;
}
