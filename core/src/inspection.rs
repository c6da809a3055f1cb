//! # Node Inspection
//!
//! The discovery image serves its current facts over HTTP. [`HttpInventory`]
//! reads them from the address of the host's primary interface.

use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use async_trait::async_trait;
use tracing::debug;

use intake_common::config::InspectionConfig;
use intake_common::facts::FactSet;
use intake_common::host::{DiscoveredHost, HasInterfaces};
use intake_common::ports::inspection::NodeInspector;

const FACTS_PATH: &str = "/inventory/facter";

pub struct HttpInventory {
    client: reqwest::Client,
    port: u16,
}

impl HttpInventory {
    pub fn new(config: &InspectionConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("intake/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building inspection client")?;

        Ok(Self {
            client,
            port: config.port,
        })
    }

    pub fn facts_url(&self, ip: IpAddr) -> String {
        match ip {
            IpAddr::V4(ip) => format!("http://{ip}:{}{FACTS_PATH}", self.port),
            IpAddr::V6(ip) => format!("http://[{ip}]:{}{FACTS_PATH}", self.port),
        }
    }
}

#[async_trait]
impl NodeInspector for HttpInventory {
    async fn fetch_facts(&self, host: &DiscoveredHost) -> anyhow::Result<FactSet> {
        let Some(ip) = host.ip() else {
            bail!("{} has no known address", host.name);
        };
        let url = self.facts_url(ip);
        debug!("Fetching facts of {} from {url}", host.name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?;

        if !response.status().is_success() {
            bail!("{url} answered {}", response.status());
        }

        let body: serde_json::Value = response
            .json()
            .await
            .with_context(|| format!("decoding facts from {url}"))?;
        FactSet::from_value(body)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
