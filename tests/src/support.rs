//! Fixture and test doubles shared by the integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use pnet::util::MacAddr;

use intake_common::config::Settings;
use intake_common::facts::FactSet;
use intake_common::host::{DiscoveredHost, HasInterfaces};
use intake_common::ports::inspection::NodeInspector;
use intake_common::ports::provisioning::{BootConfigurator, PxeKind};
use intake_common::ports::subnets::SubnetLookup;
use intake_common::taxonomy::{Taxonomy, TaxonomyKind};
use intake_core::inventory::MemoryInventory;
use intake_core::service::DiscoveryService;
use intake_core::subnets::SubnetTable;

pub const FIXTURE_MAC: MacAddr = MacAddr(0xe4, 0x1f, 0x13, 0xcc, 0x36, 0x58);
pub const FIXTURE_NAME: &str = "mace41f13cc3658";
pub const FIXTURE_NETWORK: &str = "10.35.27.0/24";

/// Facts uploaded by an IBM x3550 booting the discovery image.
pub fn fixture_facts() -> FactSet {
    FactSet::from_json(include_str!("../fixtures/facts.json")).expect("fixture facts are valid")
}

pub fn fixture_with(extra: &[(&str, &str)]) -> FactSet {
    let mut facts = fixture_facts();
    facts.extend(extra.iter().copied());
    facts
}

/// Boot configurator remembering every entry written through it.
#[derive(Clone, Default)]
pub struct RecordingBoot {
    entries: Arc<Mutex<Vec<(PxeKind, MacAddr, String)>>>,
}

impl RecordingBoot {
    pub fn entries(&self) -> Vec<(PxeKind, MacAddr, String)> {
        self.entries.lock().clone()
    }
}

impl BootConfigurator for RecordingBoot {
    fn set(&self, kind: PxeKind, mac: MacAddr, content: &str) -> anyhow::Result<()> {
        self.entries.lock().push((kind, mac, content.to_string()));
        Ok(())
    }
}

/// Node inspector answering with fixed facts, or failing when it has none.
pub struct StubInspector(pub Option<FactSet>);

#[async_trait]
impl NodeInspector for StubInspector {
    async fn fetch_facts(&self, host: &DiscoveredHost) -> anyhow::Result<FactSet> {
        self.0
            .clone()
            .ok_or_else(|| anyhow::anyhow!("{} did not answer", host.name))
    }
}

/// In-memory inventory and subnets wired into a service.
pub struct World {
    pub inventory: Arc<MemoryInventory>,
    pub subnets: Arc<SubnetTable>,
    pub boot: RecordingBoot,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            inventory: Arc::new(MemoryInventory::new()),
            subnets: Arc::new(SubnetTable::new()),
            boot: RecordingBoot::default(),
        }
    }

    pub fn organization(&self, name: &str) -> Taxonomy {
        self.inventory.add_taxonomy(TaxonomyKind::Organization, name, None)
    }

    pub fn location(&self, name: &str) -> Taxonomy {
        self.inventory.add_taxonomy(TaxonomyKind::Location, name, None)
    }

    /// Adds `Subnet99` covering the fixture address.
    pub fn subnet99(&self, organizations: &[&Taxonomy], locations: &[&Taxonomy], tftp: bool) {
        self.subnets.add(
            "Subnet99",
            FIXTURE_NETWORK.parse().expect("valid network"),
            organizations.iter().map(|t| t.id).collect(),
            locations.iter().map(|t| t.id).collect(),
            tftp,
        );
    }

    /// Name of the subnet recorded on `host`'s primary interface.
    pub fn subnet_name(&self, host: &DiscoveredHost) -> Option<String> {
        let id = host.primary_interface()?.subnet?;
        let subnet = self.subnets.subnet_for(host.ip()?)?;
        (subnet.id == id).then_some(subnet.name)
    }

    pub fn service(&self, settings: Settings) -> DiscoveryService {
        self.service_with(settings, StubInspector(Some(fixture_facts())))
    }

    pub fn service_with(&self, settings: Settings, inspector: StubInspector) -> DiscoveryService {
        DiscoveryService::new(
            Arc::new(settings),
            self.inventory.clone(),
            self.inventory.clone(),
            self.subnets.clone(),
            Box::new(inspector),
        )
        .with_boot(Box::new(self.boot.clone()))
    }
}
