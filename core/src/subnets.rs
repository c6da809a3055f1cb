use std::net::IpAddr;

use anyhow::Context;
use parking_lot::RwLock;
use pnet::ipnetwork::IpNetwork;

use intake_common::config::Config;
use intake_common::network::subnet::{Subnet, SubnetId};
use intake_common::ports::inventory::TaxonomyRepository;
use intake_common::ports::subnets::SubnetLookup;
use intake_common::taxonomy::{TaxonomyId, TaxonomyKind};

/// Known subnets, searched most specific first.
#[derive(Default)]
pub struct SubnetTable {
    subnets: RwLock<Vec<Subnet>>,
}

impl SubnetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from the `[[subnets]]` of `config`, resolving taxonomy
    /// names through `taxonomies`.
    pub fn from_config(config: &Config, taxonomies: &dyn TaxonomyRepository) -> anyhow::Result<Self> {
        let table = Self::new();
        for entry in &config.subnets {
            let network: IpNetwork = entry
                .network
                .parse()
                .with_context(|| format!("subnet '{}' has invalid network '{}'", entry.name, entry.network))?;

            let organizations =
                resolve_all(taxonomies, TaxonomyKind::Organization, &entry.organizations, &entry.name)?;
            let locations = resolve_all(taxonomies, TaxonomyKind::Location, &entry.locations, &entry.name)?;

            table.add(&entry.name, network, organizations, locations, entry.tftp);
        }
        Ok(table)
    }

    pub fn add(
        &self,
        name: &str,
        network: IpNetwork,
        organizations: Vec<TaxonomyId>,
        locations: Vec<TaxonomyId>,
        tftp: bool,
    ) -> Subnet {
        let mut subnets = self.subnets.write();
        let subnet = Subnet {
            id: SubnetId(subnets.len() as u64 + 1),
            name: name.to_string(),
            network,
            organizations,
            locations,
            tftp,
        };
        subnets.push(subnet.clone());
        subnet
    }

    pub fn len(&self) -> usize {
        self.subnets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn resolve_all(
    taxonomies: &dyn TaxonomyRepository,
    kind: TaxonomyKind,
    names: &[String],
    subnet: &str,
) -> anyhow::Result<Vec<TaxonomyId>> {
    names
        .iter()
        .map(|name| {
            taxonomies
                .find_taxonomy(kind, name)
                .map(|t| t.id)
                .with_context(|| format!("subnet '{subnet}' references unknown {kind} '{name}'"))
        })
        .collect()
}

impl SubnetLookup for SubnetTable {
    fn subnet_for(&self, ip: IpAddr) -> Option<Subnet> {
        self.subnets
            .read()
            .iter()
            .filter(|subnet| subnet.contains(ip))
            .max_by_key(|subnet| subnet.network.prefix())
            .cloned()
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
