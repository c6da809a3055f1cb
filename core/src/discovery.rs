//! # Discovery Engine
//!
//! Turns one fact set into a discovered host record.
//!
//! The engine only reads from its collaborators. It decides between three
//! outcomes and hands the record back; storing it is the caller's job.
//! 1. **Reject**: a managed host already owns the MAC.
//! 2. **Refresh**: a discovered host already uses the MAC as its primary
//!    interface. It is returned as stored.
//! 3. **Create**: a new record with a single primary and provision interface.

use tracing::{debug, info};

use intake_common::config::Settings;
use intake_common::error::{DiscoveryError, DiscoveryResult};
use intake_common::facts::FactSet;
use intake_common::host::{DiscoveredHost, Host};
use intake_common::ports::inventory::{HostRepository, TaxonomyRepository};
use intake_common::ports::subnets::SubnetLookup;

use crate::identity::resolve_identity;
use crate::placement::{PlacementResolver, boot_address};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    Created(DiscoveredHost),
    Refreshed(DiscoveredHost),
}

impl Discovery {
    pub fn host(&self) -> &DiscoveredHost {
        match self {
            Discovery::Created(host) | Discovery::Refreshed(host) => host,
        }
    }

    pub fn into_host(self) -> DiscoveredHost {
        match self {
            Discovery::Created(host) | Discovery::Refreshed(host) => host,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Discovery::Created(_))
    }
}

pub struct DiscoveryEngine<'a> {
    settings: &'a Settings,
    hosts: &'a dyn HostRepository,
    subnets: &'a dyn SubnetLookup,
    taxonomies: &'a dyn TaxonomyRepository,
}

impl<'a> DiscoveryEngine<'a> {
    pub fn new(
        settings: &'a Settings,
        hosts: &'a dyn HostRepository,
        subnets: &'a dyn SubnetLookup,
        taxonomies: &'a dyn TaxonomyRepository,
    ) -> Self {
        Self {
            settings,
            hosts,
            subnets,
            taxonomies,
        }
    }

    pub fn discover(&self, facts: &FactSet) -> DiscoveryResult<DiscoveredHost> {
        self.resolve(facts).map(Discovery::into_host)
    }

    /// Like [`discover`](Self::discover), but tells whether the record is new.
    pub fn resolve(&self, facts: &FactSet) -> DiscoveryResult<Discovery> {
        let identity = resolve_identity(facts, self.settings)?;
        let mac = identity.mac;

        if let Some(managed) = self.hosts.find_managed_by_mac(mac) {
            return Err(DiscoveryError::AlreadyManaged {
                name: managed.name,
                mac: mac.to_string(),
            });
        }

        if let Some(Host::Discovered(existing)) = self.hosts.find_by_primary_mac(mac) {
            info!("Host {} ({mac}) was discovered before", existing.name);
            return Ok(Discovery::Refreshed(existing));
        }

        let address = boot_address(facts, mac);
        let placement = PlacementResolver::new(self.settings, self.subnets, self.taxonomies)
            .resolve(address.ip, facts);

        let mut host = DiscoveredHost::new(identity.hostname, mac);
        if let Some(nic) = host.primary_interface_mut() {
            nic.ip = address.ip;
            nic.identifier = address.identifier;
            nic.subnet = placement.subnet.as_ref().map(|subnet| subnet.id);
        }
        host.organization = placement.organization.map(|t| t.id);
        host.location = placement.location.map(|t| t.id);
        host.facts = facts.clone();

        debug!("Built discovered host {} with {} facts", host.name, host.facts.len());
        Ok(Discovery::Created(host))
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
