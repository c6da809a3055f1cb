//! # Network Placement
//!
//! Decides where a discovered machine sits: the address it booted with, the
//! subnet containing that address, and the organization and location it is
//! assigned to.
//!
//! Organization and location are each resolved by precedence, first match wins:
//! 1. the override fact (`foreman_organization` / `foreman_location`);
//! 2. the `discovery_organization` / `discovery_location` setting;
//! 3. the subnet's taxonomy, when it is associated with exactly one;
//! 4. nothing.
//!
//! A name that does not exist is skipped with a warning. Misconfigured
//! taxonomy never blocks discovery.

use std::net::IpAddr;

use pnet::util::MacAddr;
use tracing::{debug, warn};

use intake_common::config::Settings;
use intake_common::facts::{BOOTIP_FACT, FactSet};
use intake_common::network::mac::parse_mac;
use intake_common::network::subnet::Subnet;
use intake_common::ports::inventory::TaxonomyRepository;
use intake_common::ports::subnets::SubnetLookup;
use intake_common::taxonomy::{Taxonomy, TaxonomyKind};

/// Address and interface name of the interface a machine booted from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootAddress {
    pub ip: Option<IpAddr>,
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    pub subnet: Option<Subnet>,
    pub organization: Option<Taxonomy>,
    pub location: Option<Taxonomy>,
}

/// Finds the boot interface's address in the facts.
///
/// Tries `discovery_bootip`, then the interface listed in `interfaces` whose
/// `macaddress_<name>` is `mac` (reading `ipaddress_<name>`), then `ipaddress`.
pub fn boot_address(facts: &FactSet, mac: MacAddr) -> BootAddress {
    let identifier: Option<String> = facts.usable("interfaces").and_then(|names| {
        names
            .split(',')
            .map(str::trim)
            .find(|name| {
                facts
                    .usable(&format!("macaddress_{name}"))
                    .and_then(parse_mac)
                    .is_some_and(|found| found == mac)
            })
            .map(str::to_string)
    });

    let ip: Option<IpAddr> = parse_ip(facts, BOOTIP_FACT)
        .or_else(|| {
            identifier
                .as_deref()
                .and_then(|name| parse_ip(facts, &format!("ipaddress_{name}")))
        })
        .or_else(|| parse_ip(facts, "ipaddress"));

    BootAddress { ip, identifier }
}

fn parse_ip(facts: &FactSet, name: &str) -> Option<IpAddr> {
    facts.usable(name).and_then(|value| value.trim().parse().ok())
}

pub struct PlacementResolver<'a> {
    settings: &'a Settings,
    subnets: &'a dyn SubnetLookup,
    taxonomies: &'a dyn TaxonomyRepository,
}

impl<'a> PlacementResolver<'a> {
    pub fn new(
        settings: &'a Settings,
        subnets: &'a dyn SubnetLookup,
        taxonomies: &'a dyn TaxonomyRepository,
    ) -> Self {
        Self {
            settings,
            subnets,
            taxonomies,
        }
    }

    pub fn resolve(&self, primary_ip: Option<IpAddr>, facts: &FactSet) -> Placement {
        let subnet: Option<Subnet> = primary_ip.and_then(|ip| self.subnets.subnet_for(ip));
        match (&subnet, primary_ip) {
            (Some(subnet), Some(ip)) => debug!("Address {ip} belongs to subnet {}", subnet.name),
            (None, Some(ip)) => debug!("No subnet known for {ip}"),
            _ => debug!("No boot address reported, skipping subnet lookup"),
        }

        let organization = self.resolve_taxonomy(TaxonomyKind::Organization, facts, subnet.as_ref());
        let location = self.resolve_taxonomy(TaxonomyKind::Location, facts, subnet.as_ref());

        Placement {
            subnet,
            organization,
            location,
        }
    }

    fn resolve_taxonomy(
        &self,
        kind: TaxonomyKind,
        facts: &FactSet,
        subnet: Option<&Subnet>,
    ) -> Option<Taxonomy> {
        if !self.taxonomies.enabled(kind) {
            return None;
        }

        let (fact, setting, setting_value, from_subnet) = match kind {
            TaxonomyKind::Organization => (
                self.settings.organization_fact.as_str(),
                "discovery_organization",
                self.settings.discovery_organization.as_deref(),
                subnet.and_then(Subnet::sole_organization),
            ),
            TaxonomyKind::Location => (
                self.settings.location_fact.as_str(),
                "discovery_location",
                self.settings.discovery_location.as_deref(),
                subnet.and_then(Subnet::sole_location),
            ),
        };

        facts
            .usable(fact)
            .and_then(|name| self.lookup(kind, name, fact))
            .or_else(|| {
                setting_value
                    .filter(|name| !name.trim().is_empty())
                    .and_then(|name| self.lookup(kind, name, setting))
            })
            .or_else(|| from_subnet.and_then(|id| self.taxonomies.taxonomy(id)))
    }

    fn lookup(&self, kind: TaxonomyKind, name: &str, source: &str) -> Option<Taxonomy> {
        let found = self.taxonomies.find_taxonomy(kind, name.trim());
        if found.is_none() {
            warn!("The {kind} '{name}' given by {source} does not exist, ignoring it");
        }
        found
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
