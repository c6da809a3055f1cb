//! # Host Models
//!
//! A host is either *discovered* (seen on the network, not yet provisioned)
//! or *managed* (promoted by an operator). Both kinds share the same
//! capabilities, exposed through [`HasInterfaces`], [`HasFacts`] and
//! [`HasOrgLoc`]; [`Host`] tags which kind a stored record is.

pub mod hostname;

use std::fmt;
use std::net::IpAddr;

use pnet::util::MacAddr;
use time::{Duration, OffsetDateTime};

use crate::facts::FactSet;
use crate::network::nic::Nic;
use crate::taxonomy::TaxonomyId;
pub use hostname::Hostname;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(pub u64);

impl HostId {
    pub fn generate() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

pub trait HasInterfaces {
    fn interfaces(&self) -> &[Nic];

    fn primary_interface(&self) -> Option<&Nic> {
        self.interfaces().iter().find(|nic| nic.primary)
    }

    fn provision_interface(&self) -> Option<&Nic> {
        self.interfaces().iter().find(|nic| nic.provision)
    }

    fn mac(&self) -> Option<MacAddr> {
        self.primary_interface().map(|nic| nic.mac)
    }

    fn ip(&self) -> Option<IpAddr> {
        self.primary_interface().and_then(|nic| nic.ip)
    }

    fn owns_mac(&self, mac: MacAddr) -> bool {
        self.interfaces().iter().any(|nic| nic.mac == mac)
    }
}

pub trait HasFacts {
    fn facts(&self) -> &FactSet;
}

pub trait HasOrgLoc {
    fn organization(&self) -> Option<TaxonomyId>;
    fn location(&self) -> Option<TaxonomyId>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredHost {
    pub id: HostId,
    pub name: Hostname,
    pub interfaces: Vec<Nic>,
    pub facts: FactSet,
    pub organization: Option<TaxonomyId>,
    pub location: Option<TaxonomyId>,
    pub discovered_at: OffsetDateTime,
}

impl DiscoveredHost {
    /// Creates a host whose single interface is both primary and provision.
    pub fn new(name: Hostname, mac: MacAddr) -> Self {
        let id = HostId::generate();
        Self {
            id,
            name,
            interfaces: vec![Nic::new(id, mac).boot()],
            facts: FactSet::new(),
            organization: None,
            location: None,
            discovered_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn primary_interface_mut(&mut self) -> Option<&mut Nic> {
        self.interfaces.iter_mut().find(|nic| nic.primary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedHost {
    pub id: HostId,
    pub name: String,
    pub interfaces: Vec<Nic>,
    pub facts: FactSet,
    pub organization: Option<TaxonomyId>,
    pub location: Option<TaxonomyId>,
    /// Pending provisioning.
    pub build: bool,
}

impl ManagedHost {
    pub fn new(name: impl Into<String>, mac: MacAddr) -> Self {
        let id = HostId::generate();
        Self {
            id,
            name: name.into(),
            interfaces: vec![Nic::new(id, mac).boot()],
            facts: FactSet::new(),
            organization: None,
            location: None,
            build: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    Discovered(DiscoveredHost),
    Managed(ManagedHost),
}

impl Host {
    pub fn id(&self) -> HostId {
        match self {
            Host::Discovered(host) => host.id,
            Host::Managed(host) => host.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Host::Discovered(host) => host.name.as_str(),
            Host::Managed(host) => &host.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Host::Discovered(_) => "Discovered",
            Host::Managed(_) => "Managed",
        }
    }

    pub fn is_managed(&self) -> bool {
        matches!(self, Host::Managed(_))
    }
}

macro_rules! impl_capabilities {
    ($($ty:ty),*) => {$(
        impl HasInterfaces for $ty {
            fn interfaces(&self) -> &[Nic] {
                &self.interfaces
            }
        }

        impl HasFacts for $ty {
            fn facts(&self) -> &FactSet {
                &self.facts
            }
        }

        impl HasOrgLoc for $ty {
            fn organization(&self) -> Option<TaxonomyId> {
                self.organization
            }

            fn location(&self) -> Option<TaxonomyId> {
                self.location
            }
        }
    )*};
}

impl_capabilities!(DiscoveredHost, ManagedHost);

impl HasInterfaces for Host {
    fn interfaces(&self) -> &[Nic] {
        match self {
            Host::Discovered(host) => host.interfaces(),
            Host::Managed(host) => host.interfaces(),
        }
    }
}

impl HasFacts for Host {
    fn facts(&self) -> &FactSet {
        match self {
            Host::Discovered(host) => host.facts(),
            Host::Managed(host) => host.facts(),
        }
    }
}

impl HasOrgLoc for Host {
    fn organization(&self) -> Option<TaxonomyId> {
        match self {
            Host::Discovered(host) => host.organization,
            Host::Managed(host) => host.organization,
        }
    }

    fn location(&self) -> Option<TaxonomyId> {
        match self {
            Host::Discovered(host) => host.location,
            Host::Managed(host) => host.location,
        }
    }
}

/// One-time credential a host presents while it provisions itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildToken {
    pub value: String,
    pub expires: OffsetDateTime,
}

impl BuildToken {
    pub fn issue(valid_for: Duration) -> Self {
        Self {
            value: format!("{:032x}", rand::random::<u128>()),
            expires: OffsetDateTime::now_utc() + valid_for,
        }
    }

    pub fn is_expired(&self) -> bool {
        OffsetDateTime::now_utc() >= self.expires
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
