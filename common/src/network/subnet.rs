use std::fmt;
use std::net::IpAddr;

use pnet::ipnetwork::IpNetwork;

use crate::taxonomy::TaxonomyId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubnetId(pub u64);

impl fmt::Display for SubnetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    pub id: SubnetId,
    pub name: String,
    pub network: IpNetwork,
    pub organizations: Vec<TaxonomyId>,
    pub locations: Vec<TaxonomyId>,
    /// A boot configuration proxy serves this subnet.
    pub tftp: bool,
}

impl Subnet {
    pub fn contains(&self, ip: IpAddr) -> bool {
        match (self.network, ip) {
            (IpNetwork::V4(_), IpAddr::V4(_)) | (IpNetwork::V6(_), IpAddr::V6(_)) => {
                self.network.contains(ip)
            }
            _ => false,
        }
    }

    /// The subnet's organization, if it is associated with exactly one.
    pub fn sole_organization(&self) -> Option<TaxonomyId> {
        sole(&self.organizations)
    }

    /// The subnet's location, if it is associated with exactly one.
    pub fn sole_location(&self) -> Option<TaxonomyId> {
        sole(&self.locations)
    }
}

fn sole(ids: &[TaxonomyId]) -> Option<TaxonomyId> {
    match ids {
        [only] => Some(*only),
        _ => None,
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
