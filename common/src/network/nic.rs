use std::net::IpAddr;

use pnet::util::MacAddr;

use crate::host::HostId;
use crate::network::subnet::SubnetId;

/// A network interface owned by exactly one host.
///
/// A host has at most one primary interface (its identity) and at most one
/// provision interface (the one it boots and installs from). Discovery
/// creates a single interface carrying both flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nic {
    pub host: HostId,
    pub mac: MacAddr,
    pub ip: Option<IpAddr>,
    /// Interface name as reported by the machine (e.g. `eth0`).
    pub identifier: Option<String>,
    pub subnet: Option<SubnetId>,
    pub primary: bool,
    pub provision: bool,
}

impl Nic {
    pub fn new(host: HostId, mac: MacAddr) -> Self {
        Self {
            host,
            mac,
            ip: None,
            identifier: None,
            subnet: None,
            primary: false,
            provision: false,
        }
    }

    /// Marks the interface as both primary and provision.
    pub fn boot(mut self) -> Self {
        self.primary = true;
        self.provision = true;
        self
    }
}
