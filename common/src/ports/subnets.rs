use std::net::IpAddr;

use crate::network::subnet::Subnet;

pub trait SubnetLookup: Send + Sync {
    /// The subnet containing `ip`, if one is known.
    fn subnet_for(&self, ip: IpAddr) -> Option<Subnet>;
}
