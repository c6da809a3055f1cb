use std::net::IpAddr;

use colored::*;
use intake_common::host::{HasFacts, HasInterfaces, HasOrgLoc};
use intake_common::ports::inventory::TaxonomyRepository;
use intake_common::taxonomy::TaxonomyId;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

/// Tree rows describing a host of either kind.
pub fn host_details<H>(host: &H, taxonomies: &dyn TaxonomyRepository) -> Vec<Detail>
where
    H: HasInterfaces + HasFacts + HasOrgLoc,
{
    let mut details: Vec<Detail> = Vec::new();

    if let Some(nic) = host.primary_interface() {
        details.push(("MAC".to_string(), nic.mac.to_string().color(colors::MAC_ADDR)));
        if let Some(ip) = nic.ip {
            details.push(ip_detail(ip));
        }
        if let Some(identifier) = &nic.identifier {
            details.push(("Interface".to_string(), identifier.as_str().normal()));
        }
        if let Some(subnet) = nic.subnet {
            details.push(("Subnet".to_string(), format!("#{subnet}").normal()));
        }
    }

    details.extend(taxonomy_detail("Organization", host.organization(), taxonomies));
    details.extend(taxonomy_detail("Location", host.location(), taxonomies));
    details.push(("Facts".to_string(), host.facts().len().to_string().normal()));
    details
}

fn ip_detail(ip: IpAddr) -> Detail {
    match ip {
        IpAddr::V4(ip) => ("IPv4".to_string(), ip.to_string().color(colors::IPV4_ADDR)),
        IpAddr::V6(ip) => ("IPv6".to_string(), ip.to_string().color(colors::IPV6_ADDR)),
    }
}

fn taxonomy_detail(
    key: &str,
    id: Option<TaxonomyId>,
    taxonomies: &dyn TaxonomyRepository,
) -> Option<Detail> {
    let title = taxonomies.taxonomy(id?)?.title;
    Some((key.to_string(), title.color(colors::TAXONOMY)))
}
