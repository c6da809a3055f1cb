//! # Identity Resolution
//!
//! Derives who a machine is from its facts: the MAC of the interface that
//! identifies it and the name it will be registered under.
//!
//! * The MAC comes from the `discovery_fact` candidates (by default the boot
//!   interface fact) and must be a well-formed address.
//! * The name comes from the `discovery_hostname` candidates, prefixed with
//!   `discovery_prefix` and normalized. A MAC-looking value is canonicalized
//!   first, so `E4:1F:13:CC:36:5A` and `e4-1f-13-cc-36-5a` give the same name.

use pnet::util::MacAddr;
use tracing::{debug, warn};

use intake_common::config::Settings;
use intake_common::error::{DiscoveryError, DiscoveryResult};
use intake_common::facts::FactSet;
use intake_common::host::Hostname;
use intake_common::network::mac::parse_mac;

use crate::facts::{first_valid, select_first_valid};

pub const HOSTNAME_SETTING: &str = "discovery_hostname";
pub const MAC_SETTING: &str = "discovery_fact";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub mac: MacAddr,
    pub hostname: Hostname,
}

pub fn resolve_identity(facts: &FactSet, settings: &Settings) -> DiscoveryResult<Identity> {
    let hostname_facts = settings.hostname_facts();
    let raw_name = select_first_valid(HOSTNAME_SETTING, &*hostname_facts, facts)?;
    let mac = resolve_mac(facts, settings)?;
    let hostname = resolve_hostname(&settings.discovery_prefix, raw_name)?;

    if !hostname.starts_with_letter() {
        warn!("Hostname {hostname} does not start with an alphabetical character");
    }
    debug!("Resolved identity {hostname} ({mac})");

    Ok(Identity { mac, hostname })
}

/// The primary MAC, read from the first usable `discovery_fact` candidate.
pub fn resolve_mac(facts: &FactSet, settings: &Settings) -> DiscoveryResult<MacAddr> {
    let candidates = settings.mac_facts();
    let Some((fact, value)) = first_valid(candidates.iter(), facts) else {
        return Err(DiscoveryError::InvalidFactValue {
            setting: MAC_SETTING.to_string(),
            candidates: candidates.to_vec(),
        });
    };

    parse_mac(value).ok_or_else(|| DiscoveryError::NoPrimaryInterface {
        setting: MAC_SETTING.to_string(),
        fact: fact.to_string(),
        value: value.to_string(),
    })
}

pub fn resolve_hostname(prefix: &str, raw: &str) -> DiscoveryResult<Hostname> {
    match parse_mac(raw) {
        Some(mac) => Hostname::parse(&format!("{prefix}{mac}")),
        None => Hostname::parse(&format!("{prefix}{raw}")),
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
