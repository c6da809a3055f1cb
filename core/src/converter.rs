//! # Host Conversion
//!
//! Promotes a discovered host to a managed one. Interfaces move to the new
//! record with their flags, and the record id is kept so the managed host
//! replaces the discovered one in place.
//!
//! Fact cleanup is a separate step ([`HostConverter::clear_facts`]) so callers
//! can inspect the full fact set before deciding to persist.

use tracing::debug;

use intake_common::config::Settings;
use intake_common::host::{DiscoveredHost, ManagedHost};

pub struct HostConverter<'a> {
    settings: &'a Settings,
}

impl<'a> HostConverter<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Builds the unsaved managed host. No token is issued here.
    pub fn to_managed(&self, discovered: DiscoveredHost) -> ManagedHost {
        let DiscoveredHost {
            id,
            name,
            mut interfaces,
            facts,
            organization,
            location,
            ..
        } = discovered;

        for nic in &mut interfaces {
            nic.host = id;
        }

        ManagedHost {
            id,
            name: name.into_string(),
            interfaces,
            facts,
            organization,
            location,
            build: true,
        }
    }

    /// Drops every fact outside `discovery_fact_prefix` when
    /// `discovery_clean_facts` is set. Returns how many were removed.
    pub fn clear_facts(&self, host: &mut ManagedHost) -> usize {
        if !self.settings.discovery_clean_facts {
            return 0;
        }

        let prefix = self.settings.discovery_fact_prefix.as_str();
        let before = host.facts.len();
        host.facts.retain(|name, _| name.starts_with(prefix));

        let removed = before - host.facts.len();
        debug!("Removed {removed} facts from {}", host.name);
        removed
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
