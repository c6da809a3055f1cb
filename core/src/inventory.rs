//! # In-Memory Inventory
//!
//! Reference implementation of the persistence and taxonomy ports. Every
//! write runs under one lock, which is where MAC uniqueness is enforced: two
//! concurrent discoveries of the same machine cannot both be stored.

use std::collections::{BTreeMap, HashMap};

use anyhow::Context;
use parking_lot::RwLock;
use pnet::util::MacAddr;
use tracing::debug;

use intake_common::config::{Config, TaxonomyEntry};
use intake_common::error::{DiscoveryError, DiscoveryResult};
use intake_common::facts::FactSet;
use intake_common::host::{BuildToken, DiscoveredHost, HasInterfaces, HasOrgLoc, Host, HostId, ManagedHost};
use intake_common::network::nic::Nic;
use intake_common::ports::inventory::{HostRepository, TaxonomyRepository};
use intake_common::taxonomy::{ScopeContext, Taxonomy, TaxonomyId, TaxonomyKind};

struct State {
    hosts: BTreeMap<HostId, Host>,
    tokens: HashMap<HostId, BuildToken>,
    taxonomies: Vec<Taxonomy>,
    organizations_enabled: bool,
    locations_enabled: bool,
}

pub struct MemoryInventory {
    state: RwLock<State>,
}

impl Default for MemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                hosts: BTreeMap::new(),
                tokens: HashMap::new(),
                taxonomies: Vec::new(),
                organizations_enabled: true,
                locations_enabled: true,
            }),
        }
    }

    /// Seeds the taxonomy trees of `config`. Parents must be declared before
    /// their children.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let inventory = Self::new();
        inventory.set_enabled(TaxonomyKind::Organization, config.taxonomy.organizations_enabled);
        inventory.set_enabled(TaxonomyKind::Location, config.taxonomy.locations_enabled);

        inventory.seed(TaxonomyKind::Organization, &config.organizations)?;
        inventory.seed(TaxonomyKind::Location, &config.locations)?;
        Ok(inventory)
    }

    fn seed(&self, kind: TaxonomyKind, entries: &[TaxonomyEntry]) -> anyhow::Result<()> {
        for entry in entries {
            let parent: Option<TaxonomyId> = match &entry.parent {
                Some(parent) => Some(
                    self.find_taxonomy(kind, parent)
                        .map(|found| found.id)
                        .with_context(|| {
                            format!("{kind} '{}' has unknown parent '{parent}'", entry.name)
                        })?,
                ),
                None => None,
            };
            self.add_taxonomy(kind, &entry.name, parent);
        }
        Ok(())
    }

    pub fn add_taxonomy(&self, kind: TaxonomyKind, name: &str, parent: Option<TaxonomyId>) -> Taxonomy {
        let mut state = self.state.write();
        let parent_title: Option<String> = parent.and_then(|id| {
            state
                .taxonomies
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.title.clone())
        });
        let taxonomy = Taxonomy {
            id: TaxonomyId(state.taxonomies.len() as u64 + 1),
            kind,
            name: name.to_string(),
            parent,
            title: match parent_title {
                Some(title) => format!("{title}/{name}"),
                None => name.to_string(),
            },
        };
        state.taxonomies.push(taxonomy.clone());
        taxonomy
    }

    pub fn set_enabled(&self, kind: TaxonomyKind, enabled: bool) {
        let mut state = self.state.write();
        match kind {
            TaxonomyKind::Organization => state.organizations_enabled = enabled,
            TaxonomyKind::Location => state.locations_enabled = enabled,
        }
    }

    pub fn len(&self) -> usize {
        self.state.read().hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_managed(&self, name: &str) -> Option<ManagedHost> {
        self.state.read().hosts.values().find_map(|host| match host {
            Host::Managed(managed) if managed.name == name => Some(managed.clone()),
            _ => None,
        })
    }
}

/// Fails if a host other than `id` already uses `name` or owns one of
/// `interfaces`' MACs.
fn ensure_unique(state: &State, id: HostId, name: &str, interfaces: &[Nic]) -> DiscoveryResult<()> {
    if state.hosts.values().any(|host| host.id() != id && host.name() == name) {
        return Err(DiscoveryError::NameTaken { name: name.to_string() });
    }

    for nic in interfaces {
        let owner = state
            .hosts
            .values()
            .find(|host| host.id() != id && host.owns_mac(nic.mac));

        match owner {
            Some(Host::Managed(owner)) => {
                return Err(DiscoveryError::AlreadyManaged {
                    name: owner.name.clone(),
                    mac: nic.mac.to_string(),
                });
            }
            Some(Host::Discovered(owner)) => {
                return Err(DiscoveryError::DuplicateMac {
                    mac: nic.mac.to_string(),
                    owner: owner.name.to_string(),
                });
            }
            None => {}
        }
    }
    Ok(())
}

impl HostRepository for MemoryInventory {
    fn find_by_primary_mac(&self, mac: MacAddr) -> Option<Host> {
        self.state
            .read()
            .hosts
            .values()
            .find(|host| host.interfaces().iter().any(|nic| nic.primary && nic.mac == mac))
            .cloned()
    }

    fn find_managed_by_mac(&self, mac: MacAddr) -> Option<ManagedHost> {
        self.state.read().hosts.values().find_map(|host| match host {
            Host::Managed(managed) if managed.owns_mac(mac) => Some(managed.clone()),
            _ => None,
        })
    }

    fn find_discovered(&self, name: &str) -> Option<DiscoveredHost> {
        self.state.read().hosts.values().find_map(|host| match host {
            Host::Discovered(discovered) if discovered.name == name => Some(discovered.clone()),
            _ => None,
        })
    }

    fn save_discovered(&self, host: &DiscoveredHost) -> DiscoveryResult<()> {
        let mut state = self.state.write();
        ensure_unique(&state, host.id, host.name.as_str(), &host.interfaces)?;
        state.hosts.insert(host.id, Host::Discovered(host.clone()));
        debug!("Stored discovered host {}", host.name);
        Ok(())
    }

    fn save_managed(&self, host: &ManagedHost) -> DiscoveryResult<()> {
        let mut state = self.state.write();
        ensure_unique(&state, host.id, &host.name, &host.interfaces)?;
        state.hosts.insert(host.id, Host::Managed(host.clone()));
        debug!("Stored managed host {}", host.name);
        Ok(())
    }

    fn promote(&self, host: &ManagedHost, token: Option<BuildToken>) -> DiscoveryResult<()> {
        let mut state = self.state.write();
        if !matches!(state.hosts.get(&host.id), Some(Host::Discovered(_))) {
            return Err(DiscoveryError::HostNotFound {
                name: host.name.clone(),
            });
        }
        ensure_unique(&state, host.id, &host.name, &host.interfaces)?;

        state.hosts.insert(host.id, Host::Managed(host.clone()));
        match token {
            Some(token) => {
                state.tokens.insert(host.id, token);
            }
            None => {
                state.tokens.remove(&host.id);
            }
        }
        debug!("Promoted {} to managed", host.name);
        Ok(())
    }

    fn update_facts(&self, id: HostId, facts: &FactSet) -> bool {
        let mut state = self.state.write();
        match state.hosts.get_mut(&id) {
            Some(Host::Discovered(host)) => host.facts = facts.clone(),
            Some(Host::Managed(host)) => host.facts = facts.clone(),
            None => return false,
        }
        true
    }

    fn delete_discovered(&self, name: &str) -> bool {
        let mut state = self.state.write();
        let id = state.hosts.values().find_map(|host| match host {
            Host::Discovered(discovered) if discovered.name == name => Some(discovered.id),
            _ => None,
        });

        match id {
            Some(id) => {
                state.hosts.remove(&id);
                state.tokens.remove(&id);
                true
            }
            None => false,
        }
    }

    fn discovered(&self, scope: &ScopeContext) -> Vec<DiscoveredHost> {
        let state = self.state.read();
        let mut hosts: Vec<DiscoveredHost> = state
            .hosts
            .values()
            .filter_map(|host| match host {
                Host::Discovered(discovered) => Some(discovered),
                Host::Managed(_) => None,
            })
            .filter(|host| scope.permits(host.organization(), host.location()))
            .cloned()
            .collect();
        hosts.sort_by(|a, b| a.name.cmp(&b.name));
        hosts
    }

    fn token_for(&self, id: HostId) -> Option<BuildToken> {
        self.state.read().tokens.get(&id).cloned()
    }
}

impl TaxonomyRepository for MemoryInventory {
    fn find_taxonomy(&self, kind: TaxonomyKind, name: &str) -> Option<Taxonomy> {
        let state = self.state.read();
        let mut of_kind = state.taxonomies.iter().filter(|t| t.kind == kind);
        of_kind
            .clone()
            .find(|t| t.title == name)
            .or_else(|| of_kind.find(|t| t.name == name))
            .cloned()
    }

    fn taxonomy(&self, id: TaxonomyId) -> Option<Taxonomy> {
        self.state.read().taxonomies.iter().find(|t| t.id == id).cloned()
    }

    fn enabled(&self, kind: TaxonomyKind) -> bool {
        let state = self.state.read();
        match kind {
            TaxonomyKind::Organization => state.organizations_enabled,
            TaxonomyKind::Location => state.locations_enabled,
        }
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
