//! # Discovery Service
//!
//! Application layer over the engine and the converter. It owns the ports
//! and performs the side effects the pure components leave out: storing
//! records, locking hosts into the discovery image, fetching live facts and
//! issuing build tokens.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use intake_common::config::Settings;
use intake_common::error::{DiscoveryError, DiscoveryResult};
use intake_common::facts::FactSet;
use intake_common::host::{BuildToken, DiscoveredHost, HasInterfaces, HostId, ManagedHost};
use intake_common::ports::inspection::NodeInspector;
use intake_common::ports::inventory::{HostRepository, TaxonomyRepository};
use intake_common::ports::provisioning::BootConfigurator;
use intake_common::ports::subnets::SubnetLookup;
use intake_common::taxonomy::ScopeContext;

use crate::boot;
use crate::converter::HostConverter;
use crate::discovery::{Discovery, DiscoveryEngine};

pub struct DiscoveryService {
    settings: Arc<Settings>,
    hosts: Arc<dyn HostRepository>,
    taxonomies: Arc<dyn TaxonomyRepository>,
    subnets: Arc<dyn SubnetLookup>,
    inspector: Box<dyn NodeInspector>,
    boot: Option<Box<dyn BootConfigurator>>,
}

impl DiscoveryService {
    pub fn new(
        settings: Arc<Settings>,
        hosts: Arc<dyn HostRepository>,
        taxonomies: Arc<dyn TaxonomyRepository>,
        subnets: Arc<dyn SubnetLookup>,
        inspector: Box<dyn NodeInspector>,
    ) -> Self {
        Self {
            settings,
            hosts,
            taxonomies,
            subnets,
            inspector,
            boot: None,
        }
    }

    /// Enables the discovery lock through `boot`.
    pub fn with_boot(mut self, boot: Box<dyn BootConfigurator>) -> Self {
        self.boot = Some(boot);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn taxonomies(&self) -> &dyn TaxonomyRepository {
        self.taxonomies.as_ref()
    }

    pub fn engine(&self) -> DiscoveryEngine<'_> {
        DiscoveryEngine::new(&self.settings, self.hosts.as_ref(), self.subnets.as_ref(), self.taxonomies.as_ref())
    }

    pub fn converter(&self) -> HostConverter<'_> {
        HostConverter::new(&self.settings)
    }

    /// Discovers a machine from its facts and stores it when it is new.
    pub fn import(&self, facts: &FactSet) -> DiscoveryResult<DiscoveredHost> {
        let span = info_span!("import");
        let _enter = span.enter();

        match self.engine().resolve(facts)? {
            Discovery::Refreshed(host) => Ok(host),
            Discovery::Created(host) => {
                self.hosts.save_discovered(&host)?;
                info!(
                    "Discovered {} ({})",
                    host.name,
                    host.mac().map(|mac| mac.to_string()).unwrap_or_default()
                );

                if self.settings.discovery_lock {
                    self.lock(&host);
                }
                Ok(host)
            }
        }
    }

    fn lock(&self, host: &DiscoveredHost) {
        let Some(boot) = &self.boot else {
            debug!("No boot configurator, {} stays unlocked", host.name);
            return;
        };

        let subnet = host.ip().and_then(|ip| self.subnets.subnet_for(ip));
        match subnet {
            Some(subnet) if subnet.tftp => {
                boot::lock(boot.as_ref(), host);
            }
            Some(subnet) => debug!("Subnet {} has no TFTP, {} stays unlocked", subnet.name, host.name),
            None => debug!("No subnet for {}, it stays unlocked", host.name),
        }
    }

    /// Replaces `host`'s facts with those reported live by the node and
    /// stores them. Identity and placement are left as they are.
    pub async fn refresh_facts(&self, host: &mut DiscoveredHost) -> bool {
        let facts = match self.inspector.fetch_facts(host).await {
            Ok(facts) => facts,
            Err(e) => {
                warn!("Could not refresh facts of {}: {e:#}", host.name);
                return false;
            }
        };

        if !self.hosts.update_facts(host.id, &facts) {
            warn!("{} is not stored, refreshed facts were not saved", host.name);
            return false;
        }
        host.facts = facts;
        info!("Refreshed {} facts of {}", host.facts.len(), host.name);
        true
    }

    /// Promotes the discovered host `name` to a managed host pending build.
    pub fn provision(&self, name: &str) -> DiscoveryResult<ManagedHost> {
        let span = info_span!("provision", host = name);
        let _enter = span.enter();

        let discovered = self
            .hosts
            .find_discovered(name)
            .ok_or_else(|| DiscoveryError::HostNotFound { name: name.to_string() })?;

        let converter = self.converter();
        let mut managed = converter.to_managed(discovered);
        let removed = converter.clear_facts(&mut managed);
        if removed > 0 {
            info!("Dropped {removed} facts outside '{}'", self.settings.discovery_fact_prefix);
        }

        let token = self.settings.token_validity().map(BuildToken::issue);
        self.hosts.promote(&managed, token)?;
        info!("Provisioning {}", managed.name);
        Ok(managed)
    }

    pub fn token_for(&self, id: HostId) -> Option<BuildToken> {
        self.hosts.token_for(id)
    }

    pub fn discovered(&self, scope: &ScopeContext) -> Vec<DiscoveredHost> {
        self.hosts.discovered(scope)
    }

    pub fn delete(&self, name: &str) -> bool {
        let deleted = self.hosts.delete_discovered(name);
        if deleted {
            info!("Deleted discovered host {name}");
        }
        deleted
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
