use pnet::util::MacAddr;

use crate::error::DiscoveryResult;
use crate::facts::FactSet;
use crate::host::{BuildToken, DiscoveredHost, Host, HostId, ManagedHost};
use crate::taxonomy::{ScopeContext, Taxonomy, TaxonomyId, TaxonomyKind};

/// Persistence of host records.
///
/// Implementations must keep MAC addresses unique across hosts: saving a
/// host whose MAC is already registered fails with `AlreadyManaged` when the
/// owner is managed and `DuplicateMac` otherwise.
pub trait HostRepository: Send + Sync {
    /// The host whose *primary* interface carries `mac`.
    fn find_by_primary_mac(&self, mac: MacAddr) -> Option<Host>;

    /// The managed host owning any interface with `mac`.
    fn find_managed_by_mac(&self, mac: MacAddr) -> Option<ManagedHost>;

    fn find_discovered(&self, name: &str) -> Option<DiscoveredHost>;

    fn save_discovered(&self, host: &DiscoveredHost) -> DiscoveryResult<()>;

    fn save_managed(&self, host: &ManagedHost) -> DiscoveryResult<()>;

    /// Replaces the discovered record sharing `host.id` with `host`.
    fn promote(&self, host: &ManagedHost, token: Option<BuildToken>) -> DiscoveryResult<()>;

    /// Replaces the facts of a stored host. Returns `false` if it is unknown.
    fn update_facts(&self, id: HostId, facts: &FactSet) -> bool;

    fn delete_discovered(&self, name: &str) -> bool;

    /// Discovered hosts visible within `scope`, ordered by name.
    fn discovered(&self, scope: &ScopeContext) -> Vec<DiscoveredHost>;

    fn token_for(&self, id: HostId) -> Option<BuildToken>;
}

/// Read access to organizations and locations.
pub trait TaxonomyRepository: Send + Sync {
    /// Exact match on the full title (`parent/child`) first, then on the name.
    fn find_taxonomy(&self, kind: TaxonomyKind, name: &str) -> Option<Taxonomy>;

    fn taxonomy(&self, id: TaxonomyId) -> Option<Taxonomy>;

    fn enabled(&self, kind: TaxonomyKind) -> bool;
}
