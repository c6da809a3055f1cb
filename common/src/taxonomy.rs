//! # Taxonomy
//!
//! Organizations and locations form two independent trees used to scope
//! visibility of hosts and to default their placement.

use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxonomyId(pub u64);

impl fmt::Display for TaxonomyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyKind {
    Organization,
    Location,
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxonomyKind::Organization => write!(f, "organization"),
            TaxonomyKind::Location => write!(f, "location"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    pub id: TaxonomyId,
    pub kind: TaxonomyKind,
    pub name: String,
    pub parent: Option<TaxonomyId>,
    /// Ancestor names and own name joined with `/`, e.g. `org/suborg`.
    pub title: String,
}

/// Visibility granted to a single request.
///
/// `None` on a dimension means unrestricted (administrators). A restricted
/// dimension only shows hosts assigned to one of the permitted taxonomies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeContext {
    pub organizations: Option<BTreeSet<TaxonomyId>>,
    pub locations: Option<BTreeSet<TaxonomyId>>,
}

impl ScopeContext {
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn for_organizations(ids: impl IntoIterator<Item = TaxonomyId>) -> Self {
        Self {
            organizations: Some(ids.into_iter().collect()),
            locations: None,
        }
    }

    pub fn with_locations(mut self, ids: impl IntoIterator<Item = TaxonomyId>) -> Self {
        self.locations = Some(ids.into_iter().collect());
        self
    }

    pub fn permits(&self, organization: Option<TaxonomyId>, location: Option<TaxonomyId>) -> bool {
        permits(&self.organizations, organization) && permits(&self.locations, location)
    }
}

fn permits(allowed: &Option<BTreeSet<TaxonomyId>>, assigned: Option<TaxonomyId>) -> bool {
    match (allowed, assigned) {
        (None, _) => true,
        (Some(set), Some(id)) => set.contains(&id),
        (Some(_), None) => false,
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
