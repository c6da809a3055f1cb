//! # Configuration
//!
//! [`Settings`] holds every discovery setting as a typed field with a
//! documented default. [`Config`] is the TOML file the binary starts from: the
//! settings plus the taxonomy, subnets and node inspection parameters used to
//! seed the in-memory adapters.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::facts::BOOTIF_FACT;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "INTAKE_CONFIG";
/// File looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_PATH: &str = "intake.toml";

/// Ordered candidate fact names.
///
/// Configured as a single name, a comma-separated string, or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FactNamesRepr")]
pub struct FactNames(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum FactNamesRepr {
    One(String),
    Many(Vec<String>),
}

impl From<FactNamesRepr> for FactNames {
    fn from(repr: FactNamesRepr) -> Self {
        match repr {
            FactNamesRepr::One(names) => FactNames::from(names.as_str()),
            FactNamesRepr::Many(names) => names.into_iter().collect(),
        }
    }
}

impl FactNames {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The configured names, or `fallback` alone when none are configured.
    pub fn or_fallback(&self, fallback: &str) -> Cow<'_, [String]> {
        if self.0.is_empty() {
            Cow::Owned(vec![fallback.to_string()])
        } else {
            Cow::Borrowed(&self.0)
        }
    }
}

impl From<&str> for FactNames {
    fn from(names: &str) -> Self {
        names.split(',').collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for FactNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|name| name.as_ref().trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
        )
    }
}

impl fmt::Display for FactNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Facts tried, in order, as the source of the host name.
    pub discovery_hostname: FactNames,
    /// Facts tried, in order, as the source of the primary MAC.
    pub discovery_fact: FactNames,
    /// Prepended to the host name before normalization. May be empty.
    pub discovery_prefix: String,
    /// Organization assigned when no fact overrides it.
    pub discovery_organization: Option<String>,
    /// Location assigned when no fact overrides it.
    pub discovery_location: Option<String>,
    /// Lock new hosts into the discovery image through their PXE configuration.
    pub discovery_lock: bool,
    /// Drop non-discovery facts when a host is converted to managed.
    pub discovery_clean_facts: bool,
    /// Facts starting with this prefix survive the cleanup.
    pub discovery_fact_prefix: String,
    /// Fact overriding the organization.
    pub organization_fact: String,
    /// Fact overriding the location.
    pub location_fact: String,
    /// Build token lifetime in minutes. `0` disables tokens.
    pub token_duration: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            discovery_hostname: FactNames::from(BOOTIF_FACT),
            discovery_fact: FactNames::from(BOOTIF_FACT),
            discovery_prefix: "mac".to_string(),
            discovery_organization: None,
            discovery_location: None,
            discovery_lock: false,
            discovery_clean_facts: false,
            discovery_fact_prefix: "discovery_".to_string(),
            organization_fact: "foreman_organization".to_string(),
            location_fact: "foreman_location".to_string(),
            token_duration: 360,
        }
    }
}

impl Settings {
    /// Hostname candidates. An empty setting falls back to the boot interface fact.
    pub fn hostname_facts(&self) -> Cow<'_, [String]> {
        self.discovery_hostname.or_fallback(BOOTIF_FACT)
    }

    /// MAC candidates. An empty setting falls back to the boot interface fact.
    pub fn mac_facts(&self) -> Cow<'_, [String]> {
        self.discovery_fact.or_fallback(BOOTIF_FACT)
    }

    pub fn token_validity(&self) -> Option<time::Duration> {
        (self.token_duration > 0).then(|| time::Duration::minutes(i64::from(self.token_duration)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    pub organizations_enabled: bool,
    pub locations_enabled: bool,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            organizations_enabled: true,
            locations_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetEntry {
    pub name: String,
    /// CIDR notation, e.g. `10.35.27.0/24`.
    pub network: String,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub tftp: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionConfig {
    /// Port of the inventory API exposed by the discovery image.
    pub port: u16,
    pub timeout_secs: u64,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            port: 8448,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: Settings,
    pub taxonomy: TaxonomyConfig,
    pub organizations: Vec<TaxonomyEntry>,
    pub locations: Vec<TaxonomyEntry>,
    pub subnets: Vec<SubnetEntry>,
    pub inspection: InspectionConfig,
}

impl Config {
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("invalid configuration")
    }

    /// Loads the configuration from `path`, then `$INTAKE_CONFIG`, then
    /// `./intake.toml`. Falls back to defaults when none of them exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let candidate: Option<PathBuf> = match path {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV)
                .map(PathBuf::from)
                .or_else(|| {
                    let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                    default.exists().then_some(default)
                }),
        };

        let Some(path) = candidate else {
            debug!("No configuration file found, using defaults");
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml(&raw).with_context(|| format!("parsing configuration {}", path.display()))
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
