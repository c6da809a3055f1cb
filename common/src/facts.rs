//! # Fact Sets
//!
//! A fact is a name/value pair reported by a booted machine (hardware,
//! network and software attributes). Discovery receives them as a flat map of
//! strings; facter output nests and types some values, so they are flattened
//! while parsing.

use std::collections::BTreeMap;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the fact carrying the MAC of the interface the machine booted from.
pub const BOOTIF_FACT: &str = "discovery_bootif";
/// Name of the fact carrying the IP of the boot interface, when reported.
pub const BOOTIP_FACT: &str = "discovery_bootip";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactSet(BTreeMap<String, String>);

impl FactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses facter JSON. Accepts either a flat object or the upload format
    /// `{"facts": {...}}`.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(raw).context("facts are not valid JSON")?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        let Value::Object(mut map) = value else {
            bail!("Invalid facts, must be a JSON object");
        };

        if map.len() == 1 && map.get("facts").is_some_and(Value::is_object) {
            return Self::from_value(map.remove("facts").unwrap_or_default());
        }

        Ok(map
            .into_iter()
            .filter_map(|(name, value)| flatten(value).map(|value| (name, value)))
            .collect())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value of `name` if it is present and not blank.
    pub fn usable(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.trim().is_empty())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn retain(&mut self, keep: impl FnMut(&String, &mut String) -> bool) {
        self.0.retain(keep)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn flatten(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FactSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FactSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for FactSet {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
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
