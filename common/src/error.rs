//! Domain errors raised while turning facts into hosts.
//!
//! Every variant aborts the discovery attempt. Messages name the setting and
//! facts involved so an operator can tell which configuration is at fault.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// None of the candidate facts of a setting carried a usable value.
    #[error(
        "Invalid facts: hash does not contain a valid value for any of the facts in the {setting} setting: {}",
        .candidates.join(", ")
    )]
    MissingFact {
        setting: String,
        candidates: Vec<String>,
    },

    /// A fact required in a specific format is absent.
    #[error(
        "Expected {setting} '{}' is missing, unable to detect primary interface and set hostname",
        .candidates.join(", ")
    )]
    InvalidFactValue {
        setting: String,
        candidates: Vec<String>,
    },

    /// The MAC-bearing fact does not hold a MAC address.
    #[error("Unable to detect primary interface using MAC '{value}' specified by {setting} '{fact}'")]
    NoPrimaryInterface {
        setting: String,
        fact: String,
        value: String,
    },

    #[error("Invalid hostname: Could not normalize the hostname '{raw}'")]
    InvalidHostname { raw: String },

    #[error("Host already exists as managed: {name}/{mac}")]
    AlreadyManaged { name: String, mac: String },

    /// Another discovered host registered the MAC first.
    #[error("Interface with MAC {mac} is already registered to discovered host {owner}")]
    DuplicateMac { mac: String, owner: String },

    /// Host names are unique across discovered and managed hosts.
    #[error("Name '{name}' is already taken by another host")]
    NameTaken { name: String },

    #[error("Discovered host '{name}' not found")]
    HostNotFound { name: String },
}

pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fact_lists_every_candidate() {
        let err = DiscoveryError::MissingFact {
            setting: "discovery_hostname".into(),
            candidates: vec!["macaddress_foo".into(), "hostname".into()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid facts: hash does not contain a valid value for any of the facts in the discovery_hostname setting: macaddress_foo, hostname"
        );
    }

    #[test]
    fn invalid_fact_value_names_the_setting() {
        let err = DiscoveryError::InvalidFactValue {
            setting: "discovery_fact".into(),
            candidates: vec!["macaddress_foo".into()],
        };
        assert!(err.to_string().starts_with("Expected discovery_fact 'macaddress_foo' is missing"));
    }

    #[test]
    fn no_primary_interface_quotes_the_value() {
        let err = DiscoveryError::NoPrimaryInterface {
            setting: "discovery_fact".into(),
            fact: "lsbdistcodename".into(),
            value: "Santiago".into(),
        };
        assert!(err.to_string().contains("Unable to detect primary interface using MAC 'Santiago'"));
        assert!(err.to_string().contains("discovery_fact 'lsbdistcodename'"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiscoveryError>();
    }
}
