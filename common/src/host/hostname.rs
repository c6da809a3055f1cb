use std::fmt;

use crate::error::{DiscoveryError, DiscoveryResult};

/// Reduces an arbitrary string to a host-name token.
///
/// Every character that is not an ASCII letter or digit is dropped (so the
/// separators `:`, `.`, `-` and `_` disappear rather than being replaced) and
/// the rest is lower-cased. An empty result is an error.
pub fn normalize(raw: &str) -> DiscoveryResult<String> {
    let normalized: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if normalized.is_empty() {
        return Err(DiscoveryError::InvalidHostname { raw: raw.to_string() });
    }
    Ok(normalized)
}

/// A normalized, non-empty host name. Only obtainable through [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hostname(String);

impl Hostname {
    pub fn parse(raw: &str) -> DiscoveryResult<Self> {
        normalize(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn starts_with_letter(&self) -> bool {
        self.0.starts_with(|c: char| c.is_ascii_alphabetic())
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Hostname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Hostname {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Hostname {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_mac_into_hostname() {
        assert_eq!(normalize("90:B1:1C:54:D5:82").unwrap(), "90b11c54d582");
    }

    #[test]
    fn normalize_strips_every_separator() {
        assert_eq!(normalize(".-_Test::Host.name_-.").unwrap(), "testhostname");
    }

    #[test]
    fn normalize_keeps_valid_hostname() {
        assert_eq!(normalize("testhostname").unwrap(), "testhostname");
    }

    #[test]
    fn normalize_drops_non_ascii_and_whitespace() {
        assert_eq!(normalize(" Nöde 01 ").unwrap(), "nde01");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["90:B1:1C:54:D5:82", ".-_Test::Host.name_-.", "macE4-1F", "a b\tc"] {
            let once = normalize(raw).unwrap();
            assert_eq!(normalize(&once).unwrap(), once);
        }
    }

    #[test]
    fn normalize_fails_when_nothing_is_left() {
        let err = normalize(".-_").unwrap_err();
        assert_eq!(err, DiscoveryError::InvalidHostname { raw: ".-_".into() });
        assert!(err.to_string().contains("Invalid hostname: Could not normalize the hostname"));
    }

    #[test]
    fn hostname_reports_leading_digit() {
        assert!(Hostname::parse("mac00").unwrap().starts_with_letter());
        assert!(!Hostname::parse("00:11").unwrap().starts_with_letter());
    }
}
