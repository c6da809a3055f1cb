use std::str::FromStr;

use pnet::util::MacAddr;

/// Parses a MAC address written as six hex octets.
///
/// Octets may be separated by `:` or `-` and use either case. Anything else
/// (short octets, infiniband-length addresses, free text) is rejected.
pub fn parse_mac(raw: &str) -> Option<MacAddr> {
    let raw = raw.trim();
    let octets: Vec<&str> = raw.split([':', '-']).collect();
    let well_formed = octets.len() == 6
        && octets
            .iter()
            .all(|octet| octet.len() == 2 && octet.chars().all(|c| c.is_ascii_hexdigit()));
    if !well_formed {
        return None;
    }

    MacAddr::from_str(&octets.join(":")).ok()
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
    fn parse_mac_lowercases_and_uses_colons() {
        let mac = parse_mac("E4:1F:13:CC:36:5A").unwrap();
        assert_eq!(mac.to_string(), "e4:1f:13:cc:36:5a");

        let mac = parse_mac("e4-1f-13-cc-36-58").unwrap();
        assert_eq!(mac.to_string(), "e4:1f:13:cc:36:58");
    }

    #[test]
    fn parse_mac_rejects_malformed_values() {
        assert!(parse_mac("Santiago").is_none());
        assert!(parse_mac("").is_none());
        assert!(parse_mac("e4:1f:13:cc:36").is_none());
        assert!(parse_mac("e:1f:13:cc:36:58").is_none());
        assert!(parse_mac("g4:1f:13:cc:36:58").is_none());
        assert!(parse_mac("e4:1f:13:cc:36:58:00").is_none());
    }

    #[test]
    fn parse_mac_trims_whitespace() {
        assert_eq!(
            parse_mac("  90:B1:1C:54:D5:82\n").map(|m| m.to_string()),
            Some("90:b1:1c:54:d5:82".to_string())
        );
    }
}
