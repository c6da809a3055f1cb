#![cfg(test)]
use intake_common::config::{Config, FactNames, Settings};
use intake_common::error::DiscoveryError;
use intake_common::host::{DiscoveredHost, HasInterfaces, Hostname, ManagedHost};
use intake_common::ports::inventory::HostRepository;
use intake_common::ports::provisioning::PxeKind;
use intake_common::taxonomy::{ScopeContext, TaxonomyKind};
use std::net::{IpAddr, Ipv4Addr};

use crate::support::{FIXTURE_MAC, FIXTURE_NAME, StubInspector, World, fixture_facts, fixture_with};

fn fixture_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 35, 27, 3))
}

#[test]
fn imports_fixture_as_discovered_host() {
    let world = World::new();
    let host = world.service(Settings::default()).import(&fixture_facts()).unwrap();

    assert_eq!(host.name, FIXTURE_NAME);
    assert_eq!(host.mac(), Some(FIXTURE_MAC));
    assert_eq!(host.ip(), Some(fixture_ip()));
    assert_eq!(host.primary_interface().unwrap().identifier.as_deref(), Some("eth0"));
    assert!(world.inventory.find_discovered(FIXTURE_NAME).is_some());
}

#[test]
fn every_fact_is_attached() {
    let world = World::new();
    let host = world.service(Settings::default()).import(&fixture_facts()).unwrap();

    assert_eq!(host.facts, fixture_facts());
    assert_eq!(host.facts.get("os"), Some(r#"{"family":"RedHat","name":"CentOS"}"#));
    assert!(!host.facts.contains("uptime"));
}

#[test]
fn prefix_shapes_the_name() {
    let world = World::new();
    let settings = Settings {
        discovery_prefix: "test".into(),
        ..Settings::default()
    };
    assert_eq!(world.service(settings).import(&fixture_facts()).unwrap().name, "teste41f13cc3658");

    let world = World::new();
    let settings = Settings {
        discovery_prefix: String::new(),
        ..Settings::default()
    };
    assert_eq!(world.service(settings).import(&fixture_facts()).unwrap().name, "e41f13cc3658");
}

#[test]
fn hostname_fact_is_used_but_mac_stays_the_boot_mac() {
    let world = World::new();
    let settings = Settings {
        discovery_hostname: FactNames::from("somefact"),
        ..Settings::default()
    };
    let host = world
        .service(settings)
        .import(&fixture_with(&[("somefact", "somename")]))
        .unwrap();

    assert_eq!(host.name, "macsomename");
    assert_eq!(host.mac(), Some(FIXTURE_MAC));
}

#[test]
fn empty_fact_settings_use_the_boot_interface() {
    let world = World::new();
    let config = Config::from_toml("[settings]\ndiscovery_fact = \"\"\ndiscovery_hostname = []").unwrap();

    let host = world.service(config.settings).import(&fixture_facts()).unwrap();
    assert_eq!(host.name, FIXTURE_NAME);
    assert_eq!(host.mac(), Some(FIXTURE_MAC));
}

#[test]
fn shared_hostname_fact_cannot_register_two_machines() {
    let world = World::new();
    let settings = Settings {
        discovery_hostname: FactNames::from("hostname"),
        ..Settings::default()
    };
    let service = world.service(settings);
    let first = service.import(&fixture_facts()).unwrap();

    let err = service
        .import(&fixture_with(&[("discovery_bootif", "52:54:00:aa:bb:cc")]))
        .unwrap_err();
    assert_eq!(
        err,
        DiscoveryError::NameTaken {
            name: first.name.to_string()
        }
    );
    assert_eq!(world.inventory.len(), 1);
    assert_eq!(
        world.inventory.find_discovered(first.name.as_str()).map(|h| h.id),
        Some(first.id)
    );
}

#[test]
fn managed_host_blocks_discovery() {
    let world = World::new();
    world.inventory.save_managed(&ManagedHost::new("web01.example.com", FIXTURE_MAC)).unwrap();

    let err = world.service(Settings::default()).import(&fixture_facts()).unwrap_err();
    assert!(matches!(err, DiscoveryError::AlreadyManaged { .. }));
    assert!(err.to_string().starts_with("Host already exists as managed"));
    assert!(world.inventory.find_discovered(FIXTURE_NAME).is_none());
}

#[test]
fn rediscovery_returns_existing_host() {
    let world = World::new();
    let existing = DiscoveredHost::new(Hostname::parse("xyz").unwrap(), FIXTURE_MAC);
    world.inventory.save_discovered(&existing).unwrap();

    let host = world.service(Settings::default()).import(&fixture_facts()).unwrap();
    assert_eq!(host.name, "xyz");
    assert_eq!(host.id, existing.id);
    assert_eq!(world.inventory.len(), 1);
}

#[test]
fn identity_failures_carry_their_message() {
    let world = World::new();

    let settings = Settings {
        discovery_hostname: FactNames::from("macaddress_foo"),
        ..Settings::default()
    };
    let err = world.service(settings).import(&fixture_facts()).unwrap_err();
    assert!(err.to_string().starts_with(
        "Invalid facts: hash does not contain a valid value for any of the facts in the discovery_hostname setting:"
    ));

    let settings = Settings {
        discovery_hostname: FactNames::from("invalidhostnamefact"),
        discovery_prefix: String::new(),
        ..Settings::default()
    };
    let err = world
        .service(settings)
        .import(&fixture_with(&[("invalidhostnamefact", "...")]))
        .unwrap_err();
    assert!(err.to_string().contains("Invalid hostname: Could not normalize the hostname"));

    let settings = Settings {
        discovery_fact: FactNames::from("macaddress_foo"),
        ..Settings::default()
    };
    let err = world.service(settings).import(&fixture_facts()).unwrap_err();
    assert!(err.to_string().contains("Expected discovery_fact 'macaddress_foo' is missing"));

    let settings = Settings {
        discovery_fact: FactNames::from("lsbdistcodename"),
        ..Settings::default()
    };
    let err = world.service(settings).import(&fixture_facts()).unwrap_err();
    assert!(err.to_string().contains("Unable to detect primary interface using MAC"));

    assert!(world.inventory.is_empty());
}

#[test]
fn fixture_address_selects_subnet() {
    let world = World::new();
    let org = world.organization("Organization 1");
    let loc = world.location("Location 1");
    world.subnet99(&[&org], &[&loc], false);

    let host = world.service(Settings::default()).import(&fixture_facts()).unwrap();
    assert_eq!(world.subnet_name(&host).as_deref(), Some("Subnet99"));
    assert_eq!(host.organization, Some(org.id));
    assert_eq!(host.location, Some(loc.id));
}

#[test]
fn settings_and_facts_take_precedence_over_subnet() {
    let world = World::new();
    let subnet_org = world.organization("subnet_org");
    let subnet_loc = world.location("subnet_loc");
    let setting_org = world.organization("setting_org");
    let fact_loc = world.location("fact_loc");
    world.subnet99(&[&subnet_org], &[&subnet_loc], false);

    let settings = Settings {
        discovery_organization: Some("setting_org".into()),
        discovery_location: Some("subnet_loc".into()),
        ..Settings::default()
    };
    let host = world
        .service(settings)
        .import(&fixture_with(&[("foreman_location", "fact_loc")]))
        .unwrap();

    assert_eq!(host.organization, Some(setting_org.id));
    assert_eq!(host.location, Some(fact_loc.id));
}

#[test]
fn nested_taxonomy_is_assigned_as_leaf() {
    let world = World::new();
    let org = world.organization("org");
    let suborg = world
        .inventory
        .add_taxonomy(TaxonomyKind::Organization, "suborg", Some(org.id));
    let loc = world.location("loc");
    let subloc = world
        .inventory
        .add_taxonomy(TaxonomyKind::Location, "subloc", Some(loc.id));
    world.subnet99(&[&suborg], &[&subloc], false);

    let settings = Settings {
        discovery_organization: Some("org/suborg".into()),
        discovery_location: Some("subloc".into()),
        ..Settings::default()
    };
    let host = world.service(settings).import(&fixture_facts()).unwrap();

    assert_eq!(host.organization, Some(suborg.id));
    assert_eq!(host.location, Some(subloc.id));
}

#[test]
fn lock_writes_every_boot_loader_entry() {
    let world = World::new();
    let org = world.organization("Organization 1");
    world.subnet99(&[&org], &[], true);
    let settings = Settings {
        discovery_lock: true,
        ..Settings::default()
    };

    let host = world.service(settings).import(&fixture_facts()).unwrap();

    let entries = world.boot.entries();
    let kinds: Vec<PxeKind> = entries.iter().map(|(kind, _, _)| *kind).collect();
    assert_eq!(kinds, PxeKind::ALL);
    assert!(entries.iter().all(|(_, mac, _)| *mac == FIXTURE_MAC));
    assert!(entries.iter().all(|(_, _, content)| content.contains(FIXTURE_NAME)));
    assert!(world.inventory.find_discovered(host.name.as_str()).is_some());
    assert!(world.inventory.find_managed(host.name.as_str()).is_none());
}

#[test]
fn lock_needs_setting_and_tftp_subnet() {
    let world = World::new();
    world.subnet99(&[], &[], true);
    world.service(Settings::default()).import(&fixture_facts()).unwrap();
    assert!(world.boot.entries().is_empty());

    let world = World::new();
    world.subnet99(&[], &[], false);
    let settings = Settings {
        discovery_lock: true,
        ..Settings::default()
    };
    world.service(settings).import(&fixture_facts()).unwrap();
    assert!(world.boot.entries().is_empty());
}

#[test]
fn listing_is_scoped_by_organization() {
    let world = World::new();
    let orgs = [world.organization("org1"), world.organization("org2"), world.organization("org3")];
    for (idx, org) in orgs.iter().enumerate() {
        let mut host = DiscoveredHost::new(
            Hostname::parse(&format!("host{}", idx + 1)).unwrap(),
            pnet::util::MacAddr(0x52, 0x54, 0, 0, 0, idx as u8),
        );
        host.organization = Some(org.id);
        world.inventory.save_discovered(&host).unwrap();
    }
    let service = world.service(Settings::default());

    let subset = ScopeContext::for_organizations([orgs[0].id, orgs[1].id]);
    let names: Vec<String> = service.discovered(&subset).iter().map(|h| h.name.to_string()).collect();
    assert_eq!(names, ["host1", "host2"]);

    let all = ScopeContext::for_organizations(orgs.iter().map(|o| o.id));
    assert_eq!(service.discovered(&all).len(), 3);
    assert_eq!(service.discovered(&ScopeContext::unrestricted()).len(), 3);
}

#[tokio::test]
async fn facts_can_be_refreshed_from_the_node() {
    let world = World::new();
    let live = fixture_with(&[("memorysize_mb", "7580.00")]);
    let service = world.service_with(Settings::default(), StubInspector(Some(live.clone())));
    let mut host = service.import(&fixture_facts()).unwrap();

    assert!(service.refresh_facts(&mut host).await);
    assert_eq!(
        world.inventory.find_discovered(FIXTURE_NAME).unwrap().facts.get("memorysize_mb"),
        Some("7580.00")
    );
}

#[tokio::test]
async fn unreachable_node_fails_refresh() {
    let world = World::new();
    let service = world.service_with(Settings::default(), StubInspector(None));
    let mut host = service.import(&fixture_facts()).unwrap();

    assert!(!service.refresh_facts(&mut host).await);
    assert_eq!(host.facts, fixture_facts());
}
