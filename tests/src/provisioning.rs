#![cfg(test)]
use intake_common::config::Settings;
use intake_common::error::DiscoveryError;
use intake_common::host::HasInterfaces;
use intake_common::ports::inventory::HostRepository;

use crate::support::{FIXTURE_MAC, FIXTURE_NAME, World, fixture_facts, fixture_with};

fn extra_facts() -> [(&'static str, &'static str); 3] {
    [
        ("delete_me", "content"),
        ("keep_me", "content"),
        ("discovery_keep_me", "content"),
    ]
}

#[test]
fn conversion_alone_issues_no_token() {
    let world = World::new();
    let settings = Settings {
        token_duration: 30,
        discovery_prefix: "123".into(),
        ..Settings::default()
    };
    let service = world.service(settings);
    let host = service.import(&fixture_facts()).unwrap();

    let managed = service.converter().to_managed(host);
    assert_eq!(managed.name, "123e41f13cc3658");
    assert!(service.token_for(managed.id).is_none());
    assert!(world.inventory.find_managed(&managed.name).is_none());
}

#[test]
fn clean_facts_keeps_only_discovery_facts() {
    let world = World::new();
    let settings = Settings {
        discovery_clean_facts: true,
        ..Settings::default()
    };
    let service = world.service(settings);
    let host = service.import(&fixture_with(&extra_facts())).unwrap();

    let converter = service.converter();
    let mut managed = converter.to_managed(host);
    converter.clear_facts(&mut managed);

    assert_eq!(managed.facts.get("delete_me"), None);
    assert_eq!(managed.facts.get("keep_me"), None);
    assert_eq!(managed.facts.get("discovery_keep_me"), Some("content"));
    assert_eq!(managed.facts.get("discovery_bootif"), Some("e4:1f:13:cc:36:58"));
    assert!(managed.facts.iter().all(|(name, _)| name.starts_with("discovery_")));
}

#[test]
fn facts_survive_without_cleanup() {
    let world = World::new();
    let service = world.service(Settings::default());
    let host = service.import(&fixture_with(&extra_facts())).unwrap();
    let count = host.facts.len();

    let converter = service.converter();
    let mut managed = converter.to_managed(host);
    converter.clear_facts(&mut managed);

    assert_eq!(managed.facts.len(), count);
    assert_eq!(managed.facts.get("keep_me"), Some("content"));
    assert_eq!(managed.facts.get("discovery_keep_me"), Some("content"));
}

#[test]
fn boot_interface_is_preserved() {
    let world = World::new();
    let service = world.service(Settings::default());
    let host = service.import(&fixture_facts()).unwrap();
    let discovered_id = host.id;

    let managed = service.converter().to_managed(host);

    let primary = managed.primary_interface().unwrap();
    assert_eq!(primary.mac, FIXTURE_MAC);
    let provision = managed.provision_interface().unwrap();
    assert_eq!(provision.mac, FIXTURE_MAC);
    assert_eq!(provision.host, managed.id);
    assert_eq!(managed.id, discovered_id);
}

#[test]
fn provision_promotes_and_issues_token() {
    let world = World::new();
    let settings = Settings {
        discovery_clean_facts: true,
        token_duration: 30,
        ..Settings::default()
    };
    let service = world.service(settings);
    let host = service.import(&fixture_with(&extra_facts())).unwrap();

    let managed = service.provision(FIXTURE_NAME).unwrap();

    assert_eq!(managed.id, host.id);
    assert!(managed.build);
    assert!(!managed.facts.contains("delete_me"));
    assert!(service.token_for(managed.id).is_some_and(|token| !token.is_expired()));
    assert!(world.inventory.find_discovered(FIXTURE_NAME).is_none());
    assert_eq!(world.inventory.find_managed(FIXTURE_NAME).map(|h| h.id), Some(host.id));

    let err = service.import(&fixture_facts()).unwrap_err();
    assert!(matches!(err, DiscoveryError::AlreadyManaged { .. }));
}

#[test]
fn deleted_host_cannot_be_provisioned() {
    let world = World::new();
    let service = world.service(Settings::default());
    service.import(&fixture_facts()).unwrap();

    assert!(service.delete(FIXTURE_NAME));
    assert!(world.inventory.find_by_primary_mac(FIXTURE_MAC).is_none());
    assert_eq!(
        service.provision(FIXTURE_NAME).unwrap_err(),
        DiscoveryError::HostNotFound {
            name: FIXTURE_NAME.into()
        }
    );
}
