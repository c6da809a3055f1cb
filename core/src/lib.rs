//! # Intake Core
//!
//! Turns the facts reported by freshly booted machines into inventory
//! records, and later promotes those records to managed hosts.
//!
//! Resolution pipeline, leaf first:
//! * [`facts`]: picks the first usable fact among configured candidates.
//! * [`identity`]: derives the primary MAC and the host name.
//! * [`placement`]: finds the boot address, subnet, organization and location.
//! * [`discovery`]: creates or matches a discovered host.
//! * [`converter`]: promotes a discovered host to a managed one.
//! * [`service`]: wires the above to the inventory and the outside world.
//!
//! Reference adapters for the ports of `intake-common`:
//! [`inventory`], [`subnets`], [`inspection`] and [`boot`].

pub mod boot;
pub mod converter;
pub mod discovery;
pub mod facts;
pub mod identity;
pub mod inspection;
pub mod inventory;
pub mod placement;
pub mod service;
pub mod subnets;

pub use intake_common::host::hostname;
