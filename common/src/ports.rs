//! # Ports
//!
//! Traits the discovery core depends on. Implementations live outside the
//! core (in-memory adapters in `intake-core`, test doubles in the tests).
//!
//! * [`inventory`]: host persistence and taxonomy lookups.
//! * [`subnets`]: IP to subnet resolution.
//! * [`inspection`]: live fact retrieval from a discovered node.
//! * [`provisioning`]: boot configuration entries keyed by MAC.

pub mod inspection;
pub mod inventory;
pub mod provisioning;
pub mod subnets;
