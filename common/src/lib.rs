//! # Intake Common
//!
//! Shared vocabulary of the `intake` workspace: the domain models, the error
//! taxonomy, the typed configuration and the port traits the core depends on.
//!
//! * **[`facts`]**: Fact sets reported by booted machines.
//! * **[`host`]**: Discovered and managed hosts.
//! * **[`network`]**: MAC addresses, interfaces and subnets.
//! * **[`taxonomy`]**: Organizations, locations and request scopes.
//! * **[`config`]**: Settings and the TOML configuration file.
//! * **[`error`]**: Domain errors.
//! * **[`ports`]**: Traits implemented by adapters (inventory, subnets, inspection, boot config).

pub mod config;
pub mod error;
pub mod facts;
pub mod host;
pub mod network;
pub mod ports;
pub mod taxonomy;
