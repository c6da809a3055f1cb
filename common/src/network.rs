//! # Network Models
//!
//! * [`mac`]: MAC address parsing and canonical formatting.
//! * [`nic`]: Network interfaces attached to hosts.
//! * [`subnet`]: Subnets and their taxonomy associations.

pub mod mac;
pub mod nic;
pub mod subnet;
