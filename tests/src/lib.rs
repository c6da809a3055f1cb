//! End-to-end tests of the discovery pipeline, driven through
//! `DiscoveryService` over a recorded fact upload.

pub mod support;

mod discovery;
mod provisioning;
