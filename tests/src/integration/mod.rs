//! # Integration Tests
//!
//! Genesis bootstrap exercised through the on-disk store and the node
//! runtime wiring.

pub mod genesis_bootstrap;
pub mod node_startup;
