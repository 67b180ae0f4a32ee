//! # Node Runtime Library
//!
//! This library exposes the internal modules of the node runtime for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (from env)
//! 2. Install logging
//! 3. Open the ledger store in the data directory
//! 4. Apply the genesis manifest (no-op if already applied)

#![warn(missing_docs)]

pub mod container;
pub mod genesis;

pub use container::{ConfigError, NodeConfig, NodeContainer};
pub use genesis::initialize_genesis;
