//! # QC-18 Genesis Bootstrap
//!
//! One-time construction of the ledger's initial state from a genesis
//! manifest.
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Before a node can take part in consensus it needs the genesis pledges and
//! a first round graph. This crate:
//! - validates the manifest and its identities
//! - builds stealth-addressed node and domain pledge transactions
//! - seeds each node's opening round and a reference ring over all nodes
//! - commits the result once, atomically, bound to a network identity
//!
//! ## Guarantees
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | Determinism | Ephemeral secrets derived from public data only |
//! | Exactly once | `check_genesis_load` + atomic `load_genesis` |
//! | Network binding | Stored network marker compared before any write |
//! | Quorum | `[CMP, SUM, ⌊2N/3⌋+1]` script on every pledge |
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-genesis/
//! ├── domain/          # Genesis, rounds, errors, invariants
//! ├── algorithms/      # Validator, stealth factory, round graph
//! ├── ports/           # GenesisLoaderApi, GenesisStore
//! ├── application/     # GenesisLoader
//! └── adapters/        # File-backed store, directory lock
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

/// Deterministic fixtures.
///
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-exports
pub use adapters::{FileGenesisStore, LockError, StoreLock};
pub use algorithms::{
    GenesisTransactions, GenesisValidator, RoundGraph, RoundGraphBuilder, RoundRing,
    StealthTransactionFactory, DOMAIN_ACCEPT_TAG, NODE_ACCEPT_TAG,
};
pub use application::GenesisLoader;
pub use config::GenesisConfig;
pub use domain::{
    invariant_single_reference_cycle, invariant_topological_order, CacheRound, DomainEntry,
    FinalRound, Genesis, GenesisError, GenesisOutcome, KeyRole, NetworkId, NetworkState,
    NodeEntry, PolicyViolation, StorageError, TopologicalCounter, DOMAIN_PLEDGE_AMOUNT,
    MAXIMUM_NODE_COUNT, MINIMUM_NODE_COUNT, NODE_PLEDGE_AMOUNT, STATE_KEY_NETWORK,
};
pub use ports::{GenesisBatch, GenesisLoaderApi, GenesisStore, InMemoryGenesisStore, LedgerImage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
