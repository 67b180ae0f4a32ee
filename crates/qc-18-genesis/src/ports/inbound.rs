//! # Inbound Ports
//!
//! API trait defining what Genesis Bootstrap can do.

use std::path::Path;

use crate::domain::{GenesisError, GenesisOutcome};

/// Genesis loader API - inbound port.
pub trait GenesisLoaderApi {
    /// Validate `manifest` and apply it to the store unless already applied.
    ///
    /// Idempotent for the same manifest. Fails with
    /// [`GenesisError::NetworkIdentityMismatch`] before any write if the store
    /// belongs to another network.
    fn load_genesis(&self, manifest: &[u8]) -> Result<GenesisOutcome, GenesisError>;

    /// Read the manifest at `path`, then [`load_genesis`](Self::load_genesis).
    fn load_genesis_file(&self, path: &Path) -> Result<GenesisOutcome, GenesisError>;
}
