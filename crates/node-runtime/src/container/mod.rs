//! # Node Container
//!
//! Holds the node configuration and the services built from it.

pub mod config;

pub use config::{ConfigError, NodeConfig, StorageConfig};

use std::sync::Arc;

use qc_18_genesis::{FileGenesisStore, GenesisLoader, StorageError};
use tracing::info;

/// Genesis loader backed by the on-disk ledger.
pub type NodeGenesisLoader = GenesisLoader<Arc<FileGenesisStore>>;

/// Initialized node services.
pub struct NodeContainer {
    /// Configuration the container was built from.
    pub config: NodeConfig,
    /// Ledger store in `config.storage.data_dir`.
    pub store: Arc<FileGenesisStore>,
    /// Genesis loader bound to the local signer.
    pub genesis: NodeGenesisLoader,
}

impl NodeContainer {
    /// Open the ledger store and wire the genesis loader.
    pub fn new(config: NodeConfig) -> Result<Self, StorageError> {
        let store = Arc::new(FileGenesisStore::open(&config.storage.data_dir)?);
        let genesis = GenesisLoader::new(Arc::clone(&store), config.signer);
        info!(
            signer = %config.signer,
            data_dir = %config.storage.data_dir.display(),
            "Node container initialized"
        );

        Ok(Self {
            config,
            store,
            genesis,
        })
    }
}
