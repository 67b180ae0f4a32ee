//! # Node Configuration
//!
//! Runtime parameters for the node.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QC_NODE_SIGNER` | required | This node's signer address |
//! | `QC_DATA_DIR` | `./data` | Ledger data directory |
//! | `QC_CONFIG_DIR` | `./config` | Directory holding `genesis.json` |

use std::path::PathBuf;
use std::str::FromStr;

use qc_18_genesis::GenesisConfig;
use shared_crypto::{Address, CryptoError};
use thiserror::Error;

/// Default ledger data directory.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// This node's signer identity.
    pub signer: Address,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Genesis manifest location.
    pub genesis: GenesisConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Data directory for the ledger.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No signer address configured.
    #[error("QC_NODE_SIGNER is not set")]
    MissingSigner,

    /// Signer address does not parse.
    #[error("QC_NODE_SIGNER is invalid: {0}")]
    InvalidSigner(#[source] CryptoError),
}

impl NodeConfig {
    /// Configuration with explicit directories.
    pub fn new(
        signer: Address,
        data_dir: impl Into<PathBuf>,
        config_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            signer,
            storage: StorageConfig {
                data_dir: data_dir.into(),
            },
            genesis: GenesisConfig::for_dir(config_dir),
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signer = lookup("QC_NODE_SIGNER").ok_or(ConfigError::MissingSigner)?;
        let signer = Address::from_str(signer.trim()).map_err(ConfigError::InvalidSigner)?;

        let storage = lookup("QC_DATA_DIR")
            .map(|dir| StorageConfig {
                data_dir: PathBuf::from(dir),
            })
            .unwrap_or_default();
        let genesis = GenesisConfig::from_lookup(&lookup);

        Ok(Self {
            signer,
            storage,
            genesis,
        })
    }
}
