//! # Genesis Configuration
//!
//! Where the genesis manifest lives.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default configuration directory.
pub const DEFAULT_CONFIG_DIR: &str = "./config";

/// Default manifest file name.
pub const DEFAULT_MANIFEST_FILE: &str = "genesis.json";

/// Genesis configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Directory holding the manifest.
    pub config_dir: PathBuf,

    /// Manifest file name inside `config_dir`.
    pub manifest_file: String,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
        }
    }
}

impl GenesisConfig {
    /// Create configuration from a variable source such as the environment.
    ///
    /// # Variables
    ///
    /// - `QC_CONFIG_DIR`: Configuration directory (default: ./config)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("QC_CONFIG_DIR")
            .map(Self::for_dir)
            .unwrap_or_default()
    }

    /// Configuration reading the manifest from `config_dir`.
    pub fn for_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            ..Self::default()
        }
    }

    /// Full manifest path.
    pub fn manifest_path(&self) -> PathBuf {
        self.config_dir.join(&self.manifest_file)
    }
}
