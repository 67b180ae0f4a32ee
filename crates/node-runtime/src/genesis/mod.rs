//! # Genesis Bootstrap
//!
//! Applies the configured genesis manifest to the node's ledger.
//!
//! Runs once per start. When the ledger already holds this network's
//! genesis nothing is written; a ledger bound to another network stops the
//! node.

use anyhow::{Context, Result};
use qc_18_genesis::{GenesisLoaderApi, GenesisOutcome};
use tracing::info;

use crate::container::NodeContainer;

/// Load the genesis manifest named by the container's configuration.
pub fn initialize_genesis(container: &NodeContainer) -> Result<GenesisOutcome> {
    let manifest = container.config.genesis.manifest_path();
    info!(manifest = %manifest.display(), "Checking genesis...");

    let outcome = container
        .genesis
        .load_genesis_file(&manifest)
        .with_context(|| format!("Failed to load genesis from {}", manifest.display()))?;

    if outcome.applied {
        info!(
            network_id = %outcome.network_id,
            node_id = %outcome.id_for_network,
            "Genesis applied"
        );
    } else {
        info!(network_id = %outcome.network_id, "Genesis already present");
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::NodeConfig;
    use qc_18_genesis::test_utils::{manifest_bytes, signer_address};
    use qc_18_genesis::GenesisStore;

    #[test]
    fn test_initialize_twice() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("genesis.json"), manifest_bytes(7)).unwrap();
        let config = NodeConfig::new(signer_address(2), dir.path().join("data"), dir.path());
        let container = NodeContainer::new(config).unwrap();

        let first = initialize_genesis(&container).unwrap();
        assert!(first.applied);
        let second = initialize_genesis(&container).unwrap();
        assert!(!second.applied);
        assert_eq!(first.network_id, second.network_id);
        assert_eq!(container.store.read_rounds().unwrap().len(), 14);
    }

    #[test]
    fn test_missing_manifest_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = NodeConfig::new(signer_address(2), dir.path().join("data"), dir.path());
        let container = NodeContainer::new(config).unwrap();

        let err = initialize_genesis(&container).unwrap_err();
        assert!(format!("{err:#}").contains("genesis.json"));
        assert!(!container.store.check_genesis_load().unwrap());
    }
}
