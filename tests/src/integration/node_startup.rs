//! # Node Startup Flow
//!
//! Drives the node runtime's bootstrap the way `main` does: configuration
//! from environment-style variables, container wiring, then genesis.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use node_runtime::{initialize_genesis, NodeConfig, NodeContainer};
    use qc_18_genesis::test_utils::{manifest_bytes, signer_address};
    use qc_18_genesis::{GenesisStore, STATE_KEY_NETWORK};

    fn config_for(dir: &std::path::Path, signer: usize) -> NodeConfig {
        let vars: HashMap<&str, String> = [
            ("QC_NODE_SIGNER", signer_address(signer).to_string()),
            ("QC_DATA_DIR", dir.join("data").display().to_string()),
            ("QC_CONFIG_DIR", dir.display().to_string()),
        ]
        .into_iter()
        .collect();
        NodeConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_node_bootstraps_then_restarts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("genesis.json"), manifest_bytes(7)).unwrap();

        let first = {
            let container = NodeContainer::new(config_for(dir.path(), 3)).unwrap();
            initialize_genesis(&container).unwrap()
        };
        assert!(first.applied);
        assert_eq!(
            first.id_for_network,
            signer_address(3).hash().for_network(&first.network_id)
        );

        let container = NodeContainer::new(config_for(dir.path(), 3)).unwrap();
        let second = initialize_genesis(&container).unwrap();
        assert!(!second.applied);
        assert_eq!(
            container.store.state_get(STATE_KEY_NETWORK).unwrap(),
            Some(first.network_id.as_bytes().to_vec())
        );
    }

    #[test]
    fn test_node_refuses_changed_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("genesis.json"), manifest_bytes(7)).unwrap();
        let container = NodeContainer::new(config_for(dir.path(), 0)).unwrap();
        initialize_genesis(&container).unwrap();

        std::fs::write(dir.path().join("genesis.json"), manifest_bytes(8)).unwrap();
        let err = initialize_genesis(&container).unwrap_err();
        assert!(format!("{err:#}").contains("genesis.json"));
        assert_eq!(container.store.read_rounds().unwrap().len(), 14);
    }
}
