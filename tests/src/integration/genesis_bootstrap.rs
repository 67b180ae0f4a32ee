//! # Genesis Bootstrap Flows
//!
//! End-to-end genesis loading against the file-backed store:
//!
//! 1. **Fresh ledger**: one atomic commit of transactions, snapshots, rounds
//!    and the network marker
//! 2. **Restart**: the same manifest is a no-op
//! 3. **Foreign ledger**: a different manifest is refused before any write
//! 4. **Concurrent start**: two handles on one data directory commit once

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use qc_18_genesis::test_utils::{manifest_bytes, manifest_json, signer_address, FIXTURE_EPOCH};
    use qc_18_genesis::{
        invariant_single_reference_cycle, invariant_topological_order, FileGenesisStore,
        GenesisError, GenesisLoader, GenesisLoaderApi, GenesisStore, GenesisValidator,
        NetworkState, STATE_KEY_NETWORK,
    };
    use shared_crypto::Hash;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn file_loader(dir: &std::path::Path, signer: usize) -> GenesisLoader<Arc<FileGenesisStore>> {
        let store = Arc::new(FileGenesisStore::open(dir).unwrap());
        GenesisLoader::new(store, signer_address(signer))
    }

    fn other_manifest() -> Vec<u8> {
        let mut manifest = manifest_json(7);
        manifest["epoch"] = serde_json::json!(FIXTURE_EPOCH + 86_400);
        manifest.to_string().into_bytes()
    }

    // =============================================================================
    // FRESH LEDGER
    // =============================================================================

    #[test]
    fn test_seven_node_genesis_commits_full_graph() {
        let dir = tempfile::tempdir().unwrap();
        let loader = file_loader(dir.path(), 0);

        let outcome = loader.load_genesis(&manifest_bytes(7)).unwrap();
        assert!(outcome.applied);
        assert_eq!(
            outcome.id_for_network,
            signer_address(0).hash().for_network(&outcome.network_id)
        );

        let store = loader.store();
        let transactions = store.read_transactions().unwrap();
        let snapshots = store.read_snapshots().unwrap();
        let rounds = store.read_rounds().unwrap();
        assert_eq!(transactions.len(), 8);
        assert_eq!(snapshots.len(), 8);
        assert_eq!(rounds.len(), 14);

        // Orders are 0..8 with the domain snapshot last.
        assert!(invariant_topological_order(&snapshots));
        let orders: Vec<u64> = snapshots.iter().map(|s| s.topological_order).collect();
        assert_eq!(orders, (0..8).collect::<Vec<_>>());
        let epoch_ns = FIXTURE_EPOCH * 1_000_000_000;
        assert!(snapshots[..7].iter().all(|s| s.snapshot.timestamp == epoch_ns));
        assert_eq!(snapshots[7].snapshot.timestamp, epoch_ns + 1);

        // Every snapshot points at a committed transaction.
        let tx_hashes: HashSet<Hash> = transactions
            .iter()
            .map(|tx| tx.payload_hash().unwrap())
            .collect();
        assert!(snapshots
            .iter()
            .all(|s| tx_hashes.contains(&s.snapshot.transaction)));

        assert!(invariant_single_reference_cycle(&rounds));
        assert_eq!(
            store.state_get(STATE_KEY_NETWORK).unwrap(),
            Some(NetworkState { id: outcome.network_id }.encode())
        );
    }

    #[test]
    fn test_round_one_references_next_node_round_zero() {
        let dir = tempfile::tempdir().unwrap();
        let loader = file_loader(dir.path(), 0);
        loader.load_genesis(&manifest_bytes(9)).unwrap();

        let genesis = GenesisValidator::parse(&manifest_bytes(9)).unwrap();
        let ids = genesis.node_ids();
        let rounds = loader.store().read_rounds().unwrap();

        for (i, id) in ids.iter().enumerate() {
            let own_zero = rounds
                .iter()
                .find(|r| r.node_id == *id && r.number == 0)
                .unwrap();
            let own_one = rounds
                .iter()
                .find(|r| r.node_id == *id && r.number == 1)
                .unwrap();
            let next = &ids[(i + 1) % ids.len()];
            let next_zero = rounds
                .iter()
                .find(|r| r.node_id == *next && r.number == 0)
                .unwrap();

            assert_eq!(own_zero.references, None);
            assert_eq!(own_one.hash, *id);
            assert_eq!(own_one.timestamp, 0);
            let link = own_one.references.as_ref().unwrap();
            assert_eq!(link.self_hash, own_zero.hash);
            assert_eq!(link.external, next_zero.hash);
        }
    }

    #[test]
    fn test_earlier_handle_reads_committed_graph() {
        let dir = tempfile::tempdir().unwrap();
        let reader = FileGenesisStore::open(dir.path()).unwrap();
        assert!(reader.read_snapshots().unwrap().is_empty());

        file_loader(dir.path(), 1)
            .load_genesis(&manifest_bytes(7))
            .unwrap();

        assert_eq!(reader.read_snapshots().unwrap().len(), 8);
        assert_eq!(reader.read_transactions().unwrap().len(), 8);
        assert_eq!(reader.read_rounds().unwrap().len(), 14);
    }

    // =============================================================================
    // RESTART
    // =============================================================================

    #[test]
    fn test_reload_after_restart_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let first = file_loader(dir.path(), 0)
            .load_genesis(&manifest_bytes(7))
            .unwrap();
        let before = std::fs::read(dir.path().join(qc_18_genesis::adapters::LEDGER_FILE)).unwrap();

        let restarted = file_loader(dir.path(), 0);
        let second = restarted.load_genesis(&manifest_bytes(7)).unwrap();

        assert!(first.applied);
        assert!(!second.applied);
        assert_eq!(first.network_id, second.network_id);
        let after = std::fs::read(dir.path().join(qc_18_genesis::adapters::LEDGER_FILE)).unwrap();
        assert_eq!(before, after);
    }

    // =============================================================================
    // FOREIGN LEDGER
    // =============================================================================

    #[test]
    fn test_foreign_ledger_refused_before_write() {
        let dir = tempfile::tempdir().unwrap();
        let original = file_loader(dir.path(), 0)
            .load_genesis(&manifest_bytes(7))
            .unwrap();

        let loader = file_loader(dir.path(), 0);
        let err = loader.load_genesis(&other_manifest()).unwrap_err();
        match err {
            GenesisError::NetworkIdentityMismatch { stored, computed } => {
                assert_eq!(stored, original.network_id);
                assert_ne!(computed, original.network_id);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(loader.store().read_snapshots().unwrap().len(), 8);
    }

    #[test]
    fn test_invalid_manifest_leaves_ledger_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loader = file_loader(dir.path(), 0);

        assert!(matches!(
            loader.load_genesis(&manifest_bytes(6)),
            Err(GenesisError::Policy(_))
        ));
        assert!(!loader.store().check_genesis_load().unwrap());
        assert_eq!(loader.store().state_get(STATE_KEY_NETWORK).unwrap(), None);
    }

    // =============================================================================
    // CONCURRENT START
    // =============================================================================

    #[test]
    fn test_concurrent_loaders_commit_once() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = manifest_bytes(7);

        let outcomes: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|signer| {
                    let path = dir.path();
                    let manifest = &manifest;
                    scope.spawn(move || file_loader(path, signer).load_genesis(manifest))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let outcomes: Vec<_> = outcomes.into_iter().map(Result::unwrap).collect();
        assert_eq!(outcomes.iter().filter(|o| o.applied).count(), 1);
        assert!(outcomes
            .iter()
            .all(|o| o.network_id == outcomes[0].network_id));

        let store = FileGenesisStore::open(dir.path()).unwrap();
        assert_eq!(store.read_snapshots().unwrap().len(), 8);
        assert_eq!(store.read_rounds().unwrap().len(), 14);
    }
}
