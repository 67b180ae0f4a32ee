//! # Genesis Loader Service
//!
//! Application service sequencing validation, transaction construction,
//! round-graph construction and the atomic commit.
//!
//! ## Flow
//!
//! 1. Validate the manifest; derive the network id and this node's id
//! 2. Compare against the stored network marker (mismatch is fatal)
//! 3. Skip if a genesis is already committed
//! 4. Build and commit `{rounds, snapshots, transactions, marker}` at once

use std::path::Path;
use std::sync::Arc;

use shared_crypto::{Address, Hash};
use tracing::{debug, info, warn};

use crate::algorithms::{GenesisValidator, RoundGraphBuilder, StealthTransactionFactory};
use crate::domain::{
    Genesis, GenesisError, GenesisOutcome, NetworkId, NetworkState, StorageError,
    TopologicalCounter, STATE_KEY_NETWORK,
};
use crate::ports::{GenesisBatch, GenesisLoaderApi, GenesisStore};

/// Genesis Loader - applies a genesis manifest to a store exactly once.
pub struct GenesisLoader<S: GenesisStore> {
    /// Storage port.
    store: S,
    /// This node's signer identity.
    signer: Address,
    /// Snapshot order source.
    counter: Arc<TopologicalCounter>,
}

impl<S: GenesisStore> GenesisLoader<S> {
    /// Loader with its own counter starting at zero.
    pub fn new(store: S, signer: Address) -> Self {
        Self::with_counter(store, signer, Arc::new(TopologicalCounter::default()))
    }

    /// Loader drawing snapshot orders from a shared counter.
    pub fn with_counter(store: S, signer: Address, counter: Arc<TopologicalCounter>) -> Self {
        Self {
            store,
            signer,
            counter,
        }
    }

    /// Storage port.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot order source.
    pub fn counter(&self) -> &Arc<TopologicalCounter> {
        &self.counter
    }

    /// Apply an already validated genesis.
    pub fn apply(&self, genesis: &Genesis) -> Result<GenesisOutcome, GenesisError> {
        let network_id = genesis.network_id();
        let id_for_network = self.signer.hash().for_network(&network_id);
        let mut outcome = GenesisOutcome {
            network_id,
            id_for_network,
            applied: false,
        };

        info!(
            network_id = %network_id,
            node_id = %id_for_network,
            nodes = genesis.nodes().len(),
            "[qc-18] Genesis manifest accepted"
        );
        if !genesis.nodes().iter().any(|n| n.signer == self.signer) {
            debug!(node_id = %id_for_network, "[qc-18] Local signer is not a genesis node");
        }

        let stored = self.stored_network()?;
        if let Some(stored) = stored {
            Self::ensure_same_network(stored, network_id)?;
        }

        if self.store.check_genesis_load()? {
            if stored.is_none() {
                self.store
                    .state_set(STATE_KEY_NETWORK, &NetworkState { id: network_id }.encode())?;
                warn!(network_id = %network_id, "[qc-18] Network marker missing, back-filled");
            }
            info!(network_id = %network_id, "[qc-18] Genesis already loaded");
            return Ok(outcome);
        }

        let transactions = StealthTransactionFactory::new(genesis)?.build()?;
        let graph = RoundGraphBuilder::new(genesis, &self.counter).build(&transactions)?;
        let batch = GenesisBatch {
            rounds: graph.rounds,
            snapshots: graph.snapshots,
            transactions: transactions.into_vec(),
            state: vec![(
                STATE_KEY_NETWORK.to_string(),
                NetworkState { id: network_id }.encode(),
            )],
        };
        let (rounds, snapshots, txs) = (
            batch.rounds.len(),
            batch.snapshots.len(),
            batch.transactions.len(),
        );

        match self.store.load_genesis(batch) {
            Ok(()) => {
                outcome.applied = true;
                info!(
                    network_id = %network_id,
                    rounds,
                    snapshots,
                    transactions = txs,
                    "[qc-18] Genesis committed"
                );
                Ok(outcome)
            }
            Err(StorageError::GenesisAlreadyLoaded) => {
                // Another process won the commit; accept it only for our network.
                match self.stored_network()? {
                    Some(stored) => {
                        Self::ensure_same_network(stored, network_id)?;
                        info!(network_id = %network_id, "[qc-18] Genesis committed concurrently");
                        Ok(outcome)
                    }
                    None => Err(StorageError::GenesisAlreadyLoaded.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn stored_network(&self) -> Result<Option<NetworkId>, GenesisError> {
        match self.store.state_get(STATE_KEY_NETWORK)? {
            Some(bytes) => Ok(Some(NetworkState::decode(&bytes)?.id)),
            None => Ok(None),
        }
    }

    fn ensure_same_network(stored: Hash, computed: NetworkId) -> Result<(), GenesisError> {
        if stored != computed {
            return Err(GenesisError::NetworkIdentityMismatch { stored, computed });
        }
        Ok(())
    }
}

impl<S: GenesisStore> GenesisLoaderApi for GenesisLoader<S> {
    fn load_genesis(&self, manifest: &[u8]) -> Result<GenesisOutcome, GenesisError> {
        let genesis = GenesisValidator::parse(manifest)?;
        self.apply(&genesis)
    }

    fn load_genesis_file(&self, path: &Path) -> Result<GenesisOutcome, GenesisError> {
        info!(path = %path.display(), "[qc-18] Loading genesis manifest");
        let genesis = GenesisValidator::load(path)?;
        self.apply(&genesis)
    }
}
