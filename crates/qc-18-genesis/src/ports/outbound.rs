//! # Outbound Ports (Driven Ports)
//!
//! The durable store Genesis Bootstrap writes through.
//!
//! Production: `FileGenesisStore` (adapters/file_store.rs)
//! Testing: `InMemoryGenesisStore` (below)

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared_types::{Round, SignedTransaction, SnapshotWithTopologicalOrder};

use crate::domain::StorageError;

/// Everything a genesis writes, committed as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenesisBatch {
    /// Opening and linked rounds.
    pub rounds: Vec<Round>,
    /// Ordered snapshots.
    pub snapshots: Vec<SnapshotWithTopologicalOrder>,
    /// Acceptance transactions.
    pub transactions: Vec<SignedTransaction>,
    /// State entries written with the records (the network marker).
    pub state: Vec<(String, Vec<u8>)>,
}

/// Storage interface required by the genesis loader.
///
/// ## Atomicity Guarantee
///
/// [`load_genesis`](Self::load_genesis) applies the whole batch or nothing,
/// and fails with [`StorageError::GenesisAlreadyLoaded`] if a genesis is
/// already present. A crash mid-commit leaves the pre-genesis state.
pub trait GenesisStore: Send + Sync {
    /// Read a state entry.
    fn state_get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write a state entry.
    fn state_set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Whether a genesis has been committed.
    fn check_genesis_load(&self) -> Result<bool, StorageError>;

    /// Commit a genesis atomically.
    fn load_genesis(&self, batch: GenesisBatch) -> Result<(), StorageError>;

    /// Stored rounds.
    fn read_rounds(&self) -> Result<Vec<Round>, StorageError>;

    /// Stored snapshots, in topological order.
    fn read_snapshots(&self) -> Result<Vec<SnapshotWithTopologicalOrder>, StorageError>;

    /// Stored transactions.
    fn read_transactions(&self) -> Result<Vec<SignedTransaction>, StorageError>;
}

impl<T: GenesisStore + ?Sized> GenesisStore for Arc<T> {
    fn state_get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).state_get(key)
    }

    fn state_set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).state_set(key, value)
    }

    fn check_genesis_load(&self) -> Result<bool, StorageError> {
        (**self).check_genesis_load()
    }

    fn load_genesis(&self, batch: GenesisBatch) -> Result<(), StorageError> {
        (**self).load_genesis(batch)
    }

    fn read_rounds(&self) -> Result<Vec<Round>, StorageError> {
        (**self).read_rounds()
    }

    fn read_snapshots(&self) -> Result<Vec<SnapshotWithTopologicalOrder>, StorageError> {
        (**self).read_snapshots()
    }

    fn read_transactions(&self) -> Result<Vec<SignedTransaction>, StorageError> {
        (**self).read_transactions()
    }
}

// =============================================================================
// LEDGER IMAGE
// Shared by the in-memory and file-backed adapters.
// =============================================================================

/// Full store contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerImage {
    /// State entries.
    pub state: BTreeMap<String, Vec<u8>>,
    /// Set once a genesis is committed.
    pub genesis_loaded: bool,
    /// Rounds.
    pub rounds: Vec<Round>,
    /// Snapshots in topological order.
    pub snapshots: Vec<SnapshotWithTopologicalOrder>,
    /// Transactions.
    pub transactions: Vec<SignedTransaction>,
}

impl LedgerImage {
    /// Apply a genesis batch. Fails without changes if one is present.
    pub fn apply_genesis(&mut self, batch: GenesisBatch) -> Result<(), StorageError> {
        if self.genesis_loaded {
            return Err(StorageError::GenesisAlreadyLoaded);
        }
        let GenesisBatch {
            rounds,
            mut snapshots,
            transactions,
            state,
        } = batch;
        snapshots.sort_by_key(|s| s.topological_order);

        self.rounds.extend(rounds);
        self.snapshots.extend(snapshots);
        self.transactions.extend(transactions);
        self.state.extend(state);
        self.genesis_loaded = true;
        Ok(())
    }
}

// =============================================================================
// IN-MEMORY ADAPTER
// =============================================================================

/// In-memory genesis store for unit tests.
///
/// Commits swap the whole image under one write lock, so readers never see a
/// partial genesis. [`fail_next_load`](Self::fail_next_load) injects a commit
/// failure.
#[derive(Debug, Default)]
pub struct InMemoryGenesisStore {
    image: RwLock<LedgerImage>,
    fail_next_load: AtomicBool,
}

impl InMemoryGenesisStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `image`.
    pub fn with_image(image: LedgerImage) -> Self {
        Self {
            image: RwLock::new(image),
            fail_next_load: AtomicBool::new(false),
        }
    }

    /// Make the next `load_genesis` fail with a backend error.
    pub fn fail_next_load(&self) {
        self.fail_next_load.store(true, Ordering::SeqCst);
    }

    /// Copy of the current contents.
    pub fn snapshot_image(&self) -> LedgerImage {
        self.image.read().clone()
    }
}

impl GenesisStore for InMemoryGenesisStore {
    fn state_get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.image.read().state.get(key).cloned())
    }

    fn state_set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.image
            .write()
            .state
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn check_genesis_load(&self) -> Result<bool, StorageError> {
        Ok(self.image.read().genesis_loaded)
    }

    fn load_genesis(&self, batch: GenesisBatch) -> Result<(), StorageError> {
        if self.fail_next_load.swap(false, Ordering::SeqCst) {
            return Err(StorageError::Backend {
                message: "injected commit failure".to_string(),
            });
        }
        let mut image = self.image.write();
        let mut next = image.clone();
        next.apply_genesis(batch)?;
        *image = next;
        Ok(())
    }

    fn read_rounds(&self) -> Result<Vec<Round>, StorageError> {
        Ok(self.image.read().rounds.clone())
    }

    fn read_snapshots(&self) -> Result<Vec<SnapshotWithTopologicalOrder>, StorageError> {
        Ok(self.image.read().snapshots.clone())
    }

    fn read_transactions(&self) -> Result<Vec<SignedTransaction>, StorageError> {
        Ok(self.image.read().transactions.clone())
    }
}
