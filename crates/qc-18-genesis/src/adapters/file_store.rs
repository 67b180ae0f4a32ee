//! # File-Backed Genesis Store
//!
//! Persists the whole [`LedgerImage`] as one bincode file under the data
//! directory. Every write takes the directory lock, reloads the image from
//! disk, applies the change to a copy and replaces the file via temp file,
//! `fsync` and `rename`. A crash leaves either the old or the new file.
//! Reads reload the image first, so commits from other handles are visible.
//!
//! ```text
//! <data_dir>/
//! ├── LOCK          # held during writes
//! └── ledger.bin    # bincode LedgerImage
//! ```

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use shared_types::{Round, SignedTransaction, SnapshotWithTopologicalOrder};
use tracing::{debug, info};

use super::lock::StoreLock;
use crate::domain::StorageError;
use crate::ports::{GenesisBatch, GenesisStore, LedgerImage};

/// Ledger image file name.
pub const LEDGER_FILE: &str = "ledger.bin";

/// Genesis store persisted to a single file.
#[derive(Debug)]
pub struct FileGenesisStore {
    data_dir: PathBuf,
    path: PathBuf,
    image: RwLock<LedgerImage>,
}

impl FileGenesisStore {
    /// Open (or create) the store in `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;
        let path = data_dir.join(LEDGER_FILE);

        let image = Self::read_image(&path)?;
        if image.genesis_loaded {
            info!(
                path = %path.display(),
                snapshots = image.snapshots.len(),
                "[qc-18] Opened ledger with genesis"
            );
        } else {
            info!(path = %path.display(), "[qc-18] Opened empty ledger");
        }

        Ok(Self {
            data_dir,
            path,
            image: RwLock::new(image),
        })
    }

    /// Data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn read_image(path: &Path) -> Result<LedgerImage, StorageError> {
        match std::fs::read(path) {
            Ok(bytes) => bincode::deserialize(&bytes).map_err(|e| StorageError::Corrupted {
                message: format!("{}: {}", path.display(), e),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LedgerImage::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_image(&self, image: &LedgerImage) -> Result<(), StorageError> {
        let bytes = bincode::serialize(image).map_err(|e| StorageError::Serialization {
            message: e.to_string(),
        })?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;

        // Make the rename itself durable.
        #[cfg(unix)]
        File::open(&self.data_dir)?.sync_all()?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "[qc-18] Ledger image written");
        Ok(())
    }

    /// Run `change` on the on-disk image under the directory lock.
    fn update<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut LedgerImage) -> Result<(), StorageError>,
    {
        let _lock = StoreLock::acquire(&self.data_dir)?;
        let mut next = Self::read_image(&self.path)?;
        let outcome = change(&mut next);
        if outcome.is_ok() {
            self.write_image(&next)?;
        }
        *self.image.write() = next;
        outcome
    }

    fn refresh(&self) -> Result<(), StorageError> {
        let current = Self::read_image(&self.path)?;
        *self.image.write() = current;
        Ok(())
    }
}

impl GenesisStore for FileGenesisStore {
    fn state_get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.refresh()?;
        Ok(self.image.read().state.get(key).cloned())
    }

    fn state_set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.update(|image| {
            image.state.insert(key.to_string(), value.to_vec());
            Ok(())
        })
    }

    fn check_genesis_load(&self) -> Result<bool, StorageError> {
        self.refresh()?;
        Ok(self.image.read().genesis_loaded)
    }

    fn load_genesis(&self, batch: GenesisBatch) -> Result<(), StorageError> {
        self.update(|image| image.apply_genesis(batch))
    }

    fn read_rounds(&self) -> Result<Vec<Round>, StorageError> {
        self.refresh()?;
        Ok(self.image.read().rounds.clone())
    }

    fn read_snapshots(&self) -> Result<Vec<SnapshotWithTopologicalOrder>, StorageError> {
        self.refresh()?;
        Ok(self.image.read().snapshots.clone())
    }

    fn read_transactions(&self) -> Result<Vec<SignedTransaction>, StorageError> {
        self.refresh()?;
        Ok(self.image.read().transactions.clone())
    }
}
