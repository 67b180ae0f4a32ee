//! # Data Directory Lock
//!
//! Serializes genesis commits between processes sharing a data directory.
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on
//! Windows). The lock is released on drop.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;
use thiserror::Error;

use crate::domain::StorageError;

/// How long [`StoreLock::acquire`] waits for another holder.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from data directory locking.
#[derive(Debug, Error)]
pub enum LockError {
    /// Lock file could not be created.
    #[error("Failed to create lock file: {0}")]
    CreateFailed(#[source] io::Error),

    /// Another process kept the lock past the timeout.
    #[error("Data directory already in use ({}), holder pid {pid:?}", .path.display())]
    AlreadyLocked {
        /// PID recorded by the holder, if readable
        pid: Option<u32>,
        /// Lock file
        path: PathBuf,
    },

    /// Failed to write PID to the lock file.
    #[error("Failed to write PID to lock file: {0}")]
    WriteFailed(#[source] io::Error),
}

impl From<LockError> for StorageError {
    fn from(err: LockError) -> Self {
        StorageError::Lock {
            message: err.to_string(),
        }
    }
}

/// Exclusive lock on a data directory.
///
/// ```ignore
/// let lock = StoreLock::acquire(Path::new("/data/node"))?;
/// // lock held until `lock` goes out of scope
/// ```
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Lock file name.
    pub const LOCK_FILE: &'static str = "LOCK";

    /// Acquire the lock, waiting up to [`DEFAULT_LOCK_TIMEOUT`].
    pub fn acquire(data_dir: &Path) -> Result<Self, LockError> {
        Self::acquire_with_timeout(data_dir, DEFAULT_LOCK_TIMEOUT)
    }

    /// Acquire the lock, retrying with exponential backoff until `timeout`.
    pub fn acquire_with_timeout(data_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let deadline = Instant::now() + timeout;
        let path = data_dir.join(Self::LOCK_FILE);
        let mut retry_delay = Duration::from_millis(10);

        loop {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(false)
                .read(true)
                .write(true)
                .open(&path)
                .map_err(LockError::CreateFailed)?;

            if file.try_lock_exclusive().is_ok() {
                file.set_len(0).map_err(LockError::WriteFailed)?;
                writeln!(file, "{}", std::process::id()).map_err(LockError::WriteFailed)?;
                file.sync_all().map_err(LockError::WriteFailed)?;
                return Ok(Self { file, path });
            }

            if Instant::now() >= deadline {
                return Err(LockError::AlreadyLocked {
                    pid: Self::read_existing_pid(&path),
                    path,
                });
            }

            drop(file);
            std::thread::sleep(retry_delay);
            retry_delay = (retry_delay * 2).min(Duration::from_millis(500));
        }
    }

    /// Path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        #[allow(clippy::incompatible_msrv)]
        let _ = self.file.unlock();
    }
}
