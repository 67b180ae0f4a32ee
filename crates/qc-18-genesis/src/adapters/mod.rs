//! # Adapters Module
//!
//! Storage adapter implementations for Genesis Bootstrap.
//!
//! ## Modules
//!
//! - `file_store`: single-file ledger image with atomic replace
//! - `lock`: data directory process lock

pub mod file_store;
pub mod lock;

pub use file_store::{FileGenesisStore, LEDGER_FILE};
pub use lock::{LockError, StoreLock, DEFAULT_LOCK_TIMEOUT};
