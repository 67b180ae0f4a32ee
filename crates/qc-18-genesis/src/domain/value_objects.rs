//! # Domain Value Objects
//!
//! Small types shared by the builder, the loader and the store adapters.

use std::sync::atomic::{AtomicU64, Ordering};

use shared_crypto::Hash;

use super::errors::StorageError;
use super::manifest::NetworkId;

/// Source of the global snapshot replay order.
///
/// Owned by whoever drives snapshot creation and handed to builders by
/// reference. Values are strictly increasing.
#[derive(Debug, Default)]
pub struct TopologicalCounter(AtomicU64);

impl TopologicalCounter {
    /// Counter whose first [`next`](Self::next) returns `start`.
    pub fn new(start: u64) -> Self {
        Self(AtomicU64::new(start))
    }

    /// Take the next order index.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }

    /// The index the next call will return.
    pub fn peek(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Persisted network identity marker.
///
/// Stored under [`STATE_KEY_NETWORK`](super::manifest::STATE_KEY_NETWORK) as
/// the raw 32 id bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkState {
    /// Network the store was initialized for.
    pub id: NetworkId,
}

impl NetworkState {
    /// Marker value bytes.
    pub fn encode(&self) -> Vec<u8> {
        self.id.as_bytes().to_vec()
    }

    /// Parse marker value bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, StorageError> {
        let id: [u8; 32] = bytes.try_into().map_err(|_| StorageError::Corrupted {
            message: format!("network state has {} bytes, expected 32", bytes.len()),
        })?;
        Ok(Self {
            id: Hash::from_bytes(id),
        })
    }
}

/// Result of a genesis load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisOutcome {
    /// Network identifier of the manifest.
    pub network_id: NetworkId,
    /// This node's id bound to the network.
    pub id_for_network: Hash,
    /// `false` when genesis was already present and nothing was written.
    pub applied: bool,
}
