//! # Rounds Under Construction
//!
//! A [`CacheRound`] accumulates one node's snapshots for a round number.
//! Finalizing consumes it and yields the [`FinalRound`] summary that the
//! persisted [`Round`] records are built from.
//!
//! ```text
//! h = H(node_id ‖ number_le)
//! for s in snapshots sorted by timestamp: h = H(h ‖ s.hash)
//! ```

use shared_crypto::Hash;
use shared_types::{Round, RoundLink, Snapshot};

/// Open round for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRound {
    node_id: Hash,
    number: u64,
    snapshots: Vec<Snapshot>,
}

impl CacheRound {
    /// Open a round with its first snapshot. Node and number come from it.
    pub fn open(first: Snapshot) -> Self {
        Self {
            node_id: first.node_id,
            number: first.round_number,
            snapshots: vec![first],
        }
    }

    /// Owning node.
    pub fn node_id(&self) -> &Hash {
        &self.node_id
    }

    /// Round number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Snapshots in insertion order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Add a snapshot of the same node and round.
    pub fn push(&mut self, snapshot: Snapshot) {
        debug_assert_eq!(snapshot.node_id, self.node_id);
        debug_assert_eq!(snapshot.round_number, self.number);
        self.snapshots.push(snapshot);
    }

    /// Close the round.
    pub fn into_final(mut self) -> FinalRound {
        self.snapshots.sort_by_key(|s| s.timestamp);

        let mut hash = Hash::from_parts(&[self.node_id.as_bytes(), &self.number.to_le_bytes()]);
        for snapshot in &self.snapshots {
            hash = Hash::from_parts(&[hash.as_bytes(), snapshot.hash.as_bytes()]);
        }

        // open() guarantees at least one snapshot
        let start = self.snapshots.first().map_or(0, |s| s.timestamp);
        let end = self.snapshots.last().map_or(start, |s| s.timestamp);

        FinalRound {
            hash,
            node_id: self.node_id,
            number: self.number,
            start,
            end,
        }
    }
}

/// Closed round summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalRound {
    /// Round hash.
    pub hash: Hash,
    /// Owning node.
    pub node_id: Hash,
    /// Round number.
    pub number: u64,
    /// Earliest snapshot timestamp.
    pub start: u64,
    /// Latest snapshot timestamp.
    pub end: u64,
}

impl FinalRound {
    /// The persisted record of this round.
    pub fn to_round(&self) -> Round {
        Round {
            hash: self.hash,
            node_id: self.node_id,
            number: self.number,
            timestamp: self.start,
            references: None,
        }
    }

    /// The open successor round, linked to this round and an external one.
    ///
    /// Its hash is the node id until the round is closed.
    pub fn successor(&self, external: &FinalRound) -> Round {
        Round {
            hash: self.node_id,
            node_id: self.node_id,
            number: self.number + 1,
            timestamp: 0,
            references: Some(RoundLink {
                self_hash: self.hash,
                external: external.hash,
            }),
        }
    }
}
