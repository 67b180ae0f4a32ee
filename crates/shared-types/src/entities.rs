//! # Core Ledger Entities
//!
//! ## Clusters
//!
//! - **Transactions**: `Input`, `Output`, `Transaction`, `SignedTransaction`
//! - **Snapshots**: `Snapshot`, `SnapshotWithTopologicalOrder`
//! - **Rounds**: `Round`, `RoundLink`
//!
//! Content hashes are SHA3-256 over the canonical bincode encoding, so any two
//! nodes that build the same record get byte-identical hashes.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_crypto::{Hash, Key};

use crate::{Integer, Script, TypesError};

/// Current transaction format version.
pub const TX_VERSION: u8 = 2;

/// A 64-byte signature.
pub type Signature = [u8; 64];

/// Asset id of the native staking asset.
pub fn native_asset_id() -> Hash {
    Hash::new(b"quantum-chain:native-asset")
}

/// Canonical encoding used for every content hash.
pub fn canonical_encode<T: Serialize>(value: &T) -> Result<Vec<u8>, TypesError> {
    Ok(bincode::serialize(value)?)
}

// =============================================================================
// CLUSTER A: TRANSACTIONS
// =============================================================================

/// Where the value of a transaction comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    /// Minted at network genesis; carries the network identifier.
    Genesis(Hash),
}

/// Semantic type of an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputType {
    /// Node pledge accepted into the consensus set.
    NodeAccept,
    /// Domain pledge accepted.
    DomainAccept,
}

/// A stealth-addressed output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Output semantics.
    pub output_type: OutputType,
    /// Amount locked.
    pub amount: Integer,
    /// One-time recipient keys.
    pub keys: Vec<Key>,
    /// Spending policy over `keys`.
    pub script: Script,
    /// Ephemeral public key recipients use to recognize the output.
    pub mask: Key,
}

/// Unsigned transaction body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Format version.
    pub version: u8,
    /// Asset being moved.
    pub asset: Hash,
    /// Inputs.
    pub inputs: Vec<Input>,
    /// Outputs.
    pub outputs: Vec<Output>,
    /// Auxiliary payload.
    pub extra: Vec<u8>,
}

impl Transaction {
    /// Canonical bytes of the body.
    pub fn encode(&self) -> Result<Vec<u8>, TypesError> {
        canonical_encode(self)
    }

    /// Content hash of the body. Signatures are not covered.
    pub fn payload_hash(&self) -> Result<Hash, TypesError> {
        Ok(Hash::new(&self.encode()?))
    }
}

/// Transaction plus per-input signature sets.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Signed body.
    pub transaction: Transaction,
    /// Signatures, one set per input. Empty until signed.
    #[serde_as(as = "Vec<Vec<Bytes>>")]
    pub signatures: Vec<Vec<Signature>>,
}

impl SignedTransaction {
    /// Wrap a body with no signatures yet.
    pub fn unsigned(transaction: Transaction) -> Self {
        Self {
            transaction,
            signatures: Vec::new(),
        }
    }

    /// Content hash of the body.
    pub fn payload_hash(&self) -> Result<Hash, TypesError> {
        self.transaction.payload_hash()
    }
}

// =============================================================================
// CLUSTER B: SNAPSHOTS
// =============================================================================

/// A transaction accepted into a node's round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Owning node (network-scoped id).
    pub node_id: Hash,
    /// Payload hash of the transaction.
    pub transaction: Hash,
    /// Round the snapshot belongs to.
    pub round_number: u64,
    /// Unix nanoseconds.
    pub timestamp: u64,
    /// Content hash of the fields above.
    pub hash: Hash,
}

#[derive(Serialize)]
struct SnapshotPayload<'a> {
    node_id: &'a Hash,
    transaction: &'a Hash,
    round_number: u64,
    timestamp: u64,
}

impl Snapshot {
    /// Build a snapshot and compute its hash.
    pub fn new(
        node_id: Hash,
        transaction: Hash,
        round_number: u64,
        timestamp: u64,
    ) -> Result<Self, TypesError> {
        let mut snapshot = Self {
            node_id,
            transaction,
            round_number,
            timestamp,
            hash: Hash::ZERO,
        };
        snapshot.hash = snapshot.payload_hash()?;
        Ok(snapshot)
    }

    /// Hash over every field except `hash`.
    pub fn payload_hash(&self) -> Result<Hash, TypesError> {
        let payload = SnapshotPayload {
            node_id: &self.node_id,
            transaction: &self.transaction,
            round_number: self.round_number,
            timestamp: self.timestamp,
        };
        Ok(Hash::new(&canonical_encode(&payload)?))
    }
}

/// Snapshot with its position in the global replay order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotWithTopologicalOrder {
    /// The snapshot.
    pub snapshot: Snapshot,
    /// Global, strictly increasing order index.
    pub topological_order: u64,
}

// =============================================================================
// CLUSTER C: ROUNDS
// =============================================================================

/// References that link a round into the consensus graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLink {
    /// Hash of the node's own previous round.
    #[serde(rename = "self")]
    pub self_hash: Hash,
    /// Hash of a peer's finalized round.
    pub external: Hash,
}

/// A persisted round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Round hash.
    pub hash: Hash,
    /// Owning node.
    pub node_id: Hash,
    /// Round number.
    pub number: u64,
    /// Start timestamp (Unix nanoseconds); zero while open.
    pub timestamp: u64,
    /// Links, present on linked rounds.
    pub references: Option<RoundLink>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::PrivateKey;

    fn key(byte: u8) -> Key {
        PrivateKey::from_seed(&[byte; 64]).public()
    }

    fn sample_transaction() -> Transaction {
        Transaction {
            version: TX_VERSION,
            asset: native_asset_id(),
            inputs: vec![Input::Genesis(Hash::new(b"network"))],
            outputs: vec![Output {
                output_type: OutputType::NodeAccept,
                amount: Integer::new(10000),
                keys: vec![key(1), key(2)],
                script: Script::bft_quorum(2).unwrap(),
                mask: key(3),
            }],
            extra: vec![9; 64],
        }
    }

    #[test]
    fn test_payload_hash_deterministic() {
        let a = sample_transaction();
        let b = sample_transaction();
        assert_eq!(a.encode().unwrap(), b.encode().unwrap());
        assert_eq!(a.payload_hash().unwrap(), b.payload_hash().unwrap());
    }

    #[test]
    fn test_payload_hash_covers_fields() {
        let a = sample_transaction();
        let mut b = sample_transaction();
        b.extra.push(0);
        assert_ne!(a.payload_hash().unwrap(), b.payload_hash().unwrap());

        let mut c = sample_transaction();
        c.outputs[0].amount = Integer::new(10001);
        assert_ne!(a.payload_hash().unwrap(), c.payload_hash().unwrap());
    }

    #[test]
    fn test_signatures_not_in_payload_hash() {
        let unsigned = SignedTransaction::unsigned(sample_transaction());
        let mut signed = unsigned.clone();
        signed.signatures.push(vec![[7u8; 64]]);
        assert_eq!(
            unsigned.payload_hash().unwrap(),
            signed.payload_hash().unwrap()
        );
    }

    #[test]
    fn test_signed_transaction_bincode_round_trip() {
        let mut signed = SignedTransaction::unsigned(sample_transaction());
        signed.signatures.push(vec![[7u8; 64]]);
        let bytes = canonical_encode(&signed).unwrap();
        let back: SignedTransaction = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, signed);
    }

    #[test]
    fn test_snapshot_hash_excludes_itself() {
        let snapshot = Snapshot::new(Hash::new(b"node"), Hash::new(b"tx"), 0, 42).unwrap();
        assert_ne!(snapshot.hash, Hash::ZERO);
        assert_eq!(snapshot.payload_hash().unwrap(), snapshot.hash);
    }

    #[test]
    fn test_snapshot_hash_depends_on_timestamp() {
        let a = Snapshot::new(Hash::new(b"node"), Hash::new(b"tx"), 0, 42).unwrap();
        let b = Snapshot::new(Hash::new(b"node"), Hash::new(b"tx"), 0, 43).unwrap();
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_round_link_json_field_names() {
        let link = RoundLink {
            self_hash: Hash::ZERO,
            external: Hash::ZERO,
        };
        let json = serde_json::to_value(link).unwrap();
        assert!(json.get("self").is_some());
        assert!(json.get("external").is_some());
    }
}
