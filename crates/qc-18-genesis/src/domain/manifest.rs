//! # Genesis Manifest
//!
//! The validated, immutable genesis document and its network identity.
//!
//! ## Canonical Form
//!
//! The network identifier is `H(json)` where `json` is the compact encoding
//! with field order `epoch, nodes[{signer, payee, balance}], domains[{signer,
//! balance}]`, addresses in string form and balances with all 8 decimals.
//! Two manifests that differ only in whitespace or balance notation
//! (`"10000"` vs `"10000.00000000"`) therefore share a network.

use serde::Serialize;
use shared_crypto::{Address, Hash};
use shared_types::Integer;

use super::errors::GenesisError;

/// Minimum consensus set size.
pub const MINIMUM_NODE_COUNT: usize = 7;

/// Largest set whose quorum `⌊2N/3⌋+1` fits the one-byte script operand.
pub const MAXIMUM_NODE_COUNT: usize = 382;

/// Pledge every genesis node commits.
pub const NODE_PLEDGE_AMOUNT: Integer = Integer::new(10_000);

/// Pledge of the genesis domain.
pub const DOMAIN_PLEDGE_AMOUNT: Integer = Integer::new(50_000);

/// State key holding the network identity marker.
pub const STATE_KEY_NETWORK: &str = "network";

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Network identifier: hash of the canonical genesis document.
pub type NetworkId = Hash;

/// A genesis consensus node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeEntry {
    /// Consensus signing identity.
    pub signer: Address,
    /// Reward identity.
    pub payee: Address,
    /// Pledged amount.
    pub balance: Integer,
}

impl NodeEntry {
    /// Network-scoped node id: `H(spend ‖ view)` bound to `network`.
    pub fn id_for_network(&self, network: &NetworkId) -> Hash {
        self.signer.hash().for_network(network)
    }
}

/// The genesis domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainEntry {
    /// Domain identity; always the first node's signer.
    pub signer: Address,
    /// Pledged amount.
    pub balance: Integer,
}

/// Validated genesis document.
///
/// Only [`GenesisValidator`](crate::algorithms::GenesisValidator) constructs
/// it, so holding one means every policy rule passed: at least
/// [`MINIMUM_NODE_COUNT`] nodes, exactly one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genesis {
    epoch: u64,
    nodes: Vec<NodeEntry>,
    domain: DomainEntry,
    network_id: NetworkId,
}

#[derive(Serialize)]
struct CanonicalGenesis<'a> {
    epoch: u64,
    nodes: &'a [NodeEntry],
    domains: [&'a DomainEntry; 1],
}

impl Genesis {
    pub(crate) fn new(
        epoch: u64,
        nodes: Vec<NodeEntry>,
        domain: DomainEntry,
    ) -> Result<Self, GenesisError> {
        let canonical = serde_json::to_vec(&CanonicalGenesis {
            epoch,
            nodes: &nodes,
            domains: [&domain],
        })
        .map_err(|e| GenesisError::manifest(format!("canonical encoding failed: {}", e)))?;

        Ok(Self {
            epoch,
            nodes,
            domain,
            network_id: Hash::new(&canonical),
        })
    }

    /// Genesis time, Unix seconds.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Genesis time, Unix nanoseconds.
    pub fn epoch_nanos(&self) -> u64 {
        self.epoch * NANOS_PER_SECOND
    }

    /// Node entries in manifest order.
    pub fn nodes(&self) -> &[NodeEntry] {
        &self.nodes
    }

    /// The first node in manifest order.
    pub fn first_node(&self) -> &NodeEntry {
        &self.nodes[0]
    }

    /// The single domain entry.
    pub fn domain(&self) -> &DomainEntry {
        &self.domain
    }

    /// Hash of the canonical document.
    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    /// Node ids bound to this network, in manifest order.
    pub fn node_ids(&self) -> Vec<Hash> {
        self.nodes
            .iter()
            .map(|node| node.id_for_network(&self.network_id))
            .collect()
    }

    /// Largest epoch whose nanosecond form fits in `u64`.
    pub(crate) const fn max_epoch() -> u64 {
        u64::MAX / NANOS_PER_SECOND - 1
    }
}
