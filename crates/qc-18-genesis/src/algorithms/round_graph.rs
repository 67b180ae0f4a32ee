//! # Initial Round Graph
//!
//! Derives the genesis snapshots and rounds. Live operation links rounds
//! through gossip; at genesis there is none, so each node's first linked
//! round references the next node's opening round, closing one ring over
//! the whole consensus set.
//!
//! ```text
//! node i:  Round 0 { hash = final(cache_i), timestamp = start }
//!          Round 1 { hash = id_i, references = { self: R0_i, external: R0_(i+1 mod N) } }
//! ```

use shared_crypto::Hash;
use shared_types::{Round, Snapshot, SnapshotWithTopologicalOrder};
use tracing::debug;

use crate::algorithms::stealth::GenesisTransactions;
use crate::domain::{
    CacheRound, FinalRound, Genesis, GenesisError, PolicyViolation, TopologicalCounter,
};

const GENESIS_ROUND: u64 = 0;

/// Ordered node ids with the "next node" relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRing {
    nodes: Vec<Hash>,
}

impl RoundRing {
    /// Ring over `nodes` in the given order.
    pub fn new(nodes: Vec<Hash>) -> Self {
        Self { nodes }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the ring has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position after `index`, wrapping from the last node to the first.
    pub fn successor(&self, index: usize) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        (index + 1) % self.nodes.len()
    }

    /// Id of the node after `node`, if `node` is on the ring.
    pub fn next_node(&self, node: &Hash) -> Option<&Hash> {
        let index = self.nodes.iter().position(|n| n == node)?;
        self.nodes.get(self.successor(index))
    }

    /// Node ids in ring order.
    pub fn nodes(&self) -> &[Hash] {
        &self.nodes
    }
}

/// Genesis rounds and snapshots ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundGraph {
    /// Two rounds per node: the opening round then the linked one.
    pub rounds: Vec<Round>,
    /// Node snapshots in manifest order, then the domain snapshot.
    pub snapshots: Vec<SnapshotWithTopologicalOrder>,
    /// The reference ring.
    pub ring: RoundRing,
}

/// Builds the [`RoundGraph`] of a genesis.
pub struct RoundGraphBuilder<'a> {
    genesis: &'a Genesis,
    counter: &'a TopologicalCounter,
}

impl<'a> RoundGraphBuilder<'a> {
    /// Builder drawing snapshot orders from `counter`.
    pub fn new(genesis: &'a Genesis, counter: &'a TopologicalCounter) -> Self {
        Self { genesis, counter }
    }

    /// Build snapshots and rounds for `transactions`.
    pub fn build(&self, transactions: &GenesisTransactions) -> Result<RoundGraph, GenesisError> {
        let network_id = self.genesis.network_id();
        let timestamp = self.genesis.epoch_nanos();

        let mut snapshots = Vec::with_capacity(transactions.nodes.len() + 1);
        let mut cache_rounds: Vec<CacheRound> = Vec::with_capacity(transactions.nodes.len());

        for (node, signed) in self.genesis.nodes().iter().zip(&transactions.nodes) {
            let snapshot = Snapshot::new(
                node.id_for_network(&network_id),
                signed.payload_hash()?,
                GENESIS_ROUND,
                timestamp,
            )?;
            snapshots.push(self.order(snapshot.clone()));
            cache_rounds.push(CacheRound::open(snapshot));
        }

        let domain = self.genesis.domain();
        let domain_node = domain.signer.hash().for_network(&network_id);
        let snapshot = Snapshot::new(
            domain_node,
            transactions.domain.payload_hash()?,
            GENESIS_ROUND,
            timestamp + 1,
        )?;
        snapshots.push(self.order(snapshot.clone()));
        cache_rounds
            .iter_mut()
            .find(|round| round.node_id() == &domain_node)
            .ok_or_else(|| PolicyViolation::DomainSignerMismatch {
                domain_signer: domain.signer,
                first_node_signer: self.genesis.first_node().signer,
            })?
            .push(snapshot);

        let finals: Vec<FinalRound> = cache_rounds
            .into_iter()
            .map(CacheRound::into_final)
            .collect();
        let ring = RoundRing::new(finals.iter().map(|f| f.node_id).collect());

        let mut rounds = Vec::with_capacity(finals.len() * 2);
        for (index, own) in finals.iter().enumerate() {
            let external = &finals[ring.successor(index)];
            rounds.push(own.to_round());
            rounds.push(own.successor(external));
        }

        debug!(
            network_id = %network_id,
            snapshots = snapshots.len(),
            rounds = rounds.len(),
            "[qc-18] Genesis round graph built"
        );

        Ok(RoundGraph {
            rounds,
            snapshots,
            ring,
        })
    }

    fn order(&self, snapshot: Snapshot) -> SnapshotWithTopologicalOrder {
        SnapshotWithTopologicalOrder {
            snapshot,
            topological_order: self.counter.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{GenesisValidator, StealthTransactionFactory};
    use crate::domain::{invariant_single_reference_cycle, invariant_topological_order};
    use crate::test_utils::manifest_bytes;
    use proptest::prelude::*;

    fn build(nodes: usize, counter: &TopologicalCounter) -> (Genesis, RoundGraph) {
        let genesis = GenesisValidator::parse(&manifest_bytes(nodes)).unwrap();
        let transactions = StealthTransactionFactory::new(&genesis)
            .unwrap()
            .build()
            .unwrap();
        let graph = RoundGraphBuilder::new(&genesis, counter)
            .build(&transactions)
            .unwrap();
        (genesis, graph)
    }

    #[test]
    fn test_ring_successor_wraps() {
        let ring = RoundRing::new(vec![Hash::new(b"a"), Hash::new(b"b"), Hash::new(b"c")]);
        assert_eq!(ring.successor(0), 1);
        assert_eq!(ring.successor(2), 0);
        assert_eq!(ring.next_node(&Hash::new(b"c")), Some(&Hash::new(b"a")));
        assert_eq!(ring.next_node(&Hash::new(b"z")), None);
    }

    #[test]
    fn test_snapshot_counts_and_order() {
        let counter = TopologicalCounter::new(100);
        let (genesis, graph) = build(7, &counter);

        assert_eq!(graph.snapshots.len(), 8);
        assert!(invariant_topological_order(&graph.snapshots));
        let orders: Vec<u64> = graph.snapshots.iter().map(|s| s.topological_order).collect();
        assert_eq!(orders, (100..108).collect::<Vec<_>>());
        assert_eq!(counter.peek(), 108);

        let domain = &graph.snapshots[7].snapshot;
        assert_eq!(domain.node_id, genesis.node_ids()[0]);
        assert_eq!(domain.timestamp, genesis.epoch_nanos() + 1);
        for s in &graph.snapshots[..7] {
            assert_eq!(s.snapshot.timestamp, genesis.epoch_nanos());
            assert_eq!(s.snapshot.round_number, 0);
        }
    }

    #[test]
    fn test_snapshots_reference_transactions() {
        let counter = TopologicalCounter::default();
        let genesis = GenesisValidator::parse(&manifest_bytes(7)).unwrap();
        let transactions = StealthTransactionFactory::new(&genesis)
            .unwrap()
            .build()
            .unwrap();
        let graph = RoundGraphBuilder::new(&genesis, &counter)
            .build(&transactions)
            .unwrap();

        for (s, tx) in graph.snapshots.iter().zip(transactions.into_vec()) {
            assert_eq!(s.snapshot.transaction, tx.payload_hash().unwrap());
            assert_eq!(s.snapshot.hash, s.snapshot.payload_hash().unwrap());
        }
    }

    #[test]
    fn test_two_rounds_per_node() {
        let counter = TopologicalCounter::default();
        let (genesis, graph) = build(7, &counter);
        let ids = genesis.node_ids();

        assert_eq!(graph.rounds.len(), 14);
        for (i, pair) in graph.rounds.chunks(2).enumerate() {
            let (opening, linked) = (&pair[0], &pair[1]);
            assert_eq!(opening.node_id, ids[i]);
            assert_eq!(opening.number, 0);
            assert_eq!(opening.timestamp, genesis.epoch_nanos());
            assert!(opening.references.is_none());

            assert_eq!(linked.number, 1);
            assert_eq!(linked.hash, ids[i]);
            let link = linked.references.unwrap();
            assert_eq!(link.self_hash, opening.hash);
            assert_eq!(link.external, graph.rounds[((i + 1) % 7) * 2].hash);
        }
    }

    #[test]
    fn test_first_node_round_covers_domain_snapshot() {
        let counter = TopologicalCounter::default();
        let (_, graph) = build(7, &counter);

        let mut with_domain = CacheRound::open(graph.snapshots[0].snapshot.clone());
        with_domain.push(graph.snapshots[7].snapshot.clone());
        assert_eq!(graph.rounds[0].hash, with_domain.into_final().hash);

        let alone = CacheRound::open(graph.snapshots[1].snapshot.clone()).into_final();
        assert_eq!(graph.rounds[2].hash, alone.hash);
    }

    #[test]
    fn test_ring_is_manifest_order() {
        let counter = TopologicalCounter::default();
        let (genesis, graph) = build(9, &counter);
        assert_eq!(graph.ring.nodes(), genesis.node_ids().as_slice());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_single_cycle_for_any_node_count(nodes in 7usize..40) {
            let counter = TopologicalCounter::default();
            let (_, graph) = build(nodes, &counter);
            prop_assert_eq!(graph.snapshots.len(), nodes + 1);
            prop_assert_eq!(graph.rounds.len(), nodes * 2);
            prop_assert!(invariant_single_reference_cycle(&graph.rounds));
            prop_assert!(invariant_topological_order(&graph.snapshots));
        }
    }
}
