//! # Domain Invariants
//!
//! Business rules for Genesis Bootstrap. The validator enforces the manifest
//! rules; the graph checks are also usable by later subsystems that read the
//! stored genesis back.

use std::collections::{HashMap, HashSet};

use shared_crypto::{Address, Hash};
use shared_types::{Integer, Round, SnapshotWithTopologicalOrder};

use super::errors::{GenesisError, KeyRole, PolicyViolation};
use super::manifest::{MAXIMUM_NODE_COUNT, MINIMUM_NODE_COUNT};

/// Invariant: node count within `[MINIMUM_NODE_COUNT, MAXIMUM_NODE_COUNT]`.
pub fn invariant_node_count(count: usize) -> Result<(), PolicyViolation> {
    if count < MINIMUM_NODE_COUNT {
        return Err(PolicyViolation::InsufficientNodes {
            count,
            minimum: MINIMUM_NODE_COUNT,
        });
    }
    if count > MAXIMUM_NODE_COUNT {
        return Err(PolicyViolation::TooManyNodes {
            count,
            maximum: MAXIMUM_NODE_COUNT,
        });
    }
    Ok(())
}

/// Invariant: an address' view key is the deterministic derivation of its
/// spend key.
pub fn invariant_view_key_derived(role: KeyRole, address: &Address) -> Result<(), GenesisError> {
    let expected = address.derived_view_key();
    if expected != address.public_view_key {
        return Err(GenesisError::KeyConsistency {
            role,
            address: *address,
            expected,
            actual: address.public_view_key,
        });
    }
    Ok(())
}

/// Invariant: exact pledge amount.
pub fn invariant_exact_pledge(balance: &Integer, expected: &Integer) -> bool {
    balance == expected
}

/// Invariant: snapshot orders are strictly increasing in slice order.
pub fn invariant_topological_order(snapshots: &[SnapshotWithTopologicalOrder]) -> bool {
    snapshots
        .windows(2)
        .all(|pair| pair[0].topological_order < pair[1].topological_order)
}

/// Invariant: the round-1 references form one cycle over all round-0 rounds.
///
/// Each linked round points from its node's round 0 (`self`) to another
/// node's round 0 (`external`). Following `external` from any round 0 must
/// visit every node exactly once before returning to the start.
pub fn invariant_single_reference_cycle(rounds: &[Round]) -> bool {
    let opening: HashSet<Hash> = rounds
        .iter()
        .filter(|r| r.number == 0)
        .map(|r| r.hash)
        .collect();

    let mut next: HashMap<Hash, Hash> = HashMap::new();
    for link in rounds.iter().filter_map(|r| r.references) {
        if !opening.contains(&link.self_hash) || !opening.contains(&link.external) {
            return false;
        }
        if next.insert(link.self_hash, link.external).is_some() {
            return false;
        }
    }
    if opening.is_empty() || next.len() != opening.len() {
        return false;
    }

    let Some(start) = opening.iter().next().copied() else {
        return false;
    };
    let mut visited = HashSet::new();
    let mut current = start;
    loop {
        if !visited.insert(current) {
            break;
        }
        match next.get(&current) {
            Some(following) => current = *following,
            None => return false,
        }
    }
    current == start && visited.len() == opening.len()
}
