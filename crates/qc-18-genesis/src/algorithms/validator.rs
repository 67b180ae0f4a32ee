//! # Manifest Validation
//!
//! Turns raw manifest bytes into a [`Genesis`]. Checks run in a fixed order
//! and the first failure is returned; nothing is accepted partially.
//!
//! 1. JSON shape, identity strings, balance strings, epoch range
//! 2. Node count
//!
//! Step 1 covers every node and domain entry before step 2 runs, so a short
//! manifest that also holds a malformed address or balance reports
//! `ManifestFormat`/`InvalidAddress`, not `InsufficientNodes`.
//!
//! 3. Per node, in manifest order: pledge, duplicate signer, signer keys,
//!    payee keys
//! 4. Exactly one domain, signed by node 0, with the domain pledge

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use shared_crypto::Address;
use shared_types::Integer;
use tracing::debug;

use crate::domain::{
    invariant_exact_pledge, invariant_node_count, invariant_view_key_derived, DomainEntry,
    Genesis, GenesisError, KeyRole, NodeEntry, PolicyViolation, DOMAIN_PLEDGE_AMOUNT,
    NODE_PLEDGE_AMOUNT,
};

#[derive(Deserialize)]
struct RawManifest {
    epoch: u64,
    nodes: Vec<RawNode>,
    domains: Vec<RawDomain>,
}

#[derive(Deserialize)]
struct RawNode {
    signer: String,
    payee: String,
    balance: String,
}

#[derive(Deserialize)]
struct RawDomain {
    signer: String,
    balance: String,
}

fn parse_address(field: String, value: &str) -> Result<Address, GenesisError> {
    value
        .parse()
        .map_err(|source| GenesisError::InvalidAddress { field, source })
}

fn parse_balance(field: &str, value: &str) -> Result<Integer, GenesisError> {
    value
        .parse()
        .map_err(|e| GenesisError::manifest(format!("{}: {}", field, e)))
}

/// Genesis manifest validator.
pub struct GenesisValidator;

impl GenesisValidator {
    /// Read and validate the manifest at `path`.
    pub fn load(path: &Path) -> Result<Genesis, GenesisError> {
        let bytes = std::fs::read(path).map_err(|e| {
            GenesisError::manifest(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&bytes)
    }

    /// Validate manifest bytes.
    pub fn parse(bytes: &[u8]) -> Result<Genesis, GenesisError> {
        let raw: RawManifest =
            serde_json::from_slice(bytes).map_err(|e| GenesisError::manifest(e.to_string()))?;

        if raw.epoch > Genesis::max_epoch() {
            return Err(GenesisError::manifest(format!(
                "epoch {} out of range",
                raw.epoch
            )));
        }

        let nodes = raw
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                Ok(NodeEntry {
                    signer: parse_address(format!("nodes[{}].signer", i), &node.signer)?,
                    payee: parse_address(format!("nodes[{}].payee", i), &node.payee)?,
                    balance: parse_balance(&format!("nodes[{}].balance", i), &node.balance)?,
                })
            })
            .collect::<Result<Vec<_>, GenesisError>>()?;

        let domains = raw
            .domains
            .iter()
            .enumerate()
            .map(|(i, domain)| {
                Ok(DomainEntry {
                    signer: parse_address(format!("domains[{}].signer", i), &domain.signer)?,
                    balance: parse_balance(&format!("domains[{}].balance", i), &domain.balance)?,
                })
            })
            .collect::<Result<Vec<_>, GenesisError>>()?;

        invariant_node_count(nodes.len())?;
        Self::check_nodes(&nodes)?;
        let domain = Self::check_domains(&nodes, domains)?;

        let genesis = Genesis::new(raw.epoch, nodes, domain)?;
        debug!(
            network_id = %genesis.network_id(),
            nodes = genesis.nodes().len(),
            epoch = genesis.epoch(),
            "[qc-18] Genesis manifest validated"
        );
        Ok(genesis)
    }

    fn check_nodes(nodes: &[NodeEntry]) -> Result<(), GenesisError> {
        let mut signers = HashSet::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if !invariant_exact_pledge(&node.balance, &NODE_PLEDGE_AMOUNT) {
                return Err(PolicyViolation::InvalidNodePledge {
                    index,
                    signer: node.signer,
                    balance: node.balance,
                    expected: NODE_PLEDGE_AMOUNT,
                }
                .into());
            }
            if !signers.insert(node.signer) {
                return Err(PolicyViolation::DuplicateSigner {
                    index,
                    signer: node.signer,
                }
                .into());
            }
            invariant_view_key_derived(KeyRole::Signer, &node.signer)?;
            invariant_view_key_derived(KeyRole::Payee, &node.payee)?;
        }
        Ok(())
    }

    fn check_domains(
        nodes: &[NodeEntry],
        mut domains: Vec<DomainEntry>,
    ) -> Result<DomainEntry, GenesisError> {
        let count = domains.len();
        if count != 1 {
            return Err(PolicyViolation::InvalidDomainCount { count }.into());
        }
        let (Some(domain), Some(first)) = (domains.pop(), nodes.first()) else {
            return Err(PolicyViolation::InvalidDomainCount { count }.into());
        };
        if domain.signer != first.signer {
            return Err(PolicyViolation::DomainSignerMismatch {
                domain_signer: domain.signer,
                first_node_signer: first.signer,
            }
            .into());
        }
        if !invariant_exact_pledge(&domain.balance, &DOMAIN_PLEDGE_AMOUNT) {
            return Err(PolicyViolation::InvalidDomainPledge {
                balance: domain.balance,
                expected: DOMAIN_PLEDGE_AMOUNT,
            }
            .into());
        }
        Ok(domain)
    }
}
