//! # Test Utilities
//!
//! Deterministic genesis fixtures. Keys come from fixed seeds, so every
//! call with the same arguments yields the same manifest and network id.
//!
//! Requires feature: `test-utils` (always on for this crate's unit tests).

use serde_json::{json, Value};
use shared_crypto::{Address, Hash, PrivateKey};

use crate::domain::{DOMAIN_PLEDGE_AMOUNT, NODE_PLEDGE_AMOUNT};

/// Epoch used by fixture manifests (Unix seconds).
pub const FIXTURE_EPOCH: u64 = 1_551_312_000;

fn fixture_key(role: &[u8], index: usize) -> PrivateKey {
    let seed = Hash::from_parts(&[b"qc-18-fixture", role, &(index as u64).to_le_bytes()]);
    let mut wide = [0u8; 64];
    wide[..32].copy_from_slice(seed.as_bytes());
    wide[32..].copy_from_slice(seed.as_bytes());
    PrivateKey::from_seed(&wide)
}

/// Private spend key of signer `index`.
pub fn signer_spend_key(index: usize) -> PrivateKey {
    fixture_key(b"signer", index)
}

/// Private view key of signer `index`.
pub fn signer_view_key(index: usize) -> PrivateKey {
    signer_address(index).public_spend_key.deterministic_hash_derive()
}

/// Address of signer `index`.
pub fn signer_address(index: usize) -> Address {
    Address::from_spend_key(signer_spend_key(index).public())
}

/// Address of payee `index`.
pub fn payee_address(index: usize) -> Address {
    Address::from_spend_key(fixture_key(b"payee", index).public())
}

/// Valid manifest document with `nodes` nodes; the domain is signer 0.
pub fn manifest_json(nodes: usize) -> Value {
    let entries: Vec<Value> = (0..nodes)
        .map(|i| {
            json!({
                "signer": signer_address(i).to_string(),
                "payee": payee_address(i).to_string(),
                "balance": NODE_PLEDGE_AMOUNT.to_string(),
            })
        })
        .collect();
    json!({
        "epoch": FIXTURE_EPOCH,
        "nodes": entries,
        "domains": [{
            "signer": signer_address(0).to_string(),
            "balance": DOMAIN_PLEDGE_AMOUNT.to_string(),
        }],
    })
}

/// [`manifest_json`] encoded as bytes.
pub fn manifest_bytes(nodes: usize) -> Vec<u8> {
    manifest_json(nodes).to_string().into_bytes()
}
