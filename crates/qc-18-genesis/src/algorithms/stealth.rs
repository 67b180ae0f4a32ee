//! # Stealth Pledge Transactions
//!
//! Builds one node-acceptance transaction per genesis node and one
//! domain-acceptance transaction. Every output pays all genesis signers
//! through one-time keys, locked by a BFT quorum script.
//!
//! ## Ephemeral Secret
//!
//! ```text
//! seed = H(subject_address_string ‖ tag)      tag ∈ {NODEACCEPT, DOMAINACCEPT}
//! r    = scalar(seed ‖ seed)                  mask R = r·G
//! P_i  = Hs(r·A_i ‖ 0)·G + B_i                for each signer (A_i, B_i)
//! ```
//!
//! The secret depends only on public data, so every node rebuilds
//! byte-identical transactions.

use shared_crypto::{derive_ghost_public_key, Address, Hash, Key, PrivateKey};
use shared_types::{
    native_asset_id, Input, Integer, Output, OutputType, Script, SignedTransaction, Transaction,
    TX_VERSION,
};

use crate::domain::{
    DomainEntry, Genesis, GenesisError, NetworkId, NodeEntry, DOMAIN_PLEDGE_AMOUNT,
    NODE_PLEDGE_AMOUNT,
};

/// Seed tag of node-acceptance masks.
pub const NODE_ACCEPT_TAG: &str = "NODEACCEPT";

/// Seed tag of domain-acceptance masks.
pub const DOMAIN_ACCEPT_TAG: &str = "DOMAINACCEPT";

/// Output index every genesis one-time key is derived for.
const GENESIS_OUTPUT_INDEX: u64 = 0;

/// The acceptance transactions of a genesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisTransactions {
    /// Node acceptances, in manifest order.
    pub nodes: Vec<SignedTransaction>,
    /// The domain acceptance.
    pub domain: SignedTransaction,
}

impl GenesisTransactions {
    /// All transactions, nodes first.
    pub fn into_vec(self) -> Vec<SignedTransaction> {
        let mut all = self.nodes;
        all.push(self.domain);
        all
    }
}

/// Factory for genesis pledge transactions.
pub struct StealthTransactionFactory<'a> {
    genesis: &'a Genesis,
    network_id: NetworkId,
    script: Script,
}

impl<'a> StealthTransactionFactory<'a> {
    /// Factory for `genesis`. The quorum script is fixed by the node count.
    pub fn new(genesis: &'a Genesis) -> Result<Self, GenesisError> {
        Ok(Self {
            genesis,
            network_id: genesis.network_id(),
            script: Script::bft_quorum(genesis.nodes().len())?,
        })
    }

    /// Ephemeral secret for `subject` under `tag`.
    pub fn ephemeral_key(subject: &Address, tag: &str) -> PrivateKey {
        let seed = Hash::new(format!("{}{}", subject, tag).as_bytes());
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(seed.as_bytes());
        wide[32..].copy_from_slice(seed.as_bytes());
        PrivateKey::from_seed(&wide)
    }

    /// Quorum script shared by every output.
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Build every acceptance transaction.
    pub fn build(&self) -> Result<GenesisTransactions, GenesisError> {
        let nodes = self
            .genesis
            .nodes()
            .iter()
            .map(|node| self.node_acceptance(node))
            .collect::<Result<Vec<_>, _>>()?;
        let domain = self.domain_acceptance(self.genesis.domain())?;
        Ok(GenesisTransactions { nodes, domain })
    }

    /// Node-acceptance transaction; extra is `signer.spend ‖ payee.spend`.
    pub fn node_acceptance(&self, node: &NodeEntry) -> Result<SignedTransaction, GenesisError> {
        let ephemeral = Self::ephemeral_key(&node.signer, NODE_ACCEPT_TAG);
        let mut extra = Vec::with_capacity(64);
        extra.extend_from_slice(node.signer.public_spend_key.as_bytes());
        extra.extend_from_slice(node.payee.public_spend_key.as_bytes());
        self.acceptance(
            &ephemeral,
            OutputType::NodeAccept,
            NODE_PLEDGE_AMOUNT,
            extra,
        )
    }

    /// Domain-acceptance transaction; extra is `signer.spend`.
    pub fn domain_acceptance(
        &self,
        domain: &DomainEntry,
    ) -> Result<SignedTransaction, GenesisError> {
        let ephemeral = Self::ephemeral_key(&domain.signer, DOMAIN_ACCEPT_TAG);
        let extra = domain.signer.public_spend_key.as_bytes().to_vec();
        self.acceptance(
            &ephemeral,
            OutputType::DomainAccept,
            DOMAIN_PLEDGE_AMOUNT,
            extra,
        )
    }

    fn acceptance(
        &self,
        ephemeral: &PrivateKey,
        output_type: OutputType,
        amount: Integer,
        extra: Vec<u8>,
    ) -> Result<SignedTransaction, GenesisError> {
        let output = Output {
            output_type,
            amount,
            keys: self.one_time_keys(ephemeral)?,
            script: self.script.clone(),
            mask: ephemeral.public(),
        };
        Ok(SignedTransaction::unsigned(Transaction {
            version: TX_VERSION,
            asset: native_asset_id(),
            inputs: vec![Input::Genesis(self.network_id)],
            outputs: vec![output],
            extra,
        }))
    }

    fn one_time_keys(&self, ephemeral: &PrivateKey) -> Result<Vec<Key>, GenesisError> {
        self.genesis
            .nodes()
            .iter()
            .map(|node| {
                derive_ghost_public_key(
                    ephemeral,
                    &node.signer.public_view_key,
                    &node.signer.public_spend_key,
                    GENESIS_OUTPUT_INDEX,
                )
                .map_err(GenesisError::from)
            })
            .collect()
    }
}
