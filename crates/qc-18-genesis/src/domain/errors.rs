//! # Domain Errors
//!
//! Error types for Genesis Bootstrap. Every error is terminal: the loader
//! never retries and never applies a partial genesis.

use std::fmt;

use shared_crypto::{Address, CryptoError, Hash, Key};
use shared_types::{Integer, TypesError};
use thiserror::Error;

/// Which identity of a node entry a key check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// The consensus signer identity.
    Signer,
    /// The reward payee identity.
    Payee,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Signer => write!(f, "signer"),
            KeyRole::Payee => write!(f, "payee"),
        }
    }
}

/// Manifest parsed but breaks a genesis policy rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    /// Fewer nodes than the BFT minimum.
    #[error("Insufficient genesis nodes: {count}/{minimum}")]
    InsufficientNodes {
        /// Nodes in the manifest
        count: usize,
        /// Required minimum
        minimum: usize,
    },

    /// More nodes than the threshold operand can express.
    #[error("Too many genesis nodes: {count}/{maximum}")]
    TooManyNodes {
        /// Nodes in the manifest
        count: usize,
        /// Allowed maximum
        maximum: usize,
    },

    /// Node balance is not the pledge amount.
    #[error("Invalid pledge for genesis node {index} ({signer}): {balance}, expected {expected}")]
    InvalidNodePledge {
        /// Position in the manifest
        index: usize,
        /// Node signer
        signer: Address,
        /// Declared balance
        balance: Integer,
        /// Required pledge
        expected: Integer,
    },

    /// Signer appears twice among the node entries.
    #[error("Duplicated genesis node signer {signer} at index {index}")]
    DuplicateSigner {
        /// Position of the repeated entry
        index: usize,
        /// Repeated signer
        signer: Address,
    },

    /// Domain list does not have exactly one entry.
    #[error("Invalid genesis domain count {count}, expected 1")]
    InvalidDomainCount {
        /// Domains in the manifest
        count: usize,
    },

    /// Domain signer is not the first node's signer.
    #[error("Invalid genesis domain signer {domain_signer}, expected first node signer {first_node_signer}")]
    DomainSignerMismatch {
        /// Declared domain signer
        domain_signer: Address,
        /// Signer of node 0
        first_node_signer: Address,
    },

    /// Domain balance is not the domain pledge amount.
    #[error("Invalid genesis domain pledge {balance}, expected {expected}")]
    InvalidDomainPledge {
        /// Declared balance
        balance: Integer,
        /// Required pledge
        expected: Integer,
    },
}

/// Errors from the storage port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Filesystem failure.
    #[error("Storage I/O error: {message}")]
    Io {
        /// Underlying error
        message: String,
    },

    /// Persisted data could not be decoded.
    #[error("Storage corrupted: {message}")]
    Corrupted {
        /// What failed to decode
        message: String,
    },

    /// Records could not be encoded.
    #[error("Storage serialization error: {message}")]
    Serialization {
        /// Underlying error
        message: String,
    },

    /// Another writer committed genesis first.
    #[error("Genesis already loaded")]
    GenesisAlreadyLoaded,

    /// The data directory lock could not be taken.
    #[error("Storage lock error: {message}")]
    Lock {
        /// Underlying error
        message: String,
    },

    /// Backend-specific failure.
    #[error("Storage backend error: {message}")]
    Backend {
        /// Underlying error
        message: String,
    },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io {
            message: err.to_string(),
        }
    }
}

/// Genesis Bootstrap errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    /// Manifest unreadable or not the expected document shape.
    #[error("Invalid genesis manifest: {message}")]
    ManifestFormat {
        /// What is wrong
        message: String,
    },

    /// An identity string does not parse.
    #[error("Invalid genesis address at {field}: {source}")]
    InvalidAddress {
        /// Manifest location, e.g. `nodes[3].payee`
        field: String,
        /// Parse failure
        #[source]
        source: CryptoError,
    },

    /// Manifest breaks a policy rule.
    #[error("Genesis policy violation: {0}")]
    Policy(#[from] PolicyViolation),

    /// View key is not derived from the spend key.
    #[error("Invalid {role} key format {address}: expected view key {expected}, found {actual}")]
    KeyConsistency {
        /// Which identity failed
        role: KeyRole,
        /// The offending address
        address: Address,
        /// Derived view key
        expected: Key,
        /// View key carried by the address
        actual: Key,
    },

    /// The store was initialized for a different network.
    #[error("Invalid genesis for network {stored}, manifest is network {computed}")]
    NetworkIdentityMismatch {
        /// Network id found in the store
        stored: Hash,
        /// Network id of the manifest
        computed: Hash,
    },

    /// Ledger record construction failed.
    #[error("Genesis record encoding failed: {0}")]
    Encoding(#[from] TypesError),

    /// Key derivation failed.
    #[error("Genesis key derivation failed: {0}")]
    Crypto(#[from] CryptoError),

    /// Propagated from the storage port.
    #[error("Genesis storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl GenesisError {
    /// Shorthand for a manifest format error.
    pub fn manifest(message: impl Into<String>) -> Self {
        GenesisError::ManifestFormat {
            message: message.into(),
        }
    }
}
