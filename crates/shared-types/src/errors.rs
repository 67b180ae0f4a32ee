//! # Error Types
//!
//! Errors raised while constructing or encoding ledger entities.

use thiserror::Error;

/// Errors from ledger entity construction and encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Amount string is not a non-negative decimal with at most 8 places.
    #[error("Invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },

    /// The quorum threshold does not fit the one-byte script operand.
    #[error("Threshold {threshold} for {keys} keys exceeds script operand limit {max}")]
    ThresholdOverflow {
        keys: usize,
        threshold: usize,
        max: usize,
    },

    /// Canonical encoding failed.
    #[error("Encoding failed: {0}")]
    Encoding(String),
}

impl From<bincode::Error> for TypesError {
    fn from(err: bincode::Error) -> Self {
        TypesError::Encoding(err.to_string())
    }
}
