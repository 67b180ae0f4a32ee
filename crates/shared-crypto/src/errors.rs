//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Bytes do not decode to a point on the curve
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Hex decoding failed
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    /// Address string is malformed
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress {
        /// Offending address string
        address: String,
        /// What was wrong with it
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_address_error() {
        let err = CryptoError::InvalidAddress {
            address: "QCxyz".to_string(),
            reason: "bad checksum".to_string(),
        };
        assert!(err.to_string().contains("QCxyz"));
        assert!(err.to_string().contains("bad checksum"));
    }

    #[test]
    fn test_invalid_key_length_error() {
        let err = CryptoError::InvalidKeyLength {
            expected: 32,
            actual: 31,
        };
        assert!(err.to_string().contains("expected 32, got 31"));
    }
}
