//! # Ed25519 Group Keys
//!
//! Public keys are compressed Edwards points, private keys are scalars.
//! Unlike `ed25519-dalek` signing keys, these are raw group elements so they
//! can take part in Diffie-Hellman style derivations (view keys, one-time
//! output keys).

use std::fmt;

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::{CryptoError, Hash};

/// Compressed public key (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key([u8; 32]);

impl Key {
    /// Create from bytes, rejecting anything that is not a curve point.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let key = Self(bytes);
        key.to_point()?;
        Ok(key)
    }

    /// Create from a byte slice of length 32.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: 32,
                actual: bytes.len(),
            })?;
        Self::from_bytes(bytes)
    }

    pub(crate) fn from_point(point: &EdwardsPoint) -> Self {
        Self(point.compress().to_bytes())
    }

    /// Decompress into a curve point.
    pub fn to_point(&self) -> Result<EdwardsPoint, CryptoError> {
        CompressedEdwardsY(self.0)
            .decompress()
            .ok_or_else(|| CryptoError::InvalidPublicKey(hex::encode(self.0)))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derive a private key from this public key: `seed = H(key)`, scalar from
    /// `seed ‖ seed`.
    ///
    /// A well-formed address has `view = derive(spend).public()`.
    pub fn deterministic_hash_derive(&self) -> PrivateKey {
        let seed = Hash::new(&self.0);
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(seed.as_bytes());
        wide[32..].copy_from_slice(seed.as_bytes());
        let key = PrivateKey::from_seed(&wide);
        wide.zeroize();
        key
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", hex::encode(self.0))
    }
}

/// Private scalar. Zeroized on drop.
#[derive(Clone)]
pub struct PrivateKey {
    scalar: Scalar,
}

impl PrivateKey {
    /// Reduce 64 uniform bytes to a scalar.
    pub fn from_seed(seed: &[u8; 64]) -> Self {
        Self {
            scalar: Scalar::from_bytes_mod_order_wide(seed),
        }
    }

    pub(crate) fn from_scalar(scalar: Scalar) -> Self {
        Self { scalar }
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.scalar
    }

    /// Public key `x·G`.
    pub fn public(&self) -> Key {
        Key::from_point(&EdwardsPoint::mul_base(&self.scalar))
    }

    /// Canonical scalar bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.scalar.to_bytes()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
    }
}
