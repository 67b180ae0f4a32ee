//! # Addresses
//!
//! An address is a public spend key plus a public view key.
//!
//! ## String Format
//!
//! ```text
//! "QC" ‖ hex(spend ‖ view ‖ checksum)      checksum = H("QC" ‖ spend ‖ view)[..4]
//! ```
//!
//! Parsing only checks the encoding (prefix, length, checksum, curve points).
//! Whether the view key is the deterministic derivation of the spend key is a
//! separate check, see [`Address::has_derived_view_key`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{CryptoError, Hash, Key};

/// Address string prefix.
pub const ADDRESS_PREFIX: &str = "QC";

const CHECKSUM_LEN: usize = 4;
const PAYLOAD_LEN: usize = 32 + 32 + CHECKSUM_LEN;

/// Public spend/view key pair identifying an account or node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    /// Public spend key.
    pub public_spend_key: Key,
    /// Public view key.
    pub public_view_key: Key,
}

impl Address {
    /// Create from explicit keys.
    pub fn new(public_spend_key: Key, public_view_key: Key) -> Self {
        Self {
            public_spend_key,
            public_view_key,
        }
    }

    /// Create from a spend key, deriving the view key deterministically.
    pub fn from_spend_key(public_spend_key: Key) -> Self {
        let public_view_key = public_spend_key.deterministic_hash_derive().public();
        Self::new(public_spend_key, public_view_key)
    }

    /// View key expected for this address' spend key.
    pub fn derived_view_key(&self) -> Key {
        self.public_spend_key.deterministic_hash_derive().public()
    }

    /// Whether the view key matches the spend key's deterministic derivation.
    pub fn has_derived_view_key(&self) -> bool {
        self.derived_view_key() == self.public_view_key
    }

    /// `H(spend ‖ view)`.
    pub fn hash(&self) -> Hash {
        Hash::from_parts(&[
            self.public_spend_key.as_bytes(),
            self.public_view_key.as_bytes(),
        ])
    }

    fn checksum(spend: &[u8], view: &[u8]) -> [u8; CHECKSUM_LEN] {
        let digest = Hash::from_parts(&[ADDRESS_PREFIX.as_bytes(), spend, view]);
        let mut checksum = [0u8; CHECKSUM_LEN];
        checksum.copy_from_slice(&digest.as_bytes()[..CHECKSUM_LEN]);
        checksum
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spend = self.public_spend_key.as_bytes();
        let view = self.public_view_key.as_bytes();
        let mut payload = Vec::with_capacity(PAYLOAD_LEN);
        payload.extend_from_slice(spend);
        payload.extend_from_slice(view);
        payload.extend_from_slice(&Self::checksum(spend, view));
        write!(f, "{}{}", ADDRESS_PREFIX, hex::encode(payload))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CryptoError::InvalidAddress {
            address: s.to_string(),
            reason: reason.to_string(),
        };

        let encoded = s
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or_else(|| invalid("missing prefix"))?;
        let payload = hex::decode(encoded).map_err(|e| invalid(&e.to_string()))?;
        if payload.len() != PAYLOAD_LEN {
            return Err(invalid(&format!(
                "expected {} payload bytes, got {}",
                PAYLOAD_LEN,
                payload.len()
            )));
        }

        let (spend, rest) = payload.split_at(32);
        let (view, checksum) = rest.split_at(32);
        if checksum != Self::checksum(spend, view) {
            return Err(invalid("checksum mismatch"));
        }

        let public_spend_key = Key::from_slice(spend).map_err(|e| invalid(&e.to_string()))?;
        let public_view_key = Key::from_slice(view).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self::new(public_spend_key, public_view_key))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
