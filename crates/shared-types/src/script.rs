//! # Threshold Scripts
//!
//! An output script is a tiny stack program evaluated by the execution engine.
//! The only form produced here is the signature-weight comparator:
//!
//! ```text
//! [OPERATOR_CMP, OPERATOR_SUM, threshold]
//! ```
//!
//! meaning "the summed weight of collected signatures over the output keys
//! must reach `threshold`".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// Compare the accumulator against the operand.
pub const OPERATOR_CMP: u8 = 0xff;

/// Sum the weight of collected signatures.
pub const OPERATOR_SUM: u8 = 0xfe;

/// Byzantine quorum over `keys` participants: `⌊2·keys/3⌋ + 1`.
pub fn bft_threshold(keys: usize) -> usize {
    keys * 2 / 3 + 1
}

/// Opaque authorization script.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Script(Vec<u8>);

impl Script {
    /// Wrap raw script bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// `[CMP, SUM, threshold]`.
    pub fn new_threshold(threshold: u8) -> Self {
        Self(vec![OPERATOR_CMP, OPERATOR_SUM, threshold])
    }

    /// BFT quorum script over `keys` participants.
    pub fn bft_quorum(keys: usize) -> Result<Self, TypesError> {
        let threshold = bft_threshold(keys);
        let operand = u8::try_from(threshold).map_err(|_| TypesError::ThresholdOverflow {
            keys,
            threshold,
            max: u8::MAX as usize,
        })?;
        Ok(Self::new_threshold(operand))
    }

    /// Threshold operand if this is a comparator-over-sum script.
    pub fn threshold(&self) -> Option<u8> {
        match self.0.as_slice() {
            [OPERATOR_CMP, OPERATOR_SUM, threshold] => Some(*threshold),
            _ => None,
        }
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({:02x?})", self.0)
    }
}
