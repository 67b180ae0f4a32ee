//! # Amounts
//!
//! Fixed-point, non-negative amounts with 8 decimal places.
//!
//! Parsed from decimal strings (`"10000"`, `"10000.5"`, `"10000.00000000"`)
//! and always rendered canonically with all 8 decimals, so two equal amounts
//! always serialize to the same bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::TypesError;

/// Number of decimal places.
pub const PRECISION: usize = 8;

const UNIT: u128 = 100_000_000;

/// Fixed-point amount in units of 10⁻⁸.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(u128);

impl Integer {
    /// Whole amount (no fractional part).
    pub const fn new(whole: u64) -> Self {
        Self(whole as u128 * UNIT)
    }

    /// From raw 10⁻⁸ units.
    pub const fn from_units(units: u128) -> Self {
        Self(units)
    }

    /// Raw 10⁻⁸ units.
    pub const fn units(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:08}", self.0 / UNIT, self.0 % UNIT)
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self)
    }
}

impl FromStr for Integer {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TypesError::InvalidAmount {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected decimal digits"));
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected decimal digits"));
        }
        if frac.len() > PRECISION {
            return Err(invalid("more than 8 decimal places"));
        }

        let whole: u128 = whole.parse().map_err(|_| invalid("overflow"))?;
        let mut padded = frac.to_string();
        padded.extend(std::iter::repeat('0').take(PRECISION - frac.len()));
        let frac: u128 = padded.parse().map_err(|_| invalid("overflow"))?;

        whole
            .checked_mul(UNIT)
            .and_then(|units| units.checked_add(frac))
            .map(Integer)
            .ok_or_else(|| invalid("overflow"))
    }
}

impl Serialize for Integer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
