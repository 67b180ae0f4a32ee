//! # Domain Module
//!
//! Core domain types for Genesis Bootstrap.

pub mod errors;
pub mod invariants;
pub mod manifest;
pub mod round;
pub mod value_objects;

pub use errors::*;
pub use invariants::*;
pub use manifest::*;
pub use round::{CacheRound, FinalRound};
pub use value_objects::*;
