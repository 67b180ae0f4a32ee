//! # Shared Types Crate
//!
//! Ledger entities shared by every subsystem that reads or writes the round
//! graph: amounts, scripts, transactions, snapshots and rounds.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All persisted record types are defined here.
//! - **Canonical Encoding**: Content hashes are taken over bincode bytes of
//!   the record, never over an ad-hoc byte layout.
//! - **Immutable Records**: Records are built once and handed to storage;
//!   nothing in this crate mutates a record after its hash is computed.

pub mod amount;
pub mod entities;
pub mod errors;
pub mod script;

pub use amount::{Integer, PRECISION};
pub use entities::*;
pub use errors::*;
pub use script::{bft_threshold, Script, OPERATOR_CMP, OPERATOR_SUM};
