//! # Shared Crypto - Ledger Key Primitives
//!
//! ## Components
//!
//! | Module | Primitive | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA3-256 | Content hashes, network and node identifiers |
//! | `keys` | Ed25519 group | Public/private keys, deterministic view keys |
//! | `ghost` | Stealth addressing | One-time output keys |
//! | `address` | Spend + view key | Account and node identities |
//!
//! ## Security Properties
//!
//! - Private scalars are zeroized on drop
//! - Public keys are validated as curve points on construction and parse
//! - Address strings carry a 4-byte checksum

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod errors;
pub mod ghost;
pub mod hashing;
pub mod keys;

// Re-exports
pub use address::{Address, ADDRESS_PREFIX};
pub use errors::CryptoError;
pub use ghost::{derive_ghost_private_key, derive_ghost_public_key, view_ghost_output_key};
pub use hashing::Hash;
pub use keys::{Key, PrivateKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
