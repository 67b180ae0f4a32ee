//! # Quantum-Chain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks
//! │   └── genesis_benchmarks.rs
//! └── src/integration/  # Cross-crate flows
//!     ├── genesis_bootstrap.rs
//!     └── node_startup.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # By category
//! cargo test -p qc-tests integration::
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

pub mod integration;
