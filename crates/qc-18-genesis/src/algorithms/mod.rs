//! # Algorithms Module
//!
//! Genesis construction, in the order the loader runs it:
//! validate the manifest, build the pledge transactions, build the round graph.

pub mod round_graph;
pub mod stealth;
pub mod validator;

pub use round_graph::{RoundGraph, RoundGraphBuilder, RoundRing};
pub use stealth::{
    GenesisTransactions, StealthTransactionFactory, DOMAIN_ACCEPT_TAG, NODE_ACCEPT_TAG,
};
pub use validator::GenesisValidator;
