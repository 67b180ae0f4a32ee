//! # Quantum-Chain Node Runtime
//!
//! The main entry point for the Quantum-Chain node.
//!
//! ## Startup Sequence
//!
//! 1. Install logging (`quantum-telemetry`)
//! 2. Load configuration from the environment
//! 3. Open the ledger in the data directory
//! 4. Apply the genesis manifest if the ledger is empty
//!
//! A ledger that belongs to a different network aborts startup.

use anyhow::{Context, Result};
use node_runtime::{initialize_genesis, NodeConfig, NodeContainer};
use quantum_telemetry::{init_telemetry, TelemetryConfig};
use tracing::{error, info};

fn run() -> Result<()> {
    info!("===========================================");
    info!("  Quantum-Chain Node Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = NodeConfig::from_env().context("Failed to load node configuration")?;
    let container = NodeContainer::new(config).context("Failed to open ledger store")?;
    let outcome = initialize_genesis(&container)?;

    info!(
        network_id = %outcome.network_id,
        node_id = %outcome.id_for_network,
        data_dir = %container.config.storage.data_dir.display(),
        "Node bootstrap complete"
    );
    Ok(())
}

fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .context("Failed to initialize telemetry")?;

    if let Err(e) = run() {
        error!("Node startup failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}
