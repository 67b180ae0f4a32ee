//! # Quantum Telemetry
//!
//! Structured logging for Quantum-Chain nodes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // tracing events are now written to the console
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `quantum-chain` | Service name in logs |
//! | `QC_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `QC_JSON_LOGS` | `false` (`true` in containers) | JSON output |
//! | `QC_CONSOLE_OUTPUT` | `true` | Write to the console at all |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::env_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    /// Configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install structured logging.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}

/// Guard that marks the logging lifetime. Logs shutdown on drop.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "quantum-chain");
    }

    #[test]
    fn test_init_twice_fails() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };
        let first = init_telemetry(config.clone());
        assert!(first.is_ok());
        assert!(matches!(
            init_telemetry(config),
            Err(TelemetryError::SubscriberInit(_))
        ));
    }
}
