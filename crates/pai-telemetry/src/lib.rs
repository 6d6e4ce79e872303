//! # Pai Telemetry
//!
//! Structured logging for Pai-Chain processes.
//!
//! Libraries only emit `tracing` events; binaries install the subscriber once
//! at startup:
//!
//! ```rust,ignore
//! use pai_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PAI_SERVICE_NAME` | `pai-chain` | Service name attached to the startup event |
//! | `PAI_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `PAI_JSON_LOGS` | `false` | Emit JSON lines instead of pretty text |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber was already installed.
    #[error("Failed to install subscriber: {0}")]
    Install(String),
}

/// Log a transaction-related event with standard fields.
///
/// ```rust,ignore
/// log_tx_event!(info, "chaincode", "Invocation dispatched", tx_id, function = %name);
/// ```
#[macro_export]
macro_rules! log_tx_event {
    ($level:ident, $component:expr, $msg:expr, $tx_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            tx_id = %$tx_id,
            $($($field)*,)?
            $msg
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_service_name() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "pai-chain");
    }

    #[test]
    fn test_log_tx_event_expands() {
        // No subscriber installed: the event is dropped, but the macro must expand.
        let tx_id = "tx-1";
        log_tx_event!(info, "test", "expanded", tx_id, amount = 5);
        log_tx_event!(warn, "test", "expanded without fields", tx_id);
    }
}
