//! # Wallet Telemetry
//!
//! Logging and metrics for the wallet connection workspace.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wallet_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(&TelemetryConfig::from_env()).expect("telemetry init");
//!     // Lifecycle counters are now exported through `encode_metrics()`
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WC_SERVICE_NAME` | `wallet-connect` | Service name in log lines |
//! | `WC_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `WC_CONSOLE_OUTPUT` | `true` | Print logs to stdout |
//! | `WC_JSON_LOGS` | `false` | JSON formatted logs |

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, ACCOUNT_UPDATES, CONNECT_ATTEMPTS, REGISTRY, SETUPS,
    SIGN_REQUESTS,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install the global tracing subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_tracing(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
