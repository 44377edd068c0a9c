//! Prometheus metrics for the wallet connection lifecycle.
//!
//! All metrics follow the naming convention: `wc_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Selector setups performed
    pub static ref SETUPS: Counter = Counter::new(
        "wc_setup_total",
        "Total number of wallet selector setups"
    ).expect("metric creation failed");

    /// Connection attempts by outcome
    pub static ref CONNECT_ATTEMPTS: CounterVec = CounterVec::new(
        Opts::new("wc_connect_attempts_total", "Wallet connection attempts"),
        &["outcome"]  // outcome: connected/timeout/cancelled/error
    ).expect("metric creation failed");

    /// Distinct account-list changes delivered to subscribers
    pub static ref ACCOUNT_UPDATES: Counter = Counter::new(
        "wc_account_updates_total",
        "Total account-state changes delivered to subscribers"
    ).expect("metric creation failed");

    /// Ownership-proof requests by result
    pub static ref SIGN_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("wc_sign_requests_total", "Ownership proof requests"),
        &["result"]  // result: signed/empty/error
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling it twice fails with `TelemetryError::MetricsInit`.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(SETUPS.clone()),
        Box::new(CONNECT_ATTEMPTS.clone()),
        Box::new(ACCOUNT_UPDATES.clone()),
        Box::new(SIGN_REQUESTS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
