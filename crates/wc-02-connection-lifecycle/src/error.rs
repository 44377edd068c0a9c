//! Error types for the connection lifecycle

use shared_types::BackendError;
use thiserror::Error;
use wc_01_wallet_registry::RegistryError;

/// Errors raised by the connection lifecycle manager.
///
/// Backend errors pass through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Wallet selector is not set up; call and await setup() first")]
    SetupNotCalled,

    #[error("Wallet connection not received after {timeout_ms}ms")]
    ConnectionTimeout { timeout_ms: u64 },

    #[error("Connection attempt superseded by a newer connect()")]
    ConnectionCancelled,

    /// Unsupported wallet identifier or a registry misconfiguration.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to get verified owner")]
    VerificationFailed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Result type for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;
