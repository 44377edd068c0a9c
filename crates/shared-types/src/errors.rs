//! # Error Types
//!
//! Errors raised by wallet backends and the selector they sit behind.
//! Backend errors propagate unmodified through the lifecycle manager.

use thiserror::Error;

/// Errors reported by a wallet backend or selector implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The user or the wallet rejected the request.
    #[error("Wallet rejected request: {0}")]
    Rejected(String),

    /// No wallet is currently selected in the selector.
    #[error("No wallet selected")]
    NoActiveWallet,

    /// The wallet backend could not be reached or initialised.
    #[error("Wallet unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("{0}")]
    Other(String),
}

/// A network name that is neither `mainnet` nor `testnet`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown network: {0}")]
pub struct UnknownNetwork(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_messages() {
        assert!(BackendError::Rejected("user closed".into())
            .to_string()
            .contains("user closed"));
        assert_eq!(BackendError::NoActiveWallet.to_string(), "No wallet selected");
        assert_eq!(BackendError::Other("boom".into()).to_string(), "boom");
    }
}
