//! Error types for the wallet registry

use crate::domain::WalletId;
use thiserror::Error;

/// Errors that can occur while resolving wallet identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Unsupported wallet type: {0}")]
    UnsupportedWallet(String),

    #[error("Wallet already registered: {0}")]
    DuplicateEntry(WalletId),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
