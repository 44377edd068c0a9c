//! Error types for the wallet context.

use thiserror::Error;
use wc_02_connection_lifecycle::LifecycleError;

/// Wallet context errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContextError {
    /// The context was unmounted.
    #[error("Wallet context is not mounted")]
    NotMounted,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

pub type ContextResult<T> = Result<T, ContextError>;
