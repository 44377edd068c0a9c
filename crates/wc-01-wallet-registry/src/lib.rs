//! # WC-01 Wallet Registry
//!
//! Maps wallet identifiers to the setup functions that produce wallet
//! modules for the selector.
//!
//! ## Usage Example
//!
//! ```ignore
//! use wc_01_wallet_registry::{WalletId, WalletRegistry, WalletOverrides};
//! use shared_types::WalletSetupOptions;
//!
//! let registry = WalletRegistry::builtin();
//!
//! let mut overrides = WalletOverrides::new();
//! overrides.insert(WalletId::Bitte, WalletSetupOptions::with_wallet_url("https://wallet.bitte.ai"));
//!
//! let modules = registry.build(&[WalletId::Bitte, WalletId::Meteor], Some(&overrides))?;
//! assert_eq!(modules.len(), 2);
//! ```
//!
//! ## Guarantees
//!
//! - Output order and length match the requested identifiers.
//! - An unknown identifier fails the whole call before any setup function runs.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::{RegistryError, RegistryResult};
