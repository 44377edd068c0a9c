//! # WC-03 Wallet Context
//!
//! Reactive facade for UI code. Mounting a [`WalletContext`] sets up the
//! selector through the lifecycle service, follows the selected wallet's
//! accounts and publishes a [`WalletContextSnapshot`] on every change.
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wc_03_wallet_context::{ContextProps, WalletContext};
//!
//! let context = WalletContext::mount(service, ContextProps::new(Network::Testnet)).await;
//! let mut updates = context.watch();
//!
//! context.connect().await?;
//! updates.changed().await?;
//! println!("active: {:?}", updates.borrow().active_account_id);
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod error;
pub mod service;

pub use domain::{ContextProps, WalletContextSnapshot};
pub use error::{ContextError, ContextResult};
pub use service::WalletContext;
