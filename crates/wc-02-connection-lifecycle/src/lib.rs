//! # WC-02 Connection Lifecycle
//!
//! Sets up the wallet selector and its modal, runs the polling handshake
//! that turns a modal interaction into a list of accounts, forwards account
//! changes to subscribers and requests ownership proofs from the selected
//! wallet.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  WalletConnectionService                   │
//! │  setup ──► SelectorFactory ──► ModalFactory                │
//! │  connect ──► modal.show ──► HandshakeState (poll/timeout)  │
//! │  subscribe ──► StateSubscription ──► DistinctAccounts      │
//! │  sign_message ──► selector.wallet().verify_owner           │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wc_02_connection_lifecycle::{
//!     HeadlessModalFactory, InMemorySelectorFactory, SetupConfig, WalletConnectionApi,
//!     WalletConnectionService,
//! };
//!
//! let service = WalletConnectionService::with_defaults(
//!     Arc::new(InMemorySelectorFactory::new()),
//!     Arc::new(HeadlessModalFactory::new()),
//! );
//! service.setup(SetupConfig::default()).await?;
//! let accounts = service.connect().await?;
//! ```
//!
//! ## Guarantees
//!
//! - At most one handshake is pending; a newer `connect` cancels the older one.
//! - Re-running `setup` disposes the previous selector, hides its modal and
//!   stops the account subscriptions made against it.
//! - Subscribers never see the same account list twice in a row.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{
    HeadlessModal, HeadlessModalFactory, InMemorySelectorFactory, InMemoryWallet,
    InMemoryWalletSelector,
};
pub use domain::{
    DistinctAccounts, HandshakeConfig, HandshakeState, SetupConfig, SetupConfigBuilder,
    WalletSelection, DEFAULT_CONNECTION_TIMEOUT, DEFAULT_POLL_INTERVAL,
};
pub use error::{LifecycleError, LifecycleResult};
pub use ports::{
    AccountsCallback, HideListener, ModalFactory, ModalOptions, SelectionModal,
    SelectorComponents, SelectorFactory, SelectorOptions, Wallet, WalletConnectionApi,
    WalletSelector,
};
pub use service::{AccountsSubscription, PendingConnection, WalletConnectionService};
