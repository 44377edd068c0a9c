//! # Wallet-Connect Test Suite
//!
//! Cross-crate flows driven through the in-memory selector, wallet and
//! modal adapters.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── setup_flow.rs         # registry → lifecycle setup
//!     ├── connect_flow.rs       # context → handshake → proofs
//!     └── subscription_flow.rs  # store → subscribers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wc-tests
//! cargo test -p wc-tests integration::connect_flow
//! ```

pub mod integration;
