//! # Shared Types Crate
//!
//! Entities and contracts shared by every wallet-connect crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: account state, ownership proofs and the
//!   wallet module contract are defined once, here.
//! - **Opaque Backends**: nothing in this crate knows how a wallet talks to
//!   the chain; `WalletModule` is metadata plus options.

pub mod entities;
pub mod errors;
pub mod wallet_module;

pub use entities::*;
pub use errors::*;
pub use wallet_module::*;
