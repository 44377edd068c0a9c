//! # Shared Bus - Selector State Store
//!
//! The reactive store a wallet selector sits on. Readers take snapshots,
//! subscribers receive every state change in the order it was written.
//!
//! ```text
//! ┌──────────────┐   update()    ┌──────────────┐   subscribe()   ┌──────────────┐
//! │   Selector   │ ────────────► │  State Store │ ──────────────► │  Lifecycle   │
//! │   backend    │               │              │   get_state()   │  manager     │
//! └──────────────┘               └──────────────┘ ◄────────────── └──────────────┘
//! ```
//!
//! A new subscription yields the current state first, so a subscriber never
//! misses the state that was live when it attached.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod publisher;
pub mod state;
pub mod subscriber;

// Re-export main types
pub use publisher::{InMemoryStateStore, StatePublisher};
pub use state::SelectorState;
pub use subscriber::{StateStream, StateSubscription, SubscriptionError};

/// Maximum states to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
