//! Adapters layer: in-memory implementations of the outbound ports.

mod in_memory;

pub use in_memory::{
    HeadlessModal, HeadlessModalFactory, InMemorySelectorFactory, InMemoryWallet,
    InMemoryWalletSelector,
};
