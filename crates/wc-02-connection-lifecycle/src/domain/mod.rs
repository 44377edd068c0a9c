//! Domain layer for the connection lifecycle
//!
//! Configuration, the handshake state machine and account change
//! detection. No I/O.

mod accounts;
mod config;
mod handshake;

pub use accounts::DistinctAccounts;
pub use config::{
    HandshakeConfig, SetupConfig, SetupConfigBuilder, WalletSelection,
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_POLL_INTERVAL,
};
pub use handshake::HandshakeState;
