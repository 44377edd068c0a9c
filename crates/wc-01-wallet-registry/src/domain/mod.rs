//! Domain layer for the wallet registry
//!
//! Pure lookup logic, no I/O.

mod modules;
mod registry;
mod wallet_id;

pub use modules::{
    hosted_wallet_url, setup_bitte_wallet, setup_here_wallet, setup_hot_wallet,
    setup_intear_wallet, setup_meteor_wallet, setup_my_near_wallet, setup_okx_wallet,
    BITTE_MAINNET_URL, BITTE_TESTNET_URL, MY_NEAR_WALLET_URL,
};
pub use registry::{
    SetupFn, WalletOverrides, WalletRegistry, WalletRegistryEntry, DEFAULT_BITTE_WALLETS,
    DEFAULT_SUPPORTED_WALLETS,
};
pub use wallet_id::WalletId;
