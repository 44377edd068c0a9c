//! Setup functions for the built-in wallets.
//!
//! Each function turns a set of options into a wallet module the selector
//! can load. Browser wallets carry their hosted UI location in the module
//! metadata; an explicit `wallet_url` option always wins over the default.

use shared_types::{
    ModuleDescriptor, Network, WalletKind, WalletMetadata, WalletModuleFactory, WalletSetupOptions,
};

use super::WalletId;

/// Hosted Bitte wallet on mainnet.
pub const BITTE_MAINNET_URL: &str = "https://wallet.bitte.ai";

/// Hosted Bitte wallet on testnet.
pub const BITTE_TESTNET_URL: &str = "https://testnet.wallet.bitte.ai/";

/// Hosted MyNearWallet.
pub const MY_NEAR_WALLET_URL: &str = "https://app.mynearwallet.com";

/// Hosted primary wallet UI for `network`.
#[must_use]
pub fn hosted_wallet_url(network: Network) -> &'static str {
    match network {
        Network::Mainnet => BITTE_MAINNET_URL,
        Network::Testnet => BITTE_TESTNET_URL,
    }
}

fn module(
    id: WalletId,
    metadata: WalletMetadata,
    options: WalletSetupOptions,
    default_url: Option<&str>,
) -> WalletModuleFactory {
    let url = options.wallet_url.as_deref().or(default_url);
    let metadata = match url {
        Some(url) => metadata.with_wallet_url(url),
        None => metadata,
    };
    ModuleDescriptor::new(id.module_id(), metadata, options).into_factory()
}

pub fn setup_bitte_wallet(options: WalletSetupOptions) -> WalletModuleFactory {
    module(
        WalletId::Bitte,
        WalletMetadata::new("Bitte Wallet", WalletKind::Browser)
            .with_description("Passkey-based smart wallet"),
        options,
        Some(BITTE_MAINNET_URL),
    )
}

pub fn setup_meteor_wallet(options: WalletSetupOptions) -> WalletModuleFactory {
    module(
        WalletId::Meteor,
        WalletMetadata::new("Meteor Wallet", WalletKind::Injected)
            .with_description("Browser extension and web wallet"),
        options,
        None,
    )
}

pub fn setup_here_wallet(options: WalletSetupOptions) -> WalletModuleFactory {
    module(
        WalletId::Here,
        WalletMetadata::new("HERE Wallet", WalletKind::Bridge)
            .with_description("Mobile wallet"),
        options,
        None,
    )
}

pub fn setup_my_near_wallet(options: WalletSetupOptions) -> WalletModuleFactory {
    module(
        WalletId::MyNear,
        WalletMetadata::new("MyNearWallet", WalletKind::Browser)
            .with_description("Hosted web wallet"),
        options,
        Some(MY_NEAR_WALLET_URL),
    )
}

pub fn setup_intear_wallet(options: WalletSetupOptions) -> WalletModuleFactory {
    module(
        WalletId::Intear,
        WalletMetadata::new("Intear Wallet", WalletKind::Injected),
        options,
        None,
    )
}

pub fn setup_okx_wallet(options: WalletSetupOptions) -> WalletModuleFactory {
    module(
        WalletId::Okx,
        WalletMetadata::new("OKX Wallet", WalletKind::Injected)
            .with_description("Browser extension"),
        options,
        None,
    )
}

pub fn setup_hot_wallet(options: WalletSetupOptions) -> WalletModuleFactory {
    module(
        WalletId::Hot,
        WalletMetadata::new("HOT Wallet", WalletKind::Bridge),
        options,
        None,
    )
}
