//! Mount-time properties of a wallet context.

use shared_types::{Network, WalletModuleFactory};
use wc_01_wallet_registry::{WalletId, WalletOverrides};
use wc_02_connection_lifecycle::{LifecycleResult, SetupConfig, WalletSelection};

/// What the application asks the context to set up.
#[derive(Debug, Clone, Default)]
pub struct ContextProps {
    pub network: Network,
    /// Contract the modal requests access keys for.
    pub contract_address: Option<String>,
    /// Caller-built wallet modules loaded after the registry wallets.
    pub additional_wallets: Vec<WalletModuleFactory>,
    /// Load the primary wallet alone.
    pub only_bitte_wallet: bool,
    /// Hosted UI location for the primary wallet.
    pub wallet_url: Option<String>,
    /// Explicit registry wallets. Takes precedence over the flags above.
    pub wallets: Option<Vec<WalletId>>,
    /// Per-wallet options for the explicit list.
    pub wallet_options: WalletOverrides,
}

impl ContextProps {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            ..Default::default()
        }
    }

    pub fn with_contract_address(mut self, contract: impl Into<String>) -> Self {
        self.contract_address = Some(contract.into());
        self
    }

    pub fn with_additional_wallet(mut self, module: WalletModuleFactory) -> Self {
        self.additional_wallets.push(module);
        self
    }

    pub fn with_only_bitte_wallet(mut self, only: bool) -> Self {
        self.only_bitte_wallet = only;
        self
    }

    pub fn with_wallet_url(mut self, url: impl Into<String>) -> Self {
        self.wallet_url = Some(url.into());
        self
    }

    pub fn with_wallets(mut self, ids: Vec<WalletId>) -> Self {
        self.wallets = Some(ids);
        self
    }

    /// Legacy selection: the primary wallet alone when asked for, or when
    /// the caller brings wallets of their own.
    #[must_use]
    pub fn is_only_primary(&self) -> bool {
        self.only_bitte_wallet || !self.additional_wallets.is_empty()
    }

    /// Lifecycle setup configuration for these props.
    pub fn to_setup_config(&self) -> LifecycleResult<SetupConfig> {
        let wallets = match &self.wallets {
            Some(ids) => WalletSelection::Explicit {
                ids: ids.clone(),
                overrides: self.wallet_options.clone(),
            },
            None => WalletSelection::Legacy {
                only_primary: self.is_only_primary(),
            },
        };

        let config = SetupConfig {
            network: self.network,
            wallets,
            additional_wallets: self.additional_wallets.clone(),
            contract_address: self.contract_address.clone(),
            wallet_url: self.wallet_url.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}
