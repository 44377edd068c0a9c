//! Setup and handshake configuration
//!
//! # Example
//!
//! ```ignore
//! use wc_02_connection_lifecycle::domain::SetupConfigBuilder;
//! use wc_01_wallet_registry::WalletId;
//!
//! let config = SetupConfigBuilder::new()
//!     .network(Network::Testnet)
//!     .wallets(vec![WalletId::Bitte, WalletId::Meteor])
//!     .contract_address("app.testnet")
//!     .build()
//!     .expect("Valid config");
//! ```

use std::env;
use std::time::Duration;

use shared_types::{Network, WalletModuleFactory, WalletSetupOptions};
use wc_01_wallet_registry::{hosted_wallet_url, WalletId, WalletOverrides, WalletRegistry};

use crate::error::{LifecycleError, LifecycleResult};

/// Default delay between handshake polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Default handshake deadline.
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_millis(20_000);

// =============================================================================
// WALLET SELECTION
// =============================================================================

/// Which registry wallets a setup loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletSelection {
    /// Exactly these wallets, with optional per-wallet options.
    Explicit {
        ids: Vec<WalletId>,
        overrides: WalletOverrides,
    },
    /// The primary wallet alone, or the primary wallet followed by the
    /// registry defaults.
    Legacy { only_primary: bool },
}

impl Default for WalletSelection {
    fn default() -> Self {
        Self::Legacy {
            only_primary: false,
        }
    }
}

// =============================================================================
// SETUP CONFIG
// =============================================================================

/// Everything `setup()` needs to build a selector and its modal.
#[derive(Debug, Clone, Default)]
pub struct SetupConfig {
    /// Network the selector binds to.
    pub network: Network,
    /// Registry wallets to load.
    pub wallets: WalletSelection,
    /// Caller-built modules, always appended after the registry wallets.
    pub additional_wallets: Vec<WalletModuleFactory>,
    /// Contract the modal requests access keys for.
    pub contract_address: Option<String>,
    /// Hosted UI location for the primary wallet; network default when unset.
    pub wallet_url: Option<String>,
}

impl SetupConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WC_NETWORK`: `mainnet` or `testnet` (default: mainnet)
    /// - `WC_WALLETS`: comma-separated wallet ids; selects the explicit path
    /// - `WC_ONLY_PRIMARY_WALLET`: legacy path with the primary wallet only
    /// - `WC_CONTRACT_ADDRESS`: contract id passed to the modal
    /// - `WC_WALLET_URL`: primary wallet hosted UI override
    pub fn from_env() -> LifecycleResult<Self> {
        let network = match env::var("WC_NETWORK") {
            Ok(value) => value
                .parse::<Network>()
                .map_err(|e| LifecycleError::InvalidConfig(e.to_string()))?,
            Err(_) => Network::default(),
        };

        let wallets = match env::var("WC_WALLETS") {
            Ok(value) if !value.trim().is_empty() => WalletSelection::Explicit {
                ids: parse_wallet_list(&value)?,
                overrides: WalletOverrides::new(),
            },
            _ => WalletSelection::Legacy {
                only_primary: env::var("WC_ONLY_PRIMARY_WALLET")
                    .map(|v| parse_flag(&v))
                    .unwrap_or(false),
            },
        };

        let config = Self {
            network,
            wallets,
            additional_wallets: Vec::new(),
            contract_address: non_empty_env("WC_CONTRACT_ADDRESS"),
            wallet_url: non_empty_env("WC_WALLET_URL"),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate field formats.
    pub fn validate(&self) -> LifecycleResult<()> {
        if let Some(url) = &self.wallet_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(LifecycleError::InvalidConfig(format!(
                    "wallet_url must be an http(s) URL, got {url:?}"
                )));
            }
        }

        if let Some(contract) = &self.contract_address {
            if contract.trim().is_empty() {
                return Err(LifecycleError::InvalidConfig(
                    "contract_address cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Hosted UI location handed to the primary wallet.
    #[must_use]
    pub fn primary_wallet_url(&self) -> String {
        self.wallet_url
            .clone()
            .unwrap_or_else(|| hosted_wallet_url(self.network).to_string())
    }

    /// Resolve the ordered module list for the selector.
    ///
    /// Identifiers are validated before any setup function runs.
    pub fn resolve_modules(
        &self,
        registry: &WalletRegistry,
    ) -> LifecycleResult<Vec<WalletModuleFactory>> {
        let primary_options = WalletSetupOptions::with_wallet_url(self.primary_wallet_url());

        let mut modules = match &self.wallets {
            WalletSelection::Explicit { ids, overrides } => {
                registry.validate(ids)?;
                let mut overrides = overrides.clone();
                if ids.contains(&WalletId::PRIMARY) {
                    overrides.entry(WalletId::PRIMARY).or_insert(primary_options);
                }
                registry.build(ids, Some(&overrides))?
            }
            WalletSelection::Legacy { only_primary } => {
                let mut ids = vec![WalletId::PRIMARY];
                if !only_primary {
                    ids.extend(registry.list_defaults());
                }
                let overrides = WalletOverrides::from([(WalletId::PRIMARY, primary_options)]);
                registry.build(&ids, Some(&overrides))?
            }
        };

        modules.extend(self.additional_wallets.iter().cloned());
        Ok(modules)
    }
}

/// Builder for `SetupConfig` with validation.
#[derive(Debug, Default)]
pub struct SetupConfigBuilder {
    config: SetupConfig,
    explicit: Option<(Vec<WalletId>, WalletOverrides)>,
}

impl SetupConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn network(mut self, network: Network) -> Self {
        self.config.network = network;
        self
    }

    /// Load exactly these registry wallets.
    pub fn wallets(mut self, ids: Vec<WalletId>) -> Self {
        let overrides = self.explicit.take().map(|(_, o)| o).unwrap_or_default();
        self.explicit = Some((ids, overrides));
        self
    }

    /// Options for one explicitly listed wallet.
    pub fn wallet_options(mut self, id: WalletId, options: WalletSetupOptions) -> Self {
        let (ids, mut overrides) = self.explicit.take().unwrap_or_default();
        overrides.insert(id, options);
        self.explicit = Some((ids, overrides));
        self
    }

    /// Legacy path: primary wallet alone when `true`. Ignored once
    /// `wallets()` is called.
    pub fn only_primary(mut self, only_primary: bool) -> Self {
        self.config.wallets = WalletSelection::Legacy { only_primary };
        self
    }

    pub fn additional_wallet(mut self, module: WalletModuleFactory) -> Self {
        self.config.additional_wallets.push(module);
        self
    }

    pub fn contract_address(mut self, contract: impl Into<String>) -> Self {
        self.config.contract_address = Some(contract.into());
        self
    }

    pub fn wallet_url(mut self, url: impl Into<String>) -> Self {
        self.config.wallet_url = Some(url.into());
        self
    }

    /// Build and validate.
    pub fn build(mut self) -> LifecycleResult<SetupConfig> {
        if let Some((ids, overrides)) = self.explicit {
            self.config.wallets = WalletSelection::Explicit { ids, overrides };
        }
        self.config.validate()?;
        Ok(self.config)
    }
}

// =============================================================================
// HANDSHAKE CONFIG
// =============================================================================

/// Timing for the connection handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeConfig {
    /// Delay between polls.
    pub poll_interval: Duration,
    /// The handshake fails once elapsed time exceeds this.
    pub timeout: Duration,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }
}

impl HandshakeConfig {
    /// Create a validated configuration.
    pub fn new(poll_interval: Duration, timeout: Duration) -> LifecycleResult<Self> {
        let config = Self {
            poll_interval,
            timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WC_POLL_INTERVAL_MS`: poll interval (default: 500)
    /// - `WC_CONNECTION_TIMEOUT_MS`: handshake deadline (default: 20000)
    pub fn from_env() -> LifecycleResult<Self> {
        let poll_interval = env_millis("WC_POLL_INTERVAL_MS")?.unwrap_or(DEFAULT_POLL_INTERVAL);
        let timeout = env_millis("WC_CONNECTION_TIMEOUT_MS")?.unwrap_or(DEFAULT_CONNECTION_TIMEOUT);
        Self::new(poll_interval, timeout)
    }

    pub fn validate(&self) -> LifecycleResult<()> {
        if self.poll_interval.is_zero() {
            return Err(LifecycleError::InvalidConfig(
                "poll_interval cannot be 0".to_string(),
            ));
        }

        if self.timeout < self.poll_interval {
            return Err(LifecycleError::InvalidConfig(format!(
                "timeout ({}ms) must be at least poll_interval ({}ms)",
                self.timeout.as_millis(),
                self.poll_interval.as_millis()
            )));
        }

        Ok(())
    }

    /// Timeout in whole milliseconds, as reported in errors.
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

// =============================================================================
// ENV HELPERS
// =============================================================================

fn parse_wallet_list(value: &str) -> LifecycleResult<Vec<WalletId>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<WalletId>().map_err(LifecycleError::from))
        .collect()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_millis(key: &str) -> LifecycleResult<Option<Duration>> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|e| LifecycleError::InvalidConfig(format!("{key}: {e}"))),
        Err(_) => Ok(None),
    }
}
