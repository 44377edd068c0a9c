//! # Wallet Module Contract
//!
//! A wallet module is the opaque value a wallet package's setup function
//! returns. The selector turns modules into live wallets; everything before
//! that point (registry, setup config) only moves modules around.
//!
//! ## Example
//!
//! ```rust,ignore
//! use shared_types::{ModuleDescriptor, WalletKind, WalletMetadata, WalletSetupOptions};
//!
//! let module = ModuleDescriptor::new(
//!     "sender",
//!     WalletMetadata::new("Sender", WalletKind::Injected),
//!     WalletSetupOptions::default(),
//! )
//! .into_factory();
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// How a wallet is reached from the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    /// Hosted web wallet reached by redirect or popup.
    Browser,
    /// Browser extension injecting a provider into the page.
    Injected,
    /// Mobile or desktop wallet reached through a bridge / deep link.
    Bridge,
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browser => write!(f, "browser"),
            Self::Injected => write!(f, "injected"),
            Self::Bridge => write!(f, "bridge"),
        }
    }
}

/// Display metadata shown by the selection modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletMetadata {
    /// Human readable wallet name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Connection style.
    pub kind: WalletKind,
    /// Hosted UI location for browser wallets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_url: Option<String>,
    /// Hidden from the modal unless already selected.
    #[serde(default)]
    pub deprecated: bool,
}

impl WalletMetadata {
    pub fn new(name: impl Into<String>, kind: WalletKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            wallet_url: None,
            deprecated: false,
        }
    }

    /// Builder-style method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style method to set the hosted UI location.
    pub fn with_wallet_url(mut self, url: impl Into<String>) -> Self {
        self.wallet_url = Some(url.into());
        self
    }
}

/// Options handed to a wallet's setup function.
///
/// Every wallet accepts `walletUrl`; anything else is wallet specific and is
/// carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WalletSetupOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WalletSetupOptions {
    /// Options overriding only the wallet URL.
    pub fn with_wallet_url(url: impl Into<String>) -> Self {
        Self {
            wallet_url: Some(url.into()),
            extra: Map::new(),
        }
    }

    /// Builder-style method to add a wallet specific option.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Contract every wallet module handed to a selector must satisfy.
pub trait WalletModule: Send + Sync + fmt::Debug {
    /// Stable module id (e.g. `bitte-wallet`, `meteor-wallet`).
    fn id(&self) -> &str;

    /// Metadata for the selection modal.
    fn metadata(&self) -> &WalletMetadata;

    /// Options the module was set up with.
    fn options(&self) -> &WalletSetupOptions;
}

/// Shared handle to a wallet module.
pub type WalletModuleFactory = Arc<dyn WalletModule>;

/// Plain data wallet module. Produced by the registry's setup functions and
/// usable directly for caller supplied wallets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    id: String,
    metadata: WalletMetadata,
    options: WalletSetupOptions,
}

impl ModuleDescriptor {
    pub fn new(id: impl Into<String>, metadata: WalletMetadata, options: WalletSetupOptions) -> Self {
        Self {
            id: id.into(),
            metadata,
            options,
        }
    }

    /// Wrap into a shared factory handle.
    #[must_use]
    pub fn into_factory(self) -> WalletModuleFactory {
        Arc::new(self)
    }
}

impl WalletModule for ModuleDescriptor {
    fn id(&self) -> &str {
        &self.id
    }

    fn metadata(&self) -> &WalletMetadata {
        &self.metadata
    }

    fn options(&self) -> &WalletSetupOptions {
        &self.options
    }
}
