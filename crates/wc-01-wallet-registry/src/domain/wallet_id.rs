//! Wallet identifiers

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a wallet the registry knows how to set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletId {
    Bitte,
    Meteor,
    Here,
    MyNear,
    Intear,
    Okx,
    Hot,
}

impl WalletId {
    /// The wallet treated as primary by the legacy setup paths.
    pub const PRIMARY: WalletId = WalletId::Bitte;

    /// Every identifier, in declaration order.
    #[must_use]
    pub fn all() -> &'static [WalletId] {
        &[
            Self::Bitte,
            Self::Meteor,
            Self::Here,
            Self::MyNear,
            Self::Intear,
            Self::Okx,
            Self::Hot,
        ]
    }

    /// Configuration name (`bitte`, `mynear`, ...).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bitte => "bitte",
            Self::Meteor => "meteor",
            Self::Here => "here",
            Self::MyNear => "mynear",
            Self::Intear => "intear",
            Self::Okx => "okx",
            Self::Hot => "hot",
        }
    }

    /// Id of the wallet module this wallet's setup function produces.
    #[must_use]
    pub fn module_id(&self) -> &'static str {
        match self {
            Self::Bitte => "bitte-wallet",
            Self::Meteor => "meteor-wallet",
            Self::Here => "here-wallet",
            Self::MyNear => "my-near-wallet",
            Self::Intear => "intear-wallet",
            Self::Okx => "okx-wallet",
            Self::Hot => "hot-wallet",
        }
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == name)
            .ok_or_else(|| RegistryError::UnsupportedWallet(name.to_string()))
    }
}
