//! # Core Domain Entities
//!
//! Entities shared by the registry, the lifecycle manager and the context
//! facade.
//!
//! ## Clusters
//!
//! - **Network**: `Network`
//! - **Accounts**: `AccountState`, `active_account_id`
//! - **Ownership proofs**: `VerifyOwnerParams`, `VerifiedOwner`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::UnknownNetwork;

// =============================================================================
// CLUSTER A: NETWORK
// =============================================================================

/// NEAR network a selector is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network.
    #[default]
    Mainnet,
    /// Public test network.
    Testnet,
}

impl Network {
    /// Lowercase network name as used in configuration.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(UnknownNetwork(other.to_string())),
        }
    }
}

// =============================================================================
// CLUSTER B: ACCOUNTS
// =============================================================================

/// One connected account as reported by the selector.
///
/// Equality is structural: two snapshots differing only in `active` are
/// different states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    /// NEAR account id (e.g. `alice.near`).
    pub account_id: String,
    /// Whether this is the account currently in use.
    pub active: bool,
    /// Public key of the access key the wallet signed in with, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl AccountState {
    /// Create an account entry without a public key.
    pub fn new(account_id: impl Into<String>, active: bool) -> Self {
        Self {
            account_id: account_id.into(),
            active,
            public_key: None,
        }
    }
}

/// Id of the active account, or `None` when no account is active.
#[must_use]
pub fn active_account_id(accounts: &[AccountState]) -> Option<&str> {
    accounts
        .iter()
        .find(|account| account.active)
        .map(|account| account.account_id.as_str())
}

// =============================================================================
// CLUSTER C: OWNERSHIP PROOFS
// =============================================================================

/// Parameters for an ownership-proof request, passed through to the wallet
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOwnerParams {
    /// Message the wallet signs.
    pub message: String,
    /// Where browser wallets redirect after signing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Opaque application metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
}

impl VerifyOwnerParams {
    /// Params carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Signed assertion that `account_id` controls the key that signed `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedOwner {
    pub account_id: String,
    pub message: String,
    pub block_id: String,
    pub public_key: String,
    pub signature: String,
    pub key_type: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
}
