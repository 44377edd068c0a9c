//! # Selector State
//!
//! The snapshot a wallet selector exposes through `get_state()` and emits on
//! every change.

use serde::{Deserialize, Serialize};
use shared_types::{AccountState, Network};

/// Full selector state at one point in time.
///
/// `accounts` is `None` until a wallet has reported its accounts at least
/// once. `Some(vec![])` means a wallet reported and has no accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SelectorState {
    /// Network the selector is bound to.
    pub network: Network,
    /// Ids of the wallet modules the selector was set up with, in priority order.
    pub modules: Vec<String>,
    /// Module id of the wallet the user picked, if any.
    pub selected_wallet_id: Option<String>,
    /// Accounts reported by the selected wallet.
    pub accounts: Option<Vec<AccountState>>,
    /// Module ids of wallets signed into most recently first.
    pub recently_signed_in_wallets: Vec<String>,
}

impl SelectorState {
    /// Initial state for a selector over `modules`.
    pub fn new(network: Network, modules: Vec<String>) -> Self {
        Self {
            network,
            modules,
            ..Default::default()
        }
    }

    /// Accounts field mapped to a plain list; absent and empty are equivalent.
    #[must_use]
    pub fn accounts_or_empty(&self) -> Vec<AccountState> {
        self.accounts.clone().unwrap_or_default()
    }

    /// True when the selected wallet reported at least one account.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.accounts.as_ref().is_some_and(|accounts| !accounts.is_empty())
    }
}
