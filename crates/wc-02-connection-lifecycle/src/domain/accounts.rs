//! Account-list change detection for subscribers.

use shared_types::AccountState;

/// Suppresses consecutive structurally equal account lists.
///
/// An absent accounts field and an empty list count as the same value.
#[derive(Debug, Default)]
pub struct DistinctAccounts {
    last: Option<Vec<AccountState>>,
}

impl DistinctAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some(accounts)` when they differ from the previous call.
    pub fn observe(&mut self, accounts: Option<Vec<AccountState>>) -> Option<Vec<AccountState>> {
        let accounts = accounts.unwrap_or_default();
        if self.last.as_ref() == Some(&accounts) {
            return None;
        }
        self.last = Some(accounts.clone());
        Some(accounts)
    }
}
