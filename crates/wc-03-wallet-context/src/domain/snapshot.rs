//! Observable wallet context state.

use serde::Serialize;
use shared_types::{active_account_id, AccountState};

/// Point-in-time view of the wallet context.
///
/// `active_account_id` and `is_connected` are derived from `accounts` and
/// only change through [`WalletContextSnapshot::set_accounts`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletContextSnapshot {
    pub accounts: Vec<AccountState>,
    pub active_account_id: Option<String>,
    pub is_connected: bool,
    pub is_waiting_for_connection: bool,
    pub is_wallet_selector_setup: bool,
    pub error_message: Option<String>,
}

impl WalletContextSnapshot {
    /// Replace the account list and recompute the derived fields.
    pub fn set_accounts(&mut self, accounts: Vec<AccountState>) {
        self.active_account_id = active_account_id(&accounts).map(str::to_string);
        self.is_connected = !accounts.is_empty();
        self.accounts = accounts;
    }

    /// Record a failure message. Empty messages are ignored.
    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !message.is_empty() {
            self.error_message = Some(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_account_derived() {
        let mut snapshot = WalletContextSnapshot::default();
        snapshot.set_accounts(vec![
            AccountState::new("a.near", false),
            AccountState::new("b.near", true),
        ]);

        assert!(snapshot.is_connected);
        assert_eq!(snapshot.active_account_id.as_deref(), Some("b.near"));
    }

    #[test]
    fn test_connected_without_active_account() {
        let mut snapshot = WalletContextSnapshot::default();
        snapshot.set_accounts(vec![AccountState::new("a.near", false)]);

        assert!(snapshot.is_connected);
        assert_eq!(snapshot.active_account_id, None);

        snapshot.set_accounts(vec![]);
        assert!(!snapshot.is_connected);
    }

    #[test]
    fn test_empty_error_ignored() {
        let mut snapshot = WalletContextSnapshot::default();
        snapshot.set_error("");
        assert_eq!(snapshot.error_message, None);

        snapshot.set_error("boom");
        assert_eq!(snapshot.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(WalletContextSnapshot::default()).unwrap();
        assert_eq!(json["isWaitingForConnection"], false);
        assert!(json["activeAccountId"].is_null());
    }
}
