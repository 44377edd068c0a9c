//! # State Publisher
//!
//! Defines the write side of the selector state store.

use crate::state::SelectorState;
use crate::subscriber::{StateStream, StateSubscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use shared_types::AccountState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Trait for replacing the selector state and notifying subscribers.
pub trait StatePublisher: Send + Sync {
    /// Replace the current state and emit it.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the state.
    fn publish(&self, state: SelectorState) -> usize;

    /// Get the total number of states published.
    fn states_published(&self) -> u64;
}

/// In-memory selector state store.
///
/// Reads return a clone of the latest state. Writes update the state and
/// broadcast it while still holding the write lock, so every subscriber
/// observes states in the order they were written.
pub struct InMemoryStateStore {
    /// Broadcast sender for state emissions.
    sender: broadcast::Sender<SelectorState>,

    /// Latest state.
    state: RwLock<SelectorState>,

    /// Total states published.
    states_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryStateStore {
    /// Create a store seeded with `initial`, using the default capacity.
    #[must_use]
    pub fn new(initial: SelectorState) -> Self {
        Self::with_capacity(initial, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a store seeded with `initial` and the given channel capacity.
    #[must_use]
    pub fn with_capacity(initial: SelectorState, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            state: RwLock::new(initial),
            states_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn get_state(&self) -> SelectorState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` to the current state and emit the result.
    ///
    /// Returns the number of subscribers that received the new state.
    pub fn update<F>(&self, f: F) -> usize
    where
        F: FnOnce(&mut SelectorState),
    {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
        self.emit(guard.clone())
    }

    /// Replace the accounts field.
    pub fn set_accounts(&self, accounts: Option<Vec<AccountState>>) -> usize {
        self.update(|state| state.accounts = accounts)
    }

    /// Record the wallet the user picked and the accounts it reported.
    pub fn sign_in(&self, wallet_id: &str, accounts: Vec<AccountState>) -> usize {
        self.update(|state| {
            state.selected_wallet_id = Some(wallet_id.to_string());
            state.recently_signed_in_wallets.retain(|id| id != wallet_id);
            state.recently_signed_in_wallets.insert(0, wallet_id.to_string());
            state.accounts = Some(accounts);
        })
    }

    /// Clear the selected wallet. The accounts field goes back to absent,
    /// as no wallet is left to report.
    pub fn sign_out(&self) -> usize {
        self.update(|state| {
            state.selected_wallet_id = None;
            state.accounts = None;
        })
    }

    /// Subscribe to state emissions.
    ///
    /// The subscription yields the current state first, then every later
    /// emission in order.
    #[must_use]
    pub fn subscribe(&self) -> StateSubscription {
        // Take the receiver before reading so no write can slip between them.
        let receiver = self.sender.subscribe();
        let current = self.get_state();
        debug!(subscribers = self.subscriber_count(), "New state subscription");
        StateSubscription::new(receiver, Some(current))
    }

    /// Subscribe and wrap the subscription as a `Stream`.
    #[must_use]
    pub fn state_stream(&self) -> StateStream {
        self.subscribe().into_stream()
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn emit(&self, state: SelectorState) -> usize {
        self.states_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(state) {
            Ok(receivers) => {
                debug!(receivers, "Selector state published");
                receivers
            }
            Err(_) => {
                // No subscribers; the snapshot is still updated.
                trace!("Selector state published without subscribers");
                0
            }
        }
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new(SelectorState::default())
    }
}

impl StatePublisher for InMemoryStateStore {
    fn publish(&self, state: SelectorState) -> usize {
        self.update(|current| *current = state)
    }

    fn states_published(&self) -> u64 {
        self.states_published.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Network;

    #[test]
    fn test_publish_no_subscribers_still_updates_snapshot() {
        let store = InMemoryStateStore::default();
        let receivers = store.set_accounts(Some(vec![AccountState::new("a.near", true)]));

        assert_eq!(receivers, 0);
        assert_eq!(store.states_published(), 1);
        assert_eq!(store.get_state().accounts.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_with_subscriber() {
        let store = InMemoryStateStore::default();
        let _sub = store.subscribe();

        let receivers = store.publish(SelectorState::new(Network::Testnet, vec![]));
        assert_eq!(receivers, 1);
        assert_eq!(store.get_state().network, Network::Testnet);
    }

    #[test]
    fn test_sign_in_moves_wallet_to_front() {
        let store = InMemoryStateStore::default();
        store.sign_in("meteor-wallet", vec![]);
        store.sign_in("here-wallet", vec![]);
        store.sign_in("meteor-wallet", vec![AccountState::new("a.near", true)]);

        let state = store.get_state();
        assert_eq!(state.selected_wallet_id.as_deref(), Some("meteor-wallet"));
        assert_eq!(
            state.recently_signed_in_wallets,
            vec!["meteor-wallet".to_string(), "here-wallet".to_string()]
        );
    }

    #[test]
    fn test_sign_out_clears_selection() {
        let store = InMemoryStateStore::default();
        store.sign_in("bitte-wallet", vec![AccountState::new("a.near", true)]);
        store.sign_out();

        let state = store.get_state();
        assert!(state.selected_wallet_id.is_none());
        assert!(state.accounts.is_none());
        assert_eq!(state.recently_signed_in_wallets, vec!["bitte-wallet".to_string()]);
    }

    #[test]
    fn test_custom_capacity() {
        let store = InMemoryStateStore::with_capacity(SelectorState::default(), 16);
        assert_eq!(store.capacity(), 16);
        assert_eq!(store.subscriber_count(), 0);
    }
}
