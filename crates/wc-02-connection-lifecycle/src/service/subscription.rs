//! Account-state subscriptions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shared_bus::StateSubscription;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;
use wallet_telemetry::ACCOUNT_UPDATES;

use crate::domain::DistinctAccounts;
use crate::ports::AccountsCallback;

/// Live account subscription. Delivery stops on `unsubscribe()` or drop.
pub struct AccountsSubscription {
    active: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl AccountsSubscription {
    /// Forward distinct account lists from `states` to `callback` on a
    /// spawned task.
    pub(crate) fn spawn(mut states: StateSubscription, callback: AccountsCallback) -> Self {
        let active = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&active);

        let task = tokio::spawn(async move {
            let mut distinct = DistinctAccounts::new();
            while let Some(state) = states.recv().await {
                let Some(accounts) = distinct.observe(state.accounts) else {
                    continue;
                };
                if !flag.load(Ordering::SeqCst) {
                    break;
                }
                ACCOUNT_UPDATES.inc();
                debug!(accounts = accounts.len(), "Delivering account change");
                callback(accounts);
            }
        });

        Self {
            active,
            task: Some(task),
        }
    }

    /// Stop delivery and abort the forwarding task.
    pub fn unsubscribe(mut self) {
        self.stop();
    }

    /// Handle that stops this subscription from elsewhere.
    pub(crate) fn handle(&self) -> SubscriptionHandle {
        SubscriptionHandle {
            active: Arc::clone(&self.active),
            abort: self.task.as_ref().map(JoinHandle::abort_handle),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn stop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Account subscription stopped");
        }
    }
}

/// Service-side view of a subscription, stopped when its selector is
/// disposed.
#[derive(Debug)]
pub(crate) struct SubscriptionHandle {
    active: Arc<AtomicBool>,
    abort: Option<AbortHandle>,
}

impl SubscriptionHandle {
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub(crate) fn stop(self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(abort) = self.abort {
            abort.abort();
        }
    }
}

impl Drop for AccountsSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for AccountsSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountsSubscription")
            .field("active", &self.is_active())
            .finish()
    }
}
