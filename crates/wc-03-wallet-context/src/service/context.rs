//! Wallet context
//!
//! Mounts a lifecycle service for one UI tree and republishes everything UI
//! code renders from as a `watch` channel of [`WalletContextSnapshot`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::{AccountState, VerifiedOwner, VerifyOwnerParams};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use wc_02_connection_lifecycle::{
    AccountsCallback, AccountsSubscription, LifecycleError, LifecycleResult, SelectionModal,
    WalletConnectionApi, WalletConnectionService, WalletSelector,
};

use crate::domain::{ContextProps, WalletContextSnapshot};
use crate::error::{ContextError, ContextResult};

/// Reactive connection state over a [`WalletConnectionService`].
pub struct WalletContext {
    service: Arc<WalletConnectionService>,
    state: Arc<watch::Sender<WalletContextSnapshot>>,
    subscription: Mutex<Option<AccountsSubscription>>,
    mounted: AtomicBool,
}

impl WalletContext {
    /// Set up the selector for `props`, follow its accounts and listen for
    /// the modal closing.
    ///
    /// A failed setup does not fail the mount: the error lands in
    /// `error_message` and `is_wallet_selector_setup` stays false.
    pub async fn mount(service: Arc<WalletConnectionService>, props: ContextProps) -> Self {
        let (state, _) = watch::channel(WalletContextSnapshot::default());
        let context = Self {
            service,
            state: Arc::new(state),
            subscription: Mutex::new(None),
            mounted: AtomicBool::new(true),
        };

        match context.setup(&props).await {
            Ok(()) => info!(network = %props.network, "Wallet context mounted"),
            Err(err) => {
                warn!(error = %err, "Wallet selector setup failed");
                context.state.send_modify(|s| s.set_error(err.to_string()));
            }
        }

        context
    }

    async fn setup(&self, props: &ContextProps) -> LifecycleResult<()> {
        let config = props.to_setup_config()?;
        let components = self.service.setup(config).await?;

        let state = Arc::clone(&self.state);
        components.modal.on_hide(Box::new(move || {
            state.send_if_modified(|s| std::mem::replace(&mut s.is_waiting_for_connection, false));
        }));

        let state = Arc::clone(&self.state);
        let callback: AccountsCallback = Arc::new(move |accounts: Vec<AccountState>| {
            state.send_modify(|s| s.set_accounts(accounts));
        });
        let subscription = self.service.register_accounts_subscriber(callback).await?;
        *self.subscription.lock() = Some(subscription);

        self.state.send_modify(|s| s.is_wallet_selector_setup = true);
        Ok(())
    }

    fn ensure_mounted(&self) -> ContextResult<()> {
        if self.mounted.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ContextError::NotMounted)
        }
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> WalletContextSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<WalletContextSnapshot> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn service(&self) -> &Arc<WalletConnectionService> {
        &self.service
    }

    #[must_use]
    pub fn selector(&self) -> Option<Arc<dyn WalletSelector>> {
        self.service.selector()
    }

    #[must_use]
    pub fn modal(&self) -> Option<Arc<dyn SelectionModal>> {
        self.service.modal()
    }

    /// Open the modal and wait for the user to connect a wallet.
    ///
    /// Failures are recorded in `error_message`. A call superseded by a
    /// newer `connect` returns `ConnectionCancelled` and leaves the state to
    /// the newer call.
    pub async fn connect(&self) -> ContextResult<Vec<AccountState>> {
        self.ensure_mounted()?;
        self.state.send_modify(|s| {
            s.is_waiting_for_connection = true;
            s.error_message = None;
        });

        match self.service.connect().await {
            Ok(accounts) => {
                let connected = accounts.clone();
                self.state.send_modify(|s| {
                    s.is_waiting_for_connection = false;
                    s.set_accounts(connected);
                });
                Ok(accounts)
            }
            Err(LifecycleError::ConnectionCancelled) => {
                debug!("Superseded connect ignored");
                Err(LifecycleError::ConnectionCancelled.into())
            }
            Err(err) => {
                self.state.send_modify(|s| {
                    s.is_waiting_for_connection = false;
                    s.set_error(err.to_string());
                });
                Err(err.into())
            }
        }
    }

    /// Sign out of the selected wallet. Accounts clear once the wallet
    /// reports the change.
    pub async fn disconnect(&self) -> ContextResult<()> {
        self.ensure_mounted()?;
        self.service.disconnect().await?;
        self.state.send_modify(|s| s.is_waiting_for_connection = false);
        Ok(())
    }

    /// Ownership proof for `params.message` from the selected wallet.
    pub async fn sign_message(&self, params: VerifyOwnerParams) -> ContextResult<VerifiedOwner> {
        self.ensure_mounted()?;
        Ok(self.service.sign_message(params).await?)
    }

    /// Stop following accounts and dispose of the selector. Idempotent.
    pub async fn unmount(&self) {
        if !self.mounted.swap(false, Ordering::SeqCst) {
            return;
        }

        let subscription = self.subscription.lock().take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }
        self.service.teardown().await;

        self.state.send_modify(|s| {
            s.is_wallet_selector_setup = false;
            s.is_waiting_for_connection = false;
        });
        info!("Wallet context unmounted");
    }
}

impl std::fmt::Debug for WalletContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletContext")
            .field("mounted", &self.is_mounted())
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
