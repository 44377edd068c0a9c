//! Wallet connection service
//!
//! Owns the selector components and the one in-flight handshake.
//! Component state sits behind a `parking_lot::RwLock` that is never held
//! across an await; setup and teardown are serialized by an async mutex.
//!
//! Lock order: `components`, then `pending` or `subscriptions`. Replacing
//! the components retires everything bound to the old selector (pending
//! handshake, account subscriptions) under the same write lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_types::{AccountState, BackendError, VerifiedOwner, VerifyOwnerParams};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use wallet_telemetry::{metric_inc, CONNECT_ATTEMPTS, SETUPS, SIGN_REQUESTS};
use wc_01_wallet_registry::WalletRegistry;

use super::pending::PendingConnection;
use super::subscription::{AccountsSubscription, SubscriptionHandle};
use crate::domain::{HandshakeConfig, HandshakeState, SetupConfig};
use crate::error::{LifecycleError, LifecycleResult};
use crate::ports::{
    AccountsCallback, ModalFactory, ModalOptions, SelectionModal, SelectorComponents,
    SelectorFactory, SelectorOptions, WalletConnectionApi, WalletSelector,
};

/// Wallet connection lifecycle manager.
pub struct WalletConnectionService {
    selector_factory: Arc<dyn SelectorFactory>,
    modal_factory: Arc<dyn ModalFactory>,
    registry: WalletRegistry,
    handshake: HandshakeConfig,
    components: RwLock<Option<SelectorComponents>>,
    pending: Mutex<Option<PendingConnection>>,
    subscriptions: Mutex<Vec<SubscriptionHandle>>,
    generation: AtomicU64,
    setup_lock: tokio::sync::Mutex<()>,
}

impl WalletConnectionService {
    /// Create a service. Fails if `handshake` is invalid.
    pub fn new(
        selector_factory: Arc<dyn SelectorFactory>,
        modal_factory: Arc<dyn ModalFactory>,
        registry: WalletRegistry,
        handshake: HandshakeConfig,
    ) -> LifecycleResult<Self> {
        handshake.validate()?;
        Ok(Self::assemble(selector_factory, modal_factory, registry, handshake))
    }

    /// Service over the built-in registry with default handshake timing.
    pub fn with_defaults(
        selector_factory: Arc<dyn SelectorFactory>,
        modal_factory: Arc<dyn ModalFactory>,
    ) -> Self {
        Self::assemble(
            selector_factory,
            modal_factory,
            WalletRegistry::builtin(),
            HandshakeConfig::default(),
        )
    }

    fn assemble(
        selector_factory: Arc<dyn SelectorFactory>,
        modal_factory: Arc<dyn ModalFactory>,
        registry: WalletRegistry,
        handshake: HandshakeConfig,
    ) -> Self {
        Self {
            selector_factory,
            modal_factory,
            registry,
            handshake,
            components: RwLock::new(None),
            pending: Mutex::new(None),
            subscriptions: Mutex::new(Vec::new()),
            generation: AtomicU64::new(0),
            setup_lock: tokio::sync::Mutex::new(()),
        }
    }

    #[must_use]
    pub fn is_setup(&self) -> bool {
        self.components.read().is_some()
    }

    #[must_use]
    pub fn components(&self) -> Option<SelectorComponents> {
        self.components.read().clone()
    }

    #[must_use]
    pub fn selector(&self) -> Option<Arc<dyn WalletSelector>> {
        self.components.read().as_ref().map(|c| Arc::clone(&c.selector))
    }

    #[must_use]
    pub fn modal(&self) -> Option<Arc<dyn SelectionModal>> {
        self.components.read().as_ref().map(|c| Arc::clone(&c.modal))
    }

    #[must_use]
    pub fn handshake_config(&self) -> &HandshakeConfig {
        &self.handshake
    }

    #[must_use]
    pub fn registry(&self) -> &WalletRegistry {
        &self.registry
    }

    /// True while a `connect()` is waiting for accounts.
    #[must_use]
    pub fn has_pending_connection(&self) -> bool {
        self.pending.lock().is_some()
    }

    fn require_components(&self) -> LifecycleResult<SelectorComponents> {
        self.components().ok_or(LifecycleError::SetupNotCalled)
    }

    /// Install `next` and detach everything bound to the previous components.
    fn swap_components(&self, next: Option<SelectorComponents>) -> Option<RetiredComponents> {
        let mut current = self.components.write();
        let previous = std::mem::replace(&mut *current, next)?;
        Some(RetiredComponents {
            components: previous,
            pending: self.pending.lock().take(),
            subscriptions: std::mem::take(&mut *self.subscriptions.lock()),
        })
    }

    async fn dispose_components(&self, retired: RetiredComponents) {
        if let Some(pending) = retired.pending {
            pending.cancel();
        }
        let stopped = retired.subscriptions.len();
        for subscription in retired.subscriptions {
            subscription.stop();
        }
        retired.components.modal.hide();
        retired.components.selector.dispose().await;
        debug!(subscriptions = stopped, "Selector components disposed");
    }

    async fn run_handshake(
        &self,
        selector: &Arc<dyn WalletSelector>,
        cancel: &mut oneshot::Receiver<()>,
    ) -> LifecycleResult<Vec<AccountState>> {
        let mut state = HandshakeState::Idle;

        loop {
            if !matches!(cancel.try_recv(), Err(oneshot::error::TryRecvError::Empty)) {
                return Err(LifecycleError::ConnectionCancelled);
            }

            let snapshot = selector.get_state();
            state = state.step(snapshot.accounts.is_some(), &self.handshake);

            match state {
                HandshakeState::Resolved => return Ok(snapshot.accounts.unwrap_or_default()),
                HandshakeState::TimedOut => {
                    return Err(LifecycleError::ConnectionTimeout {
                        timeout_ms: self.handshake.timeout_ms(),
                    })
                }
                HandshakeState::Polling { .. } => {
                    tokio::select! {
                        biased;
                        _ = &mut *cancel => return Err(LifecycleError::ConnectionCancelled),
                        () = tokio::time::sleep(self.handshake.poll_interval) => {}
                    }
                }
                HandshakeState::Idle | HandshakeState::Cancelled => {
                    return Err(LifecycleError::ConnectionCancelled)
                }
            }
        }
    }
}

/// What a replaced set of components leaves behind to clean up.
struct RetiredComponents {
    components: SelectorComponents,
    pending: Option<PendingConnection>,
    subscriptions: Vec<SubscriptionHandle>,
}

#[async_trait]
impl WalletConnectionApi for WalletConnectionService {
    async fn setup(&self, config: SetupConfig) -> LifecycleResult<SelectorComponents> {
        let _guard = self.setup_lock.lock().await;

        config.validate()?;
        let modules = config.resolve_modules(&self.registry)?;
        info!(
            network = %config.network,
            modules = modules.len(),
            "Setting up wallet selector"
        );

        let selector = self
            .selector_factory
            .setup(SelectorOptions {
                network: config.network,
                modules,
            })
            .await?;
        let modal = self.modal_factory.setup(
            Arc::clone(&selector),
            ModalOptions {
                contract_id: config.contract_address.clone(),
            },
        );
        let components = SelectorComponents { selector, modal };

        if let Some(retired) = self.swap_components(Some(components.clone())) {
            debug!("Replaced existing selector components");
            self.dispose_components(retired).await;
        }

        metric_inc!(SETUPS);
        Ok(components)
    }

    async fn teardown(&self) {
        let _guard = self.setup_lock.lock().await;

        if let Some(retired) = self.swap_components(None) {
            self.dispose_components(retired).await;
            info!("Wallet selector torn down");
        }
    }

    fn validate_setup(&self) -> LifecycleResult<()> {
        if self.is_setup() {
            Ok(())
        } else {
            Err(LifecycleError::SetupNotCalled)
        }
    }

    async fn register_accounts_subscriber(
        &self,
        callback: AccountsCallback,
    ) -> LifecycleResult<AccountsSubscription> {
        let current = self.components.read();
        let components = current.as_ref().ok_or(LifecycleError::SetupNotCalled)?;

        let subscription = AccountsSubscription::spawn(components.selector.subscribe(), callback);
        let mut subscriptions = self.subscriptions.lock();
        subscriptions.retain(SubscriptionHandle::is_active);
        subscriptions.push(subscription.handle());
        Ok(subscription)
    }

    async fn connect(&self) -> LifecycleResult<Vec<AccountState>> {
        // Install the pending entry under the components lock so a
        // concurrent setup either sees and cancels it or runs first.
        let (components, generation, mut cancel, superseded) = {
            let current = self.components.read();
            let components = current.clone().ok_or(LifecycleError::SetupNotCalled)?;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let (pending, cancel) = PendingConnection::new(generation);
            let superseded = self.pending.lock().replace(pending);
            (components, generation, cancel, superseded)
        };
        if let Some(previous) = superseded {
            debug!(
                superseded = previous.generation,
                generation, "New connect supersedes pending handshake"
            );
            previous.cancel();
        }

        components.modal.show();
        let result = self.run_handshake(&components.selector, &mut cancel).await;

        {
            let mut pending = self.pending.lock();
            if pending.as_ref().is_some_and(|p| p.generation == generation) {
                *pending = None;
            }
        }

        match &result {
            Ok(accounts) => {
                metric_inc!(CONNECT_ATTEMPTS, &["connected"]);
                info!(generation, accounts = accounts.len(), "Wallet connected");
            }
            Err(LifecycleError::ConnectionTimeout { timeout_ms }) => {
                metric_inc!(CONNECT_ATTEMPTS, &["timeout"]);
                warn!(generation, timeout_ms, "Wallet connection timed out");
            }
            Err(LifecycleError::ConnectionCancelled) => {
                metric_inc!(CONNECT_ATTEMPTS, &["cancelled"]);
                debug!(generation, "Connection attempt cancelled");
            }
            Err(err) => {
                metric_inc!(CONNECT_ATTEMPTS, &["error"]);
                warn!(generation, error = %err, "Wallet connection failed");
            }
        }

        result
    }

    async fn disconnect(&self) -> LifecycleResult<()> {
        let components = self.require_components()?;
        let wallet = components.selector.wallet().await?;
        wallet.sign_out().await?;
        info!(wallet = wallet.id(), "Wallet disconnected");
        Ok(())
    }

    async fn get_verified_owner(
        &self,
        params: VerifyOwnerParams,
    ) -> LifecycleResult<Option<VerifiedOwner>> {
        let components = self.require_components()?;

        let result: Result<Option<VerifiedOwner>, BackendError> = async {
            let wallet = components.selector.wallet().await?;
            debug!(wallet = wallet.id(), "Requesting ownership proof");
            wallet.verify_owner(params).await
        }
        .await;

        match &result {
            Ok(Some(owner)) => {
                metric_inc!(SIGN_REQUESTS, &["signed"]);
                debug!(account = %owner.account_id, "Ownership proof received");
            }
            Ok(None) => metric_inc!(SIGN_REQUESTS, &["empty"]),
            Err(err) => {
                metric_inc!(SIGN_REQUESTS, &["error"]);
                warn!(error = %err, "Ownership proof request failed");
            }
        }

        result.map_err(LifecycleError::from)
    }

    async fn sign_message(&self, params: VerifyOwnerParams) -> LifecycleResult<VerifiedOwner> {
        self.get_verified_owner(params)
            .await?
            .ok_or(LifecycleError::VerificationFailed)
    }
}
