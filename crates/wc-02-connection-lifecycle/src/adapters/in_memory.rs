//! In-memory selector, wallet and modal.
//!
//! Drive them from tests and demos the way a real wallet would drive the
//! selector store: `sign_in` / `report_accounts` on the selector, canned
//! responses on each wallet, `hide` on the modal for a user close.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_bus::{InMemoryStateStore, SelectorState, StateSubscription};
use shared_types::{
    AccountState, BackendError, VerifiedOwner, VerifyOwnerParams, WalletModule,
    WalletModuleFactory,
};
use tracing::debug;

use crate::ports::{
    HideListener, ModalFactory, ModalOptions, SelectionModal, SelectorFactory, SelectorOptions,
    Wallet, WalletSelector,
};

// =============================================================================
// WALLET
// =============================================================================

/// Wallet backend answering from canned responses.
pub struct InMemoryWallet {
    id: String,
    store: Arc<InMemoryStateStore>,
    verify_response: Mutex<Result<Option<VerifiedOwner>, BackendError>>,
    sign_out_error: Mutex<Option<BackendError>>,
    sign_out_calls: AtomicUsize,
    verify_requests: Mutex<Vec<VerifyOwnerParams>>,
}

impl InMemoryWallet {
    /// Wallet writing to `store`. Produces no ownership proof until
    /// `set_verify_response` is called.
    pub fn new(id: impl Into<String>, store: Arc<InMemoryStateStore>) -> Self {
        Self {
            id: id.into(),
            store,
            verify_response: Mutex::new(Ok(None)),
            sign_out_error: Mutex::new(None),
            sign_out_calls: AtomicUsize::new(0),
            verify_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_verify_response(&self, response: Result<Option<VerifiedOwner>, BackendError>) {
        *self.verify_response.lock() = response;
    }

    /// Make `sign_out` fail with `error` until cleared with `None`.
    pub fn set_sign_out_error(&self, error: Option<BackendError>) {
        *self.sign_out_error.lock() = error;
    }

    #[must_use]
    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    /// Every `verify_owner` request received, oldest first.
    #[must_use]
    pub fn verify_requests(&self) -> Vec<VerifyOwnerParams> {
        self.verify_requests.lock().clone()
    }
}

#[async_trait]
impl Wallet for InMemoryWallet {
    fn id(&self) -> &str {
        &self.id
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.sign_out_error.lock().clone() {
            return Err(err);
        }
        self.store.sign_out();
        debug!(wallet = %self.id, "Wallet signed out");
        Ok(())
    }

    async fn verify_owner(
        &self,
        params: VerifyOwnerParams,
    ) -> Result<Option<VerifiedOwner>, BackendError> {
        self.verify_requests.lock().push(params);
        self.verify_response.lock().clone()
    }
}

// =============================================================================
// SELECTOR
// =============================================================================

/// Selector over an `InMemoryStateStore`, with one `InMemoryWallet` per
/// loaded module.
pub struct InMemoryWalletSelector {
    store: Arc<InMemoryStateStore>,
    modules: Vec<WalletModuleFactory>,
    wallets: HashMap<String, Arc<InMemoryWallet>>,
    disposed: AtomicBool,
}

impl InMemoryWalletSelector {
    pub fn new(options: SelectorOptions) -> Self {
        let module_ids: Vec<String> = options.modules.iter().map(|m| m.id().to_string()).collect();
        let store = Arc::new(InMemoryStateStore::new(SelectorState::new(
            options.network,
            module_ids.clone(),
        )));

        let wallets = module_ids
            .into_iter()
            .map(|id| {
                let wallet = Arc::new(InMemoryWallet::new(id.clone(), Arc::clone(&store)));
                (id, wallet)
            })
            .collect();

        Self {
            store,
            modules: options.modules,
            wallets,
            disposed: AtomicBool::new(false),
        }
    }

    /// The backing state store.
    #[must_use]
    pub fn store(&self) -> &Arc<InMemoryStateStore> {
        &self.store
    }

    /// Modules the selector was built with, in load order.
    #[must_use]
    pub fn modules(&self) -> &[WalletModuleFactory] {
        &self.modules
    }

    /// Concrete backend for a loaded module.
    #[must_use]
    pub fn wallet_backend(&self, module_id: &str) -> Option<Arc<InMemoryWallet>> {
        self.wallets.get(module_id).cloned()
    }

    /// Simulate the user completing sign-in with `module_id`.
    pub fn sign_in(&self, module_id: &str, accounts: Vec<AccountState>) -> Result<(), BackendError> {
        if !self.wallets.contains_key(module_id) {
            return Err(BackendError::Unavailable(format!(
                "wallet module not loaded: {module_id}"
            )));
        }
        self.store.sign_in(module_id, accounts);
        Ok(())
    }

    /// Overwrite the accounts field without changing the selected wallet.
    pub fn report_accounts(&self, accounts: Option<Vec<AccountState>>) {
        self.store.set_accounts(accounts);
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletSelector for InMemoryWalletSelector {
    fn get_state(&self) -> SelectorState {
        self.store.get_state()
    }

    fn subscribe(&self) -> StateSubscription {
        self.store.subscribe()
    }

    async fn wallet(&self) -> Result<Arc<dyn Wallet>, BackendError> {
        if self.is_disposed() {
            return Err(BackendError::Unavailable("selector disposed".to_string()));
        }

        let selected = self
            .store
            .get_state()
            .selected_wallet_id
            .ok_or(BackendError::NoActiveWallet)?;

        let wallet = self.wallets.get(&selected).cloned().ok_or_else(|| {
            BackendError::Unavailable(format!("wallet module not loaded: {selected}"))
        })?;

        Ok(wallet)
    }

    fn is_signed_in(&self) -> bool {
        self.store.get_state().is_signed_in()
    }

    async fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
        debug!(modules = self.modules.len(), "Selector disposed");
    }
}

/// Builds `InMemoryWalletSelector`s and keeps a handle to each.
#[derive(Default)]
pub struct InMemorySelectorFactory {
    created: Mutex<Vec<Arc<InMemoryWalletSelector>>>,
    next_failure: Mutex<Option<BackendError>>,
}

impl InMemorySelectorFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `setup` call with `error`.
    pub fn fail_next_with(&self, error: BackendError) {
        *self.next_failure.lock() = Some(error);
    }

    /// Most recently built selector.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<InMemoryWalletSelector>> {
        self.created.lock().last().cloned()
    }

    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.lock().len()
    }
}

#[async_trait]
impl SelectorFactory for InMemorySelectorFactory {
    async fn setup(
        &self,
        options: SelectorOptions,
    ) -> Result<Arc<dyn WalletSelector>, BackendError> {
        if let Some(err) = self.next_failure.lock().take() {
            return Err(err);
        }

        let selector = Arc::new(InMemoryWalletSelector::new(options));
        self.created.lock().push(Arc::clone(&selector));
        Ok(selector)
    }
}

// =============================================================================
// MODAL
// =============================================================================

/// Modal with no UI: tracks visibility and fires close listeners.
pub struct HeadlessModal {
    options: ModalOptions,
    visible: AtomicBool,
    show_count: AtomicUsize,
    listeners: Mutex<Vec<Arc<dyn Fn() + Send + Sync>>>,
}

impl HeadlessModal {
    pub fn new(options: ModalOptions) -> Self {
        Self {
            options,
            visible: AtomicBool::new(false),
            show_count: AtomicUsize::new(0),
            listeners: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn show_count(&self) -> usize {
        self.show_count.load(Ordering::SeqCst)
    }
}

impl SelectionModal for HeadlessModal {
    fn show(&self) {
        self.visible.store(true, Ordering::SeqCst);
        self.show_count.fetch_add(1, Ordering::SeqCst);
    }

    fn hide(&self) {
        if !self.visible.swap(false, Ordering::SeqCst) {
            return;
        }

        // Call outside the lock so a listener may register another.
        let listeners = self.listeners.lock().clone();
        for listener in listeners {
            listener();
        }
    }

    fn on_hide(&self, listener: HideListener) {
        self.listeners.lock().push(Arc::from(listener));
    }
}

/// Builds `HeadlessModal`s and keeps a handle to each.
#[derive(Default)]
pub struct HeadlessModalFactory {
    created: Mutex<Vec<Arc<HeadlessModal>>>,
}

impl HeadlessModalFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently built modal.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<HeadlessModal>> {
        self.created.lock().last().cloned()
    }
}

impl ModalFactory for HeadlessModalFactory {
    fn setup(
        &self,
        _selector: Arc<dyn WalletSelector>,
        options: ModalOptions,
    ) -> Arc<dyn SelectionModal> {
        let modal = Arc::new(HeadlessModal::new(options));
        self.created.lock().push(Arc::clone(&modal));
        modal
    }
}
