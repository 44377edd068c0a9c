//! # Outbound Ports
//!
//! Traits for the external collaborators: the wallet selector, the wallets
//! it routes to, and the selection modal.

use std::sync::Arc;

use async_trait::async_trait;
use shared_bus::{SelectorState, StateSubscription};
use shared_types::{BackendError, Network, VerifiedOwner, VerifyOwnerParams, WalletModuleFactory};

/// A connected wallet backend.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Module id of this wallet.
    fn id(&self) -> &str;

    /// End the wallet session.
    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Ask the wallet to sign `params.message` as proof of account ownership.
    ///
    /// `Ok(None)` means the wallet completed without producing a proof.
    async fn verify_owner(
        &self,
        params: VerifyOwnerParams,
    ) -> Result<Option<VerifiedOwner>, BackendError>;
}

/// Router over every loaded wallet, exposing one account-state store.
#[async_trait]
pub trait WalletSelector: Send + Sync {
    /// Current state snapshot.
    fn get_state(&self) -> SelectorState;

    /// Subscribe to state changes. The current state is delivered first.
    fn subscribe(&self) -> StateSubscription;

    /// The currently selected wallet.
    async fn wallet(&self) -> Result<Arc<dyn Wallet>, BackendError>;

    /// True when the selected wallet reported at least one account.
    fn is_signed_in(&self) -> bool;

    /// Release the selector. Further use is undefined.
    async fn dispose(&self);
}

/// Options for building a selector.
#[derive(Debug, Clone)]
pub struct SelectorOptions {
    pub network: Network,
    pub modules: Vec<WalletModuleFactory>,
}

/// Builds selectors.
#[async_trait]
pub trait SelectorFactory: Send + Sync {
    async fn setup(
        &self,
        options: SelectorOptions,
    ) -> Result<Arc<dyn WalletSelector>, BackendError>;
}

/// Callback fired when the modal closes.
pub type HideListener = Box<dyn Fn() + Send + Sync>;

/// The wallet selection UI.
pub trait SelectionModal: Send + Sync {
    fn show(&self);

    fn hide(&self);

    /// Register a callback fired each time the modal goes from visible to
    /// hidden, whether closed by the user or by `hide()`.
    fn on_hide(&self, listener: HideListener);
}

/// Options for building a modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalOptions {
    /// Contract the modal requests a function-call key for.
    pub contract_id: Option<String>,
}

/// Builds modals bound to a selector.
pub trait ModalFactory: Send + Sync {
    fn setup(
        &self,
        selector: Arc<dyn WalletSelector>,
        options: ModalOptions,
    ) -> Arc<dyn SelectionModal>;
}
