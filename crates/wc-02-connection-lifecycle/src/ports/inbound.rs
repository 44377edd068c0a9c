//! # Inbound Ports
//!
//! The API the lifecycle manager offers to application code.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{AccountState, VerifiedOwner, VerifyOwnerParams};

use super::outbound::{SelectionModal, WalletSelector};
use crate::domain::SetupConfig;
use crate::error::LifecycleResult;
use crate::service::AccountsSubscription;

/// The live selector and its modal.
#[derive(Clone)]
pub struct SelectorComponents {
    pub selector: Arc<dyn WalletSelector>,
    pub modal: Arc<dyn SelectionModal>,
}

impl std::fmt::Debug for SelectorComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectorComponents")
            .field("signed_in", &self.selector.is_signed_in())
            .finish_non_exhaustive()
    }
}

/// Callback receiving each distinct account list.
pub type AccountsCallback = Arc<dyn Fn(Vec<AccountState>) + Send + Sync>;

/// Wallet connection lifecycle API.
#[async_trait]
pub trait WalletConnectionApi: Send + Sync {
    /// Build the selector and modal, replacing any previous ones.
    async fn setup(&self, config: SetupConfig) -> LifecycleResult<SelectorComponents>;

    /// Dispose of the current components. No-op when not set up.
    async fn teardown(&self);

    /// `SetupNotCalled` unless components exist.
    fn validate_setup(&self) -> LifecycleResult<()>;

    /// Deliver each distinct account list to `callback`, current list first.
    async fn register_accounts_subscriber(
        &self,
        callback: AccountsCallback,
    ) -> LifecycleResult<AccountsSubscription>;

    /// Open the modal and wait for a wallet to report accounts.
    async fn connect(&self) -> LifecycleResult<Vec<AccountState>>;

    /// Sign out of the selected wallet.
    async fn disconnect(&self) -> LifecycleResult<()>;

    /// Ownership proof from the selected wallet, if it produced one.
    async fn get_verified_owner(
        &self,
        params: VerifyOwnerParams,
    ) -> LifecycleResult<Option<VerifiedOwner>>;

    /// Ownership proof from the selected wallet; `VerificationFailed` when
    /// the wallet produced none.
    async fn sign_message(&self, params: VerifyOwnerParams) -> LifecycleResult<VerifiedOwner>;
}
