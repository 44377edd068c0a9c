//! Service layer: the lifecycle manager and the handles it returns.

mod connection_service;
mod pending;
mod subscription;

pub use connection_service::WalletConnectionService;
pub use pending::PendingConnection;
pub use subscription::AccountsSubscription;
