//! Integration flows across the workspace crates.

pub mod connect_flow;
pub mod setup_flow;
pub mod subscription_flow;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use wc_01_wallet_registry::WalletRegistry;
    use wc_02_connection_lifecycle::{
        HandshakeConfig, HeadlessModalFactory, InMemorySelectorFactory, WalletConnectionService,
    };

    /// A service over the in-memory adapters, with handles to what it builds.
    pub struct Stack {
        pub service: Arc<WalletConnectionService>,
        pub selectors: Arc<InMemorySelectorFactory>,
        pub modals: Arc<HeadlessModalFactory>,
    }

    impl Stack {
        pub fn builtin() -> Self {
            Self::with(WalletRegistry::builtin(), HandshakeConfig::default())
        }

        pub fn with(registry: WalletRegistry, handshake: HandshakeConfig) -> Self {
            let selectors = Arc::new(InMemorySelectorFactory::new());
            let modals = Arc::new(HeadlessModalFactory::new());
            let service = WalletConnectionService::new(
                selectors.clone(),
                modals.clone(),
                registry,
                handshake,
            )
            .expect("valid handshake config");
            Self {
                service: Arc::new(service),
                selectors,
                modals,
            }
        }
    }
}
