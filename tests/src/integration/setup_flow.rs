//! # Setup Flow
//!
//! Registry resolution through `WalletConnectionService::setup` down to the
//! modules the selector is built with.

#[cfg(test)]
mod tests {
    use anyhow::{Context, Result};
    use shared_types::{
        ModuleDescriptor, Network, WalletKind, WalletMetadata, WalletModule, WalletModuleFactory,
        WalletSetupOptions,
    };
    use wc_01_wallet_registry::{
        setup_okx_wallet, RegistryError, WalletId, WalletRegistry, WalletRegistryEntry,
        BITTE_TESTNET_URL,
    };
    use wc_02_connection_lifecycle::{
        HandshakeConfig, LifecycleError, SetupConfig, SetupConfigBuilder, WalletConnectionApi,
    };
    use wc_03_wallet_context::{ContextProps, WalletContext};

    use crate::integration::fixtures::Stack;

    fn custom_wallet() -> WalletModuleFactory {
        ModuleDescriptor::new(
            "custom-wallet",
            WalletMetadata::new("Custom Wallet", WalletKind::Injected),
            WalletSetupOptions::default(),
        )
        .into_factory()
    }

    fn loaded_ids(stack: &Stack) -> Result<Vec<String>> {
        let selector = stack.selectors.latest().context("no selector built")?;
        Ok(selector
            .modules()
            .iter()
            .map(|m| m.id().to_string())
            .collect())
    }

    #[tokio::test]
    async fn test_explicit_wallets_keep_order_and_get_hosted_url() -> Result<()> {
        let stack = Stack::builtin();
        let config = SetupConfigBuilder::new()
            .network(Network::Testnet)
            .wallets(vec![WalletId::Meteor, WalletId::Bitte])
            .build()?;

        stack.service.setup(config).await?;

        assert_eq!(loaded_ids(&stack)?, vec!["meteor-wallet", "bitte-wallet"]);
        let selector = stack.selectors.latest().context("no selector built")?;
        let bitte = &selector.modules()[1];
        assert_eq!(bitte.options().wallet_url.as_deref(), Some(BITTE_TESTNET_URL));
        Ok(())
    }

    #[tokio::test]
    async fn test_explicit_override_beats_hosted_url() -> Result<()> {
        let stack = Stack::builtin();
        let config = SetupConfigBuilder::new()
            .wallets(vec![WalletId::Bitte])
            .wallet_options(
                WalletId::Bitte,
                WalletSetupOptions::with_wallet_url("https://staging.example/wallet"),
            )
            .wallet_url("https://ignored.example")
            .build()?;

        stack.service.setup(config).await?;

        let selector = stack.selectors.latest().context("no selector built")?;
        assert_eq!(
            selector.modules()[0].options().wallet_url.as_deref(),
            Some("https://staging.example/wallet")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_legacy_defaults_with_additional_wallet_last() -> Result<()> {
        let stack = Stack::builtin();
        let config = SetupConfigBuilder::new()
            .additional_wallet(custom_wallet())
            .build()?;

        stack.service.setup(config).await?;

        assert_eq!(
            loaded_ids(&stack)?,
            vec![
                "bitte-wallet",
                "meteor-wallet",
                "my-near-wallet",
                "here-wallet",
                "custom-wallet"
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_context_with_additional_wallet_loads_primary_only() -> Result<()> {
        let stack = Stack::builtin();
        let props = ContextProps::new(Network::Mainnet).with_additional_wallet(custom_wallet());

        let context = WalletContext::mount(stack.service.clone(), props).await;

        assert!(context.snapshot().is_wallet_selector_setup);
        assert_eq!(loaded_ids(&stack)?, vec!["bitte-wallet", "custom-wallet"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_custom_registry_rejects_unregistered_wallet() -> Result<()> {
        let mut registry = WalletRegistry::empty();
        registry.register(WalletRegistryEntry::new(WalletId::Okx, setup_okx_wallet))?;
        let stack = Stack::with(registry, HandshakeConfig::default());

        let err = stack
            .service
            .setup(SetupConfigBuilder::new().wallets(vec![WalletId::Okx, WalletId::Hot]).build()?)
            .await
            .err()
            .context("setup should fail")?;
        assert_eq!(
            err,
            LifecycleError::Registry(RegistryError::UnsupportedWallet("hot".into()))
        );
        assert_eq!(stack.selectors.created_count(), 0);

        stack
            .service
            .setup(SetupConfigBuilder::new().wallets(vec![WalletId::Okx]).build()?)
            .await?;
        assert_eq!(loaded_ids(&stack)?, vec!["okx-wallet"]);
        Ok(())
    }

    #[test]
    fn test_unknown_wallet_name_fails_before_setup() {
        let registry = WalletRegistry::builtin();
        let err = registry
            .build_from_names(&["meteor", "phantom"], None)
            .unwrap_err();
        assert_eq!(err, RegistryError::UnsupportedWallet("phantom".into()));
    }

    #[tokio::test]
    async fn test_invalid_wallet_url_rejected_before_selector() {
        let stack = Stack::builtin();
        let config = SetupConfig {
            wallet_url: Some("ftp://wallet".to_string()),
            ..Default::default()
        };

        let err = stack.service.setup(config).await.unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidConfig(_)));
        assert_eq!(stack.selectors.created_count(), 0);
    }
}
