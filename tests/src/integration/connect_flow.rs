//! # Connect Flow
//!
//! Context facade → lifecycle service → polling handshake → ownership
//! proof, with the in-memory wallet standing in for a real backend.
//!
//! ```text
//! WalletContext::connect ──► modal.show ──► handshake polls store
//!        ▲                                        │
//!        └──── snapshot ◄── subscriber ◄── wallet sign-in
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use shared_types::{AccountState, Network, VerifiedOwner, VerifyOwnerParams};
    use tokio::time::{timeout, Instant};
    use wallet_telemetry::{encode_metrics, register_metrics};
    use wc_01_wallet_registry::WalletRegistry;
    use wc_02_connection_lifecycle::{HandshakeConfig, LifecycleError, WalletConnectionApi};
    use wc_03_wallet_context::{ContextError, ContextProps, WalletContext, WalletContextSnapshot};

    use crate::integration::fixtures::Stack;

    fn proof(account: &str, message: &str) -> VerifiedOwner {
        VerifiedOwner {
            account_id: account.to_string(),
            message: message.to_string(),
            block_id: "8Qm1".to_string(),
            public_key: "ed25519:6E8sCci9badyRkXb3JoRpBj5p8C6Tw41ELDZoiihKEtp".to_string(),
            signature: "c29tZS1zaWduYXR1cmU=".to_string(),
            key_type: 0,
            meta: Some("{\"nonce\":42}".to_string()),
        }
    }

    async fn wait_for(
        context: &WalletContext,
        condition: impl FnMut(&WalletContextSnapshot) -> bool,
    ) -> Result<()> {
        let mut rx = context.watch();
        timeout(Duration::from_secs(1), rx.wait_for(condition)).await??;
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_wallet_session() -> Result<()> {
        let stack = Stack::builtin();
        let props = ContextProps::new(Network::Testnet).with_contract_address("guestbook.testnet");
        let context = Arc::new(WalletContext::mount(stack.service.clone(), props).await);
        assert!(context.snapshot().is_wallet_selector_setup);

        let start = Instant::now();
        let connecting = {
            let context = Arc::clone(&context);
            tokio::spawn(async move { context.connect().await })
        };
        tokio::time::sleep(Duration::from_millis(2_100)).await;
        assert!(context.snapshot().is_waiting_for_connection);

        let selector = stack.selectors.latest().context("no selector built")?;
        selector.sign_in(
            "bitte-wallet",
            vec![AccountState::new("alice.testnet", true)],
        )?;

        let accounts = connecting.await??;
        assert_eq!(accounts[0].account_id, "alice.testnet");
        // Resolved by the first poll after sign-in.
        assert!(start.elapsed() >= Duration::from_millis(2_100));
        assert!(start.elapsed() <= Duration::from_millis(2_600));

        let snapshot = context.snapshot();
        assert!(snapshot.is_connected);
        assert_eq!(snapshot.active_account_id.as_deref(), Some("alice.testnet"));
        assert!(!snapshot.is_waiting_for_connection);

        let expected = proof("alice.testnet", "Sign in to guestbook");
        selector
            .wallet_backend("bitte-wallet")
            .context("bitte wallet not loaded")?
            .set_verify_response(Ok(Some(expected.clone())));
        let signed = context
            .sign_message(VerifyOwnerParams::new("Sign in to guestbook"))
            .await?;
        assert_eq!(signed, expected);

        context.disconnect().await?;
        wait_for(&context, |s| !s.is_connected).await?;
        assert_eq!(context.snapshot().active_account_id, None);

        context.unmount().await;
        assert!(selector.is_disposed());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_handshake_timing() -> Result<()> {
        let handshake = HandshakeConfig::new(Duration::from_millis(100), Duration::from_millis(300))?;
        let stack = Stack::with(WalletRegistry::builtin(), handshake);
        let context = WalletContext::mount(stack.service.clone(), ContextProps::default()).await;

        let start = Instant::now();
        let err = context.connect().await.err().context("connect should time out")?;

        assert_eq!(
            err,
            ContextError::Lifecycle(LifecycleError::ConnectionTimeout { timeout_ms: 300 })
        );
        assert!(start.elapsed() > Duration::from_millis(300));
        assert!(start.elapsed() < Duration::from_millis(500));
        assert_eq!(
            context.snapshot().error_message.as_deref(),
            Some("Wallet connection not received after 300ms")
        );
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_timeout_clears_error() -> Result<()> {
        let handshake = HandshakeConfig::new(Duration::from_millis(100), Duration::from_millis(200))?;
        let stack = Stack::with(WalletRegistry::builtin(), handshake);
        let context = Arc::new(WalletContext::mount(stack.service.clone(), ContextProps::default()).await);

        assert!(context.connect().await.is_err());
        assert!(context.snapshot().error_message.is_some());

        let retry = {
            let context = Arc::clone(&context);
            tokio::spawn(async move { context.connect().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(context.snapshot().error_message, None);

        stack
            .selectors
            .latest()
            .context("no selector built")?
            .sign_in("here-wallet", vec![AccountState::new("bob.near", true)])?;
        retry.await??;
        assert!(context.snapshot().is_connected);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_remount_replaces_selector() -> Result<()> {
        let stack = Stack::builtin();
        let first = WalletContext::mount(stack.service.clone(), ContextProps::default()).await;
        let first_selector = stack.selectors.latest().context("no selector built")?;

        let second =
            WalletContext::mount(stack.service.clone(), ContextProps::new(Network::Testnet)).await;
        let second_selector = stack.selectors.latest().context("no selector built")?;

        assert!(first_selector.is_disposed());
        assert!(!second_selector.is_disposed());
        assert!(second.snapshot().is_wallet_selector_setup);
        assert_eq!(stack.service.validate_setup(), Ok(()));
        assert!(first.snapshot().is_wallet_selector_setup);
        Ok(())
    }

    #[tokio::test]
    async fn test_lifecycle_metrics_exported() -> Result<()> {
        // Another test in this binary may have registered already
        let _ = register_metrics();

        let stack = Stack::builtin();
        let context = WalletContext::mount(stack.service.clone(), ContextProps::default()).await;
        stack
            .selectors
            .latest()
            .context("no selector built")?
            .report_accounts(Some(vec![AccountState::new("carol.near", true)]));
        context.connect().await?;

        let text = encode_metrics()?;
        assert!(text.contains("wc_setup_total"));
        assert!(text.contains("wc_connect_attempts_total{outcome=\"connected\"}"));
        Ok(())
    }
}
