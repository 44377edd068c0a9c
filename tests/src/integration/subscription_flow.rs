//! # Subscription Flow
//!
//! Selector store changes fanned out to independent account subscribers.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use futures::StreamExt;
    use shared_types::AccountState;
    use tokio::sync::mpsc;
    use tokio::time::timeout;
    use wc_02_connection_lifecycle::{AccountsCallback, SetupConfig, WalletConnectionApi, WalletSelector};

    use crate::integration::fixtures::Stack;

    type Updates = mpsc::UnboundedReceiver<Vec<AccountState>>;

    fn channel_callback() -> (AccountsCallback, Updates) {
        let (tx, rx) = mpsc::unbounded_channel();
        let callback: AccountsCallback = Arc::new(move |accounts| {
            let _ = tx.send(accounts);
        });
        (callback, rx)
    }

    async fn next(rx: &mut Updates) -> Result<Vec<AccountState>> {
        timeout(Duration::from_millis(500), rx.recv())
            .await?
            .context("subscription closed")
    }

    fn ids(accounts: &[AccountState]) -> Vec<&str> {
        accounts.iter().map(|a| a.account_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_unsubscribing_one_leaves_the_other() -> Result<()> {
        let stack = Stack::builtin();
        stack.service.setup(SetupConfig::default()).await?;
        let selector = stack.selectors.latest().context("no selector built")?;

        let (first_cb, mut first_rx) = channel_callback();
        let (second_cb, mut second_rx) = channel_callback();
        let first = stack.service.register_accounts_subscriber(first_cb).await?;
        let _second = stack.service.register_accounts_subscriber(second_cb).await?;

        assert!(next(&mut first_rx).await?.is_empty());
        assert!(next(&mut second_rx).await?.is_empty());

        selector.sign_in("meteor-wallet", vec![AccountState::new("a.near", true)])?;
        assert_eq!(ids(&next(&mut first_rx).await?), vec!["a.near"]);
        assert_eq!(ids(&next(&mut second_rx).await?), vec!["a.near"]);

        first.unsubscribe();
        selector.report_accounts(Some(vec![
            AccountState::new("a.near", false),
            AccountState::new("b.near", true),
        ]));

        assert_eq!(ids(&next(&mut second_rx).await?), vec!["a.near", "b.near"]);
        assert!(timeout(Duration::from_millis(500), first_rx.recv())
            .await?
            .is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_subscriber_sees_changes_in_order() -> Result<()> {
        let stack = Stack::builtin();
        stack.service.setup(SetupConfig::default()).await?;
        let selector = stack.selectors.latest().context("no selector built")?;

        let (callback, mut rx) = channel_callback();
        let _subscription = stack.service.register_accounts_subscriber(callback).await?;
        assert!(next(&mut rx).await?.is_empty());

        for name in ["a.near", "b.near", "c.near"] {
            selector.report_accounts(Some(vec![AccountState::new(name, true)]));
            // Repeats are suppressed
            selector.report_accounts(Some(vec![AccountState::new(name, true)]));
        }
        selector.report_accounts(None);

        assert_eq!(ids(&next(&mut rx).await?), vec!["a.near"]);
        assert_eq!(ids(&next(&mut rx).await?), vec!["b.near"]);
        assert_eq!(ids(&next(&mut rx).await?), vec!["c.near"]);
        assert!(next(&mut rx).await?.is_empty());
        assert!(timeout(Duration::from_millis(100), rx.recv()).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_selector_stream_replays_current_state() -> Result<()> {
        let stack = Stack::builtin();
        stack.service.setup(SetupConfig::default()).await?;
        let selector = stack.selectors.latest().context("no selector built")?;
        selector.sign_in("here-wallet", vec![AccountState::new("a.near", true)])?;

        let mut states = selector.subscribe().into_stream();
        let current = timeout(Duration::from_millis(500), states.next())
            .await?
            .context("stream ended")?;
        assert_eq!(current.selected_wallet_id.as_deref(), Some("here-wallet"));

        selector.store().sign_out();
        let signed_out = timeout(Duration::from_millis(500), states.next())
            .await?
            .context("stream ended")?;
        assert!(signed_out.accounts.is_none());
        assert!(!selector.is_signed_in());
        Ok(())
    }
}
