//! # State Subscriber
//!
//! Defines the subscription side of the selector state store.

use crate::state::SelectorState;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The state store was dropped.
    #[error("State store closed")]
    Closed,
}

/// A subscription handle for receiving selector states.
///
/// Yields the state current at subscription time first, then every later
/// emission. When dropped, the receiver is released and the store's
/// subscriber count drops with it.
pub struct StateSubscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<SelectorState>,

    /// State captured at subscription time, not yet handed out.
    pending_initial: Option<SelectorState>,
}

impl StateSubscription {
    /// Create a new subscription.
    pub(crate) fn new(
        receiver: broadcast::Receiver<SelectorState>,
        initial: Option<SelectorState>,
    ) -> Self {
        Self {
            receiver,
            pending_initial: initial,
        }
    }

    /// Receive the next state.
    ///
    /// # Returns
    ///
    /// - `Some(state)` - The next state
    /// - `None` - The store was dropped
    pub async fn recv(&mut self) -> Option<SelectorState> {
        if let Some(initial) = self.pending_initial.take() {
            return Some(initial);
        }

        loop {
            match self.receiver.recv().await {
                Ok(state) => return Some(state),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some states dropped");
                }
            }
        }
    }

    /// Try to receive the next state without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(state))` - A state was available
    /// - `Ok(None)` - No state available (would block)
    /// - `Err(SubscriptionError::Closed)` - The store was dropped
    pub fn try_recv(&mut self) -> Result<Option<SelectorState>, SubscriptionError> {
        if let Some(initial) = self.pending_initial.take() {
            return Ok(Some(initial));
        }

        loop {
            match self.receiver.try_recv() {
                Ok(state) => return Ok(Some(state)),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            }
        }
    }

    /// Convert into a `Stream`.
    #[must_use]
    pub fn into_stream(self) -> StateStream {
        StateStream::new(self)
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
/// Lagged gaps are skipped; the stream ends when the store is dropped.
pub struct StateStream {
    pending_initial: Option<SelectorState>,
    inner: BroadcastStream<SelectorState>,
}

impl StateStream {
    /// Create a new state stream from a subscription.
    #[must_use]
    pub fn new(subscription: StateSubscription) -> Self {
        Self {
            pending_initial: subscription.pending_initial,
            inner: BroadcastStream::new(subscription.receiver),
        }
    }
}

impl Stream for StateStream {
    type Item = SelectorState;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(initial) = this.pending_initial.take() {
            return Poll::Ready(Some(initial));
        }

        loop {
            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(state))) => return Poll::Ready(Some(state)),
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(count)))) => {
                    debug!(lagged = count, "State stream lagged, some states dropped");
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
