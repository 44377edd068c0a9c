//! The in-flight connection handshake.

use tokio::sync::oneshot;
use tracing::debug;

/// Handle to the one handshake a service may have running.
///
/// Firing `cancel` settles that handshake with `ConnectionCancelled`.
#[derive(Debug)]
pub struct PendingConnection {
    pub generation: u64,
    pub cancel: oneshot::Sender<()>,
}

impl PendingConnection {
    /// Create a handle and the receiver the handshake listens on.
    pub fn new(generation: u64) -> (Self, oneshot::Receiver<()>) {
        let (cancel, receiver) = oneshot::channel();
        (Self { generation, cancel }, receiver)
    }

    /// Stop the handshake. A handshake that already settled is unaffected.
    pub fn cancel(self) {
        if self.cancel.send(()).is_ok() {
            debug!(generation = self.generation, "Pending connection cancelled");
        }
    }
}
