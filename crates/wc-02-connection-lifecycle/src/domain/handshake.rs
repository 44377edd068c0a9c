//! Polling handshake state machine
//!
//! Pure transition logic; the service drives it with a timer and the
//! selector snapshot.
//!
//! ```text
//! Idle ──► Polling ──► Resolved
//!             │   └──► TimedOut
//!             └──────► Cancelled (superseded by a newer connect)
//! ```
//!
//! The first check happens at elapsed = 0, then once per poll interval. A
//! present accounts field resolves even when the list is empty. The check
//! at elapsed == timeout still runs; the handshake fails at the first check
//! where elapsed exceeds the timeout.

use std::time::Duration;

use super::config::HandshakeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandshakeState {
    /// Not started.
    #[default]
    Idle,
    /// Waiting; the next check happens at `elapsed`.
    Polling { elapsed: Duration },
    /// Accounts were present at the last check.
    Resolved,
    /// Elapsed time exceeded the timeout.
    TimedOut,
    /// Superseded before settling.
    Cancelled,
}

impl HandshakeState {
    /// Advance by one check.
    ///
    /// `accounts_present` is whether the selector snapshot carries an
    /// accounts field at this check. Terminal states are returned unchanged.
    #[must_use]
    pub fn step(self, accounts_present: bool, config: &HandshakeConfig) -> Self {
        let elapsed = match self {
            Self::Idle => Duration::ZERO,
            Self::Polling { elapsed } => elapsed,
            terminal => return terminal,
        };

        if accounts_present {
            return Self::Resolved;
        }

        if elapsed > config.timeout {
            return Self::TimedOut;
        }

        Self::Polling {
            elapsed: elapsed + config.poll_interval,
        }
    }

    /// Move a live handshake to `Cancelled`.
    #[must_use]
    pub fn cancel(self) -> Self {
        if self.is_terminal() {
            self
        } else {
            Self::Cancelled
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::TimedOut | Self::Cancelled)
    }

    /// Time of the next check, while polling.
    #[must_use]
    pub fn next_check_at(&self) -> Option<Duration> {
        match self {
            Self::Polling { elapsed } => Some(*elapsed),
            _ => None,
        }
    }
}
