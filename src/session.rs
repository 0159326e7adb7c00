//! Wallet session provider.
//!
//! The session owns login state and the signing flow. The view model holds a
//! shared handle, observes [`SessionState`] snapshots, and delegates every
//! mutation back here; it never writes session state itself.

use crate::types::{Address, TransactionIntent};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Observable login state of a wallet session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Whether a wallet is connected.
    pub is_logged_in: bool,
    /// The connected account, present iff logged in.
    pub address: Option<Address>,
}

impl SessionState {
    /// The connected address, if the session is usable for chain calls.
    pub fn active_address(&self) -> Option<&Address> {
        if self.is_logged_in {
            self.address.as_ref()
        } else {
            None
        }
    }
}

/// Terminal outcome of a submitted transaction intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Signed and broadcast.
    Confirmed,
    /// The user declined to sign. A normal outcome, not an error.
    Rejected,
    /// Signing or broadcast failed.
    Failed(String),
}

/// The external signing and login session.
#[async_trait]
pub trait WalletSession: Send + Sync {
    /// Snapshot of the current login state.
    fn state(&self) -> SessionState;

    /// Starts the provider's login flow.
    async fn login(&self);

    /// Tears the session down.
    async fn logout(&self);

    /// Signs and broadcasts an intent, resolving to its terminal outcome.
    async fn submit(&self, intent: TransactionIntent) -> SubmissionOutcome;
}

/// A session pinned to a known address that can observe but not sign.
///
/// Useful for monitoring an account without a signing device attached; every
/// submission resolves to [`SubmissionOutcome::Failed`].
#[derive(Debug)]
pub struct WatchOnlySession {
    address: Address,
    logged_in: AtomicBool,
}

impl WatchOnlySession {
    /// Creates a connected watch-only session for `address`.
    pub fn connected(address: Address) -> Self {
        Self { address, logged_in: AtomicBool::new(true) }
    }
}

#[async_trait]
impl WalletSession for WatchOnlySession {
    fn state(&self) -> SessionState {
        let logged_in = self.logged_in.load(Ordering::Acquire);
        SessionState {
            is_logged_in: logged_in,
            address: logged_in.then(|| self.address.clone()),
        }
    }

    async fn login(&self) {
        self.logged_in.store(true, Ordering::Release);
    }

    async fn logout(&self) {
        self.logged_in.store(false, Ordering::Release);
    }

    async fn submit(&self, intent: TransactionIntent) -> SubmissionOutcome {
        info!(function = %intent.payload_function, "refusing to sign in watch-only mode");
        SubmissionOutcome::Failed("watch-only session cannot sign transactions".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ADDRESS_LEN;

    #[tokio::test]
    async fn watch_only_session_observes_but_never_signs() {
        let address = Address::from_bytes([5; ADDRESS_LEN]).unwrap();
        let session = WatchOnlySession::connected(address.clone());
        assert_eq!(session.state().active_address(), Some(&address));

        let intent = TransactionIntent::create_escrow(
            address.clone(),
            "0".to_owned(),
            &address,
            &address,
        );
        assert!(matches!(session.submit(intent).await, SubmissionOutcome::Failed(_)));

        session.logout().await;
        assert_eq!(session.state(), SessionState::default());
        assert_eq!(session.state().active_address(), None);
    }
}
