//! The escrow view model.
//!
//! Bridges user intent to chain calls: fetch-on-login, intent building,
//! submission through the wallet session, and list reconciliation afterward.
//! The presentation layer renders from the snapshots and the notification
//! stream exposed here; it never talks to the chain or the wallet directly.

use crate::{
    config::DashboardConfig,
    constants::FN_GET_ESCROWS,
    denom,
    error::DashboardError,
    gateway::{ChainClient, ContractQuery},
    session::{SubmissionOutcome, WalletSession},
    types::{Address, EscrowRecord, EscrowStatus, TransactionIntent},
};
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

/// A user-facing notice emitted by the view model.
///
/// The presentation layer drains these from the receiver handed out by
/// [`EscrowDashboard::new`] and renders them however it likes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// Routine information, e.g. a completed action.
    Info(String),
    /// Something failed; the dashboard keeps running.
    Error(String),
}

/// Transient form state for the create-escrow inputs.
///
/// Fields persist across rejected and failed submissions so the user can
/// retry; they clear only once a submission is confirmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EscrowForm {
    /// Amount in display units, as typed.
    pub amount: String,
    /// Seller address, as typed.
    pub seller: String,
    /// Buyer address, as typed.
    pub buyer: String,
    /// Inline error from the last local precondition check.
    pub error: Option<String>,
}

struct ListState {
    records: Vec<EscrowRecord>,
    /// Sequence number of the refresh that produced `records`.
    applied_seq: u64,
}

/// The escrow view model.
///
/// One instance per dashboard. At most one submission is in flight at a
/// time; list refreshes are never blocked by submissions and reconcile by
/// issuance order, so a stale reply can never overwrite a newer list.
pub struct EscrowDashboard<S, C> {
    session: Arc<S>,
    chain: Arc<C>,
    config: DashboardConfig,
    list: Mutex<ListState>,
    form: Mutex<EscrowForm>,
    submitting: AtomicBool,
    refresh_seq: AtomicU64,
    was_logged_in: AtomicBool,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl<S, C> EscrowDashboard<S, C>
where
    S: WalletSession,
    C: ChainClient,
{
    /// Creates the view model and the notification stream it reports on.
    pub fn new(
        session: Arc<S>,
        chain: Arc<C>,
        config: DashboardConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (notifications, receiver) = mpsc::unbounded_channel();
        let this = Self {
            session,
            chain,
            config,
            list: Mutex::new(ListState { records: Vec::new(), applied_seq: 0 }),
            form: Mutex::new(EscrowForm::default()),
            submitting: AtomicBool::new(false),
            refresh_seq: AtomicU64::new(0),
            was_logged_in: AtomicBool::new(false),
            notifications,
        };
        (this, receiver)
    }

    /// Snapshot of the current escrow list.
    pub async fn escrows(&self) -> Vec<EscrowRecord> {
        self.list.lock().await.records.clone()
    }

    /// Snapshot of the form state.
    pub async fn form(&self) -> EscrowForm {
        self.form.lock().await.clone()
    }

    /// Whether a submission is awaiting its terminal outcome.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Observes the session and refreshes the list when it transitions into
    /// the logged-in state.
    ///
    /// Call whenever login state may have changed.
    pub async fn sync_session(&self) {
        let logged_in = self.session.state().active_address().is_some();
        let was = self.was_logged_in.swap(logged_in, Ordering::AcqRel);
        if logged_in && !was {
            debug!("session logged in, fetching escrows");
            self.refresh_list().await;
        }
    }

    /// Delegates logout to the session provider.
    pub async fn logout(&self) {
        self.session.logout().await;
        self.was_logged_in.store(false, Ordering::Release);
    }

    /// Fetches the escrow list and replaces the local copy.
    ///
    /// Background operation: failures are logged and surfaced as
    /// notifications, never returned. The list is only ever replaced
    /// wholesale, and only by a reply newer than the one it shows.
    pub async fn refresh_list(&self) {
        match self.try_refresh().await {
            Ok(()) => {}
            Err(DashboardError::NotLoggedIn) => debug!("skipping refresh, not logged in"),
            Err(err) => {
                warn!(%err, "failed to refresh escrow list");
                self.notify_error("could not refresh the escrow list");
            }
        }
    }

    /// Builds, submits, and reconciles a new escrow.
    ///
    /// Local precondition failures (not logged in, malformed inputs, a
    /// submission already in flight) return the error, mirror it into the
    /// form's inline slot, and never reach the network. Otherwise the
    /// terminal outcome is returned and the list refreshed regardless of
    /// which outcome it was.
    pub async fn create_escrow(
        &self,
        amount_text: &str,
        seller_text: &str,
        buyer_text: &str,
    ) -> Result<SubmissionOutcome, DashboardError> {
        {
            let mut form = self.form.lock().await;
            form.amount = amount_text.to_owned();
            form.seller = seller_text.to_owned();
            form.buyer = buyer_text.to_owned();
            form.error = None;
        }
        let result = self.try_create(amount_text, seller_text, buyer_text).await;
        match &result {
            Ok(SubmissionOutcome::Confirmed) => *self.form.lock().await = EscrowForm::default(),
            Ok(_) => {}
            Err(err) => self.form.lock().await.error = Some(err.to_string()),
        }
        result
    }

    async fn try_create(
        &self,
        amount_text: &str,
        seller_text: &str,
        buyer_text: &str,
    ) -> Result<SubmissionOutcome, DashboardError> {
        if self.session.state().active_address().is_none() {
            return Err(DashboardError::NotLoggedIn);
        }
        let value = denom::to_smallest_unit(amount_text)?;
        let seller: Address = seller_text.trim().parse()?;
        let buyer: Address = buyer_text.trim().parse()?;
        let intent =
            TransactionIntent::create_escrow(self.config.contract.clone(), value, &seller, &buyer);

        let outcome = self.submit_guarded(intent).await?;
        self.notify_outcome(&outcome, "escrow created");
        self.refresh_list().await;
        Ok(outcome)
    }

    /// Submits a status transition for an escrow known to be active.
    ///
    /// The caller is responsible for only offering this on active escrows;
    /// the contract is the final arbiter and may still reject the call.
    pub async fn update_escrow_status(
        &self,
        escrow_id: u64,
        target: EscrowStatus,
    ) -> Result<SubmissionOutcome, DashboardError> {
        if self.session.state().active_address().is_none() {
            return Err(DashboardError::NotLoggedIn);
        }
        let intent =
            TransactionIntent::update_status(self.config.contract.clone(), escrow_id, target)
                .ok_or(DashboardError::NotATerminalStatus(target))?;

        let outcome = self.submit_guarded(intent).await?;
        self.notify_outcome(&outcome, "escrow updated");
        self.refresh_list().await;
        Ok(outcome)
    }

    async fn try_refresh(&self) -> Result<(), DashboardError> {
        let Some(caller) = self.session.state().active_address().cloned() else {
            return Err(DashboardError::NotLoggedIn);
        };
        let seq = self.refresh_seq.fetch_add(1, Ordering::AcqRel) + 1;
        let query = ContractQuery {
            contract: self.config.contract.clone(),
            caller,
            function: FN_GET_ESCROWS.to_owned(),
            args: Vec::new(),
        };
        let entries = self.chain.query_contract(query).await?;
        let records = EscrowRecord::decode_list(&entries)?;

        let mut list = self.list.lock().await;
        if seq <= list.applied_seq {
            debug!(seq, applied = list.applied_seq, "discarding stale escrow list");
            return Ok(());
        }
        debug!(seq, count = records.len(), "escrow list refreshed");
        list.records = records;
        list.applied_seq = seq;
        Ok(())
    }

    /// Runs one submission under the in-flight guard.
    ///
    /// The guard only serializes submissions; refreshes stay free to run.
    async fn submit_guarded(
        &self,
        intent: TransactionIntent,
    ) -> Result<SubmissionOutcome, DashboardError> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DashboardError::SubmissionInFlight);
        }
        info!(data = %intent.data(), value = %intent.value, "submitting transaction");
        let outcome = self.session.submit(intent).await;
        self.submitting.store(false, Ordering::Release);
        Ok(outcome)
    }

    fn notify_outcome(&self, outcome: &SubmissionOutcome, success: &str) {
        match outcome {
            SubmissionOutcome::Confirmed => {
                info!("{success}");
                self.notify_info(success);
            }
            SubmissionOutcome::Rejected => {
                info!("transaction rejected in the wallet");
                self.notify_info("transaction rejected in the wallet");
            }
            SubmissionOutcome::Failed(reason) => {
                warn!(%reason, "transaction failed");
                self.notify_error(&format!("transaction failed: {reason}"));
            }
        }
    }

    fn notify_info(&self, message: &str) {
        let _ = self.notifications.send(Notification::Info(message.to_owned()));
    }

    fn notify_error(&self, message: &str) {
        let _ = self.notifications.send(Notification::Error(message.to_owned()));
    }
}
