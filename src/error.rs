//! Dashboard error types.

use crate::{
    denom::AmountError,
    gateway::GatewayError,
    types::{AddressError, DecodeError, EscrowStatus},
};
use thiserror::Error;

/// The overarching error type returned by dashboard operations.
///
/// The first three variants are local precondition failures: they are
/// produced before any network call and surfaced inline in the form. The
/// rest wrap failures of the external collaborators.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The operation requires a logged-in session with a resolvable address.
    #[error("wallet session is not logged in")]
    NotLoggedIn,
    /// Another submission is still awaiting its terminal outcome.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    /// Status updates can only target a terminal status.
    #[error("{0} is not a terminal escrow status")]
    NotATerminalStatus(EscrowStatus),
    /// The entered amount is not usable.
    #[error(transparent)]
    Amount(#[from] AmountError),
    /// An entered address is not usable.
    #[error(transparent)]
    Address(#[from] AddressError),
    /// Talking to the gateway failed.
    #[error(transparent)]
    Query(#[from] GatewayError),
    /// The contract's reply could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
