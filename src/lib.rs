//! # Escrow Dashboard
//!
//! Library for the escrow dashboard core: wallet-session aware contract
//! queries and transaction submission.

pub mod cli;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod denom;
pub mod error;
pub mod gateway;
pub mod session;
pub mod types;
