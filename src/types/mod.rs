//! Core dashboard types.

mod address;
mod escrow;
mod intent;

pub use address::{Address, AddressError, ADDRESS_HRP, ADDRESS_LEN};
pub use escrow::{DecodeError, EscrowRecord, EscrowStatus};
pub use intent::TransactionIntent;
