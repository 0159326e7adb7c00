//! Escrow records and their on-chain encoding.
//!
//! The contract returns one opaque entry per escrow. Each entry is the
//! contract ABI's nested encoding of the stored record:
//!
//! ```text
//! id         u64, 8 bytes big-endian, >= 1
//! seller     32 raw public key bytes
//! buyer      32 raw public key bytes
//! amount     u32 big-endian byte length, then that many magnitude bytes
//! status     1 discriminant byte
//! created_at u64, 8 bytes big-endian, unix seconds
//! ```
//!
//! The layout is a versioned external format owned by the deployed contract;
//! every malformed shape maps to a [`DecodeError`] rather than a panic.

use crate::{
    constants::{FN_CANCEL_ESCROW, FN_RELEASE_ESCROW},
    denom,
    types::address::{Address, AddressError, ADDRESS_LEN},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an escrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowStatus {
    /// Funds are locked; the escrow can be released or cancelled.
    Active,
    /// Funds were paid out to the buyer.
    Released,
    /// Funds were returned to the seller.
    Cancelled,
}

impl EscrowStatus {
    /// The contract endpoint that moves an active escrow into this status.
    ///
    /// `Active` is the initial state; nothing transitions into it.
    pub fn update_endpoint(self) -> Option<&'static str> {
        match self {
            Self::Active => None,
            Self::Released => Some(FN_RELEASE_ESCROW),
            Self::Cancelled => Some(FN_CANCEL_ESCROW),
        }
    }

    fn from_discriminant(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Active),
            1 => Some(Self::Released),
            2 => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "Active",
            Self::Released => "Released",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// Errors decoding contract return data into escrow records.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The entry ended before the named field was complete.
    #[error("return data ended early while reading {0}")]
    UnexpectedEof(&'static str),
    /// Bytes were left over after a complete record.
    #[error("{0} trailing bytes after a complete record")]
    TrailingBytes(usize),
    /// The status byte does not name a known lifecycle state.
    #[error("unknown status discriminant {0}")]
    UnknownStatus(u8),
    /// Escrow ids start at 1.
    #[error("escrow id must not be zero")]
    ZeroId,
    /// The amount magnitude does not fit 128 bits.
    #[error("escrow amount of {0} bytes does not fit 128 bits")]
    AmountTooLarge(usize),
    /// An embedded address failed validation.
    #[error(transparent)]
    Address(#[from] AddressError),
}

/// A single escrow as reported by the contract.
///
/// Immutable once decoded; the dashboard replaces its list wholesale on every
/// refresh instead of patching records in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowRecord {
    /// Unique id assigned by the contract, starting at 1.
    pub id: u64,
    /// Account that funded the escrow.
    pub seller: Address,
    /// Account the funds are released to.
    pub buyer: Address,
    /// Escrowed amount in display units.
    pub amount: String,
    /// Current lifecycle state.
    pub status: EscrowStatus,
    /// Block timestamp of creation, unix seconds.
    pub created_at: u64,
}

impl EscrowRecord {
    /// Decodes a single return data entry.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = Cursor { bytes };
        let id = cursor.read_u64("id")?;
        if id == 0 {
            return Err(DecodeError::ZeroId);
        }
        let seller = cursor.read_address("seller")?;
        let buyer = cursor.read_address("buyer")?;
        let amount = cursor.read_biguint("amount")?;
        let status_byte = cursor.read_u8("status")?;
        let status = EscrowStatus::from_discriminant(status_byte)
            .ok_or(DecodeError::UnknownStatus(status_byte))?;
        let created_at = cursor.read_u64("created_at")?;
        if !cursor.bytes.is_empty() {
            return Err(DecodeError::TrailingBytes(cursor.bytes.len()));
        }
        Ok(Self {
            id,
            seller,
            buyer,
            amount: denom::from_smallest_unit(amount),
            status,
            created_at,
        })
    }

    /// Decodes every return data entry, in contract order.
    pub fn decode_list(entries: &[Vec<u8>]) -> Result<Vec<Self>, DecodeError> {
        entries.iter().map(|entry| Self::decode(entry)).collect()
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        if self.bytes.len() < n {
            return Err(DecodeError::UnexpectedEof(field));
        }
        let (head, rest) = self.bytes.split_at(n);
        self.bytes = rest;
        Ok(head)
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take(1, field)?[0])
    }

    fn read_u64(&mut self, field: &'static str) -> Result<u64, DecodeError> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.take(8, field)?);
        Ok(u64::from_be_bytes(raw))
    }

    fn read_address(&mut self, field: &'static str) -> Result<Address, DecodeError> {
        let mut raw = [0u8; ADDRESS_LEN];
        raw.copy_from_slice(self.take(ADDRESS_LEN, field)?);
        Ok(Address::from_bytes(raw)?)
    }

    /// Length-prefixed big-endian magnitude, as the ABI encodes big integers.
    fn read_biguint(&mut self, field: &'static str) -> Result<u128, DecodeError> {
        let mut len = [0u8; 4];
        len.copy_from_slice(self.take(4, field)?);
        let raw = self.take(u32::from_be_bytes(len) as usize, field)?;
        let raw = &raw[raw.iter().take_while(|byte| **byte == 0).count()..];
        if raw.len() > 16 {
            return Err(DecodeError::AmountTooLarge(raw.len()));
        }
        Ok(raw.iter().fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte)))
    }
}
