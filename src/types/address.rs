//! Bech32 account addresses.

use std::{fmt, str::FromStr};

use bech32::{Bech32, Hrp};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Human-readable part of every account address on the network.
pub const ADDRESS_HRP: &str = "erd";

/// Length in bytes of the public key an address encodes.
pub const ADDRESS_LEN: usize = 32;

/// Errors producing an [`Address`].
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    /// The string is not valid bech32.
    #[error("malformed bech32 address: {0}")]
    Bech32(#[from] bech32::DecodeError),
    /// The human-readable part is not [`ADDRESS_HRP`].
    #[error("unexpected address prefix {found:?}, expected \"erd\"")]
    WrongHrp {
        /// The prefix that was found.
        found: String,
    },
    /// The payload is not exactly [`ADDRESS_LEN`] bytes.
    #[error("address payload must be 32 bytes, got {0}")]
    WrongLength(usize),
    /// The human-readable part could not be constructed.
    #[error("invalid address prefix: {0}")]
    Hrp(#[from] bech32::primitives::hrp::Error),
    /// The payload could not be re-encoded.
    #[error("failed to encode address: {0}")]
    Encode(#[from] bech32::EncodeError),
}

/// A validated, canonically encoded account address.
///
/// Parsing checks the bech32 checksum, the `erd` prefix, and the 32-byte
/// payload length, and re-encodes to the canonical lowercase form, so two
/// addresses compare equal iff they denote the same account.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address {
    bech32: String,
    bytes: [u8; ADDRESS_LEN],
}

impl Address {
    /// Builds an address from a raw 32-byte public key.
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Result<Self, AddressError> {
        let hrp = Hrp::parse(ADDRESS_HRP)?;
        let bech32 = bech32::encode::<Bech32>(hrp, &bytes)?;
        Ok(Self { bech32, bytes })
    }

    /// The canonical bech32 form.
    pub fn as_bech32(&self) -> &str {
        &self.bech32
    }

    /// The raw public key bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.bytes
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hrp, data) = bech32::decode(s)?;
        if hrp.to_string() != ADDRESS_HRP {
            return Err(AddressError::WrongHrp { found: hrp.to_string() });
        }
        let bytes: [u8; ADDRESS_LEN] =
            data.try_into().map_err(|data: Vec<u8>| AddressError::WrongLength(data.len()))?;
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bech32)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bech32)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bech32)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
