//! Account address parsing, formatting, and derivation.
//!
//! An address is 32 bytes. Text forms are hex with an optional `0x` prefix;
//! short forms such as `0x1` are left-padded with zeros.

use crate::constants::ED25519_SCHEME;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tiny_keccak::{Hasher, Sha3};

/// Address length in bytes.
pub const ADDRESS_LENGTH: usize = 32;

#[derive(Debug, Error, PartialEq)]
pub enum AddressError {
    #[error("address must be a non-empty string")]
    Empty,

    #[error("address is longer than {max} hex characters ({actual})", max = ADDRESS_LENGTH * 2)]
    TooLong { actual: usize },

    #[error("invalid hex in address: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// 32-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Address of a single-signer ed25519 account:
    /// `sha3_256(public_key || 0x00)`.
    pub fn from_ed25519_public_key(public_key: &[u8; 32]) -> Self {
        let mut hasher = Sha3::v256();
        hasher.update(public_key);
        hasher.update(&[ED25519_SCHEME]);
        let mut out = [0u8; ADDRESS_LENGTH];
        hasher.finalize(&mut out);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Full `0x`-prefixed, 64-character hex form.
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// `0x`-prefixed hex with leading zeros removed (`0x1`, `0xab12...`).
    pub fn to_short_string(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }
}

impl FromStr for AccountAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() {
            return Err(AddressError::Empty);
        }
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(AddressError::TooLong {
                actual: digits.len(),
            });
        }

        let padded = format!("{:0>width$}", digits, width = ADDRESS_LENGTH * 2);
        let mut out = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut out)?;
        Ok(Self(out))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_literal())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_short_string())
    }
}

impl From<[u8; ADDRESS_LENGTH]> for AccountAddress {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_literal())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
