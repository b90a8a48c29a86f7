//! Blockchain account addresses
//!
//! An [`Address`] is the canonical, lower-cased form of a checksummed
//! 20-byte hex account identifier. Validation happens at every
//! ingestion boundary: parsing user input, deserializing stored
//! documents, anything. Once constructed the value is immutable, so
//! the rest of the crate can use it for set membership and leaf
//! hashing without re-checking.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use sha3::{Digest as _, Keccak256};

/// Canonical account address: `0x` followed by 40 lowercase hex digits.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and validate an address string.
    ///
    /// Accepts the standard checksummed hex format: a `0x` prefix and
    /// exactly 40 hex digits. All-lowercase and all-uppercase inputs
    /// carry no checksum information and are accepted as-is; mixed-case
    /// inputs must satisfy the keccak-based checksum (a letter is
    /// uppercase iff the matching nibble of the hash of the lowercase
    /// hex is >= 8). The canonical lowercase form is retained.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidAddress {
            address: input.to_string(),
        };

        let body = input.strip_prefix("0x").ok_or_else(invalid)?;
        if body.len() != 40 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper && !checksum_matches(body) {
            return Err(invalid());
        }

        Ok(Self(format!("0x{}", body.to_ascii_lowercase())))
    }

    /// Canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The raw 20 bytes, for Merkle leaf hashing.
    pub fn leaf_bytes(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        let hex = &self.0.as_bytes()[2..];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = (nibble(hex[2 * i]) << 4) | nibble(hex[2 * i + 1]);
        }
        out
    }
}

// Canonical form is validated lowercase hex, so this is total.
fn nibble(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        _ => b - b'a' + 10,
    }
}

/// EIP-55 style checksum: hash the lowercase ascii hex and compare
/// letter casing against the hash nibbles.
fn checksum_matches(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());
    body.bytes().enumerate().all(|(i, b)| {
        if !b.is_ascii_alphabetic() {
            return true;
        }
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if nibble >= 8 {
            b.is_ascii_uppercase()
        } else {
            b.is_ascii_lowercase()
        }
    })
}

impl TryFrom<String> for Address {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
