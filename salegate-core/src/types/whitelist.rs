//! Whitelist and batch types
//!
//! A whitelist is a tier-scoped address set with a shared allocation
//! cap, stored as one document keyed by `(batch, whitelist)`. A batch
//! is nothing more than the set of whitelist documents sharing a batch
//! identifier; it is never stored as its own entity. The projections
//! ([`BatchSummary`], [`AllocationProof`]) are derived on demand and
//! never persisted.

use crate::error::{CoreError, CoreResult};
use crate::merkle::{Digest, MerkleTree};
use crate::types::address::Address;
use serde::{Deserialize, Serialize};

/// Batch identifier (non-empty string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BatchId(String);

impl BatchId {
    pub fn new(id: impl Into<String>) -> CoreResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::InvalidIdentifier {
                kind: "batch id",
                value: id,
            });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BatchId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BatchId> for String {
    fn from(id: BatchId) -> Self {
        id.0
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whitelist identifier (non-empty string). The lexicographic byte
/// order of these ids fixes the whitelist's index within its batch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WhitelistId(String);

impl WhitelistId {
    pub fn new(id: impl Into<String>) -> CoreResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::InvalidIdentifier {
                kind: "whitelist id",
                value: id,
            });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rebuild an id from a key the store itself wrote.
    pub(crate) fn trusted(id: String) -> Self {
        Self(id)
    }
}

impl TryFrom<String> for WhitelistId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WhitelistId> for String {
    fn from(id: WhitelistId) -> Self {
        id.0
    }
}

impl std::fmt::Display for WhitelistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One whitelist document: tier classifier, allocation cap and the
/// address set granted that allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whitelist {
    #[serde(rename = "tierCode")]
    pub tier_code: u32,
    pub allocation: u64,
    pub addresses: Vec<Address>,
}

impl Whitelist {
    /// Build a whitelist, collapsing duplicate addresses. The first
    /// occurrence keeps its position; membership is what matters, the
    /// Merkle engine re-sorts anyway.
    pub fn new(tier_code: u32, allocation: u64, addresses: Vec<Address>) -> Self {
        let mut deduped: Vec<Address> = Vec::with_capacity(addresses.len());
        for address in addresses {
            if !deduped.contains(&address) {
                deduped.push(address);
            }
        }
        Self {
            tier_code,
            allocation,
            addresses: deduped,
        }
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.addresses.iter().any(|a| a == address)
    }

    /// Canonical Merkle root over the address set.
    pub fn merkle_root(&self) -> CoreResult<Digest> {
        Ok(MerkleTree::from_addresses(&self.addresses)?.root())
    }
}

/// Read-only projection of a batch: parallel, index-aligned sequences,
/// one entry per whitelist in the batch's stable enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub tier_codes: Vec<u32>,
    pub allocations: Vec<u64>,
    pub merkle_roots: Vec<Digest>,
}

impl BatchSummary {
    pub fn len(&self) -> usize {
        self.merkle_roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merkle_roots.is_empty()
    }
}

/// Proof response for one `(sale, address)` pair: the winning
/// whitelist's allocation, tier and batch index, plus the sibling-hash
/// path from the address's leaf to that whitelist's root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationProof {
    pub allocation: u64,
    pub tier_code: u32,
    pub whitelist_idx: usize,
    pub proof: Vec<Digest>,
}
