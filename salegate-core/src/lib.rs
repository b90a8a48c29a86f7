//! Salegate Core
//!
//! Whitelist batch / Merkle-proof subsystem for token sale allocation
//! certificates:
//!
//! - address canonicalization and checksum validation
//! - canonical sorted-leaf Merkle trees with inclusion proofs
//! - whitelist document storage behind an injected [`storage::WhitelistStore`]
//! - batch aggregation into publishable summaries
//! - proof resolution picking the best whitelist per address
//! - the singleton sale descriptor
//!
//! The HTTP surface, auth-token verification and rate limiting live in
//! `salegate-api`; this crate only produces and consumes plain data
//! records.

pub mod error;
pub mod merkle;
pub mod ops;
pub mod storage;
pub mod types;

pub use error::{CoreError, CoreResult, StoreError, StoreResult};
pub use merkle::{verify, Digest, MerkleTree};
pub use ops::{BatchAggregator, ProofResolver, SaleManager, WhitelistAdmin};
pub use storage::{MemoryStore, SledStore, WhitelistStore};
pub use types::{
    Address, AllocationProof, BatchId, BatchSummary, Sale, SaleKind, Whitelist, WhitelistId,
};
