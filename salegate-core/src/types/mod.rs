//! Core type definitions
//!
//! Naming conventions:
//! - `*Id` newtypes for document keys, validated on construction
//! - wire field names (serde renames) match the published JSON API

pub mod address;
pub mod sale;
pub mod whitelist;

pub use address::Address;
pub use sale::{Sale, SaleKind};
pub use whitelist::{AllocationProof, BatchId, BatchSummary, Whitelist, WhitelistId};
