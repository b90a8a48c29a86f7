//! Core Error Types
//!
//! Error taxonomy for the whitelist/proof core:
//! - validation failures (malformed addresses, bad sale windows) are
//!   client faults and are never retried;
//! - not-found failures (missing whitelist, batch, sale, membership)
//!   are a distinct class surfaced as such to the caller boundary;
//! - store failures wrap the underlying backend and count as internal
//!   faults. Retry policy, if any, lives with the backend.

use thiserror::Error;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    // ============================================================
    // Validation errors
    // ============================================================
    /// Address fails the checksummed hex-address format
    #[error("{address} is not an address")]
    InvalidAddress { address: String },

    /// Malformed identifier (batch id, whitelist id, sale type)
    #[error("invalid {kind}: {value:?}")]
    InvalidIdentifier { kind: &'static str, value: String },

    /// Digest is not 32 hex-encoded bytes
    #[error("invalid digest encoding")]
    InvalidDigest,

    /// Sale window is inverted
    #[error("sale ends ({end}) before sale start ({start})")]
    InvalidSaleWindow { start: u64, end: u64 },

    /// A Merkle tree over zero addresses is not provable
    #[error("cannot build a tree over an empty address set")]
    EmptyAddressSet,

    /// A stored whitelist has been drained of all addresses
    #[error("whitelist {whitelist} in batch {batch} has no addresses")]
    EmptyWhitelist { batch: String, whitelist: String },

    // ============================================================
    // Not-found errors
    // ============================================================
    /// Whitelist document absent from the batch
    #[error("whitelist {whitelist} not found in batch {batch}")]
    WhitelistNotFound { batch: String, whitelist: String },

    /// Batch has zero whitelist documents
    #[error("batch {batch} has no whitelists")]
    BatchNotFound { batch: String },

    /// The singleton sale record has never been set
    #[error("no active sale configured")]
    SaleNotConfigured,

    /// Address does not appear on any whitelist in the batch
    #[error("address not found")]
    AddressNotWhitelisted { address: String },

    /// Address hash is not a leaf of the tree being proven against
    #[error("{address} is not a leaf of this tree")]
    AddressNotInTree { address: String },

    // ============================================================
    // Internal errors
    // ============================================================
    /// Underlying document store failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a [`WhitelistStore`](crate::storage::WhitelistStore) backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Document failed to round-trip through the store encoding
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Backend unavailable or corrupt
    #[error("backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_address_message_names_the_offender() {
        let err = CoreError::InvalidAddress {
            address: "0xnope".to_string(),
        };
        assert_eq!(err.to_string(), "0xnope is not an address");
    }

    #[test]
    fn sale_window_message_carries_both_timestamps() {
        let err = CoreError::InvalidSaleWindow { start: 10, end: 3 };
        assert_eq!(err.to_string(), "sale ends (3) before sale start (10)");
    }

    #[test]
    fn store_error_converts_into_core_error() {
        let err: CoreError = StoreError::Backend("db down".to_string()).into();
        assert!(matches!(err, CoreError::Store(_)));
    }
}
