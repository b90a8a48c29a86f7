//! Whitelist document storage
//!
//! The core consumes a key-value document store through the
//! [`WhitelistStore`] trait: whitelist documents keyed by
//! `(batch, whitelist)` plus the singleton sale record at a fixed
//! well-known key. The store is injected, never constructed, by the
//! operations layer.
//!
//! Backends must return batch enumerations ordered ascending by
//! whitelist id (lexicographic byte order). That order is load-bearing:
//! it fixes the numeric `whitelist_idx` handed to clients and must stay
//! stable between proof issuance and on-chain verification.

pub mod memory;
pub mod sled;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{BatchId, Sale, Whitelist, WhitelistId};

/// Document store interface for whitelists and the sale singleton.
#[async_trait]
pub trait WhitelistStore: Send + Sync {
    /// Fetch one whitelist document.
    async fn get_whitelist(
        &self,
        batch: &BatchId,
        id: &WhitelistId,
    ) -> StoreResult<Option<Whitelist>>;

    /// Idempotent full replace of one whitelist document.
    async fn put_whitelist(
        &self,
        batch: &BatchId,
        id: &WhitelistId,
        whitelist: &Whitelist,
    ) -> StoreResult<()>;

    /// Remove one whitelist document. Returns whether it existed, so
    /// the caller can surface operator mistakes instead of swallowing
    /// them.
    async fn delete_whitelist(&self, batch: &BatchId, id: &WhitelistId) -> StoreResult<bool>;

    /// All whitelist documents in a batch, ordered ascending by
    /// whitelist id. An unknown batch is simply empty.
    async fn list_whitelists(&self, batch: &BatchId)
        -> StoreResult<Vec<(WhitelistId, Whitelist)>>;

    /// Read the singleton sale record.
    async fn get_sale(&self) -> StoreResult<Option<Sale>>;

    /// Overwrite the singleton sale record.
    async fn set_sale(&self, sale: &Sale) -> StoreResult<()>;
}

pub use self::sled::SledStore;
pub use memory::MemoryStore;
