//! Whitelist administration
//!
//! Wholesale replace/delete of whitelist documents plus incremental
//! address set union/difference. The union/difference operations are
//! read-modify-write against the store and are NOT atomic with respect
//! to concurrent writers on the same whitelist: two racing updates can
//! both read the same prior state and one write wins. Accepted for the
//! expected low write concurrency per whitelist; a transactional store
//! backend could upgrade this to compare-and-swap.

use std::sync::Arc;
use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::storage::WhitelistStore;
use crate::types::{Address, BatchId, Whitelist, WhitelistId};

/// Admin operations over whitelist documents.
pub struct WhitelistAdmin {
    store: Arc<dyn WhitelistStore>,
}

impl WhitelistAdmin {
    pub fn new(store: Arc<dyn WhitelistStore>) -> Self {
        Self { store }
    }

    /// Idempotent full replace. Duplicate addresses collapse before
    /// the document is written; the stored form is returned.
    pub async fn set_whitelist(
        &self,
        batch: &BatchId,
        id: &WhitelistId,
        whitelist: Whitelist,
    ) -> CoreResult<Whitelist> {
        let whitelist = Whitelist::new(
            whitelist.tier_code,
            whitelist.allocation,
            whitelist.addresses,
        );
        self.store.put_whitelist(batch, id, &whitelist).await?;
        info!(
            batch = %batch,
            whitelist = %id,
            tier_code = whitelist.tier_code,
            allocation = whitelist.allocation,
            addresses = whitelist.addresses.len(),
            "whitelist stored"
        );
        Ok(whitelist)
    }

    /// Remove a whitelist document. Deleting an absent whitelist is an
    /// error, so operator typos surface instead of silently succeeding.
    pub async fn delete_whitelist(&self, batch: &BatchId, id: &WhitelistId) -> CoreResult<()> {
        if !self.store.delete_whitelist(batch, id).await? {
            return Err(CoreError::WhitelistNotFound {
                batch: batch.to_string(),
                whitelist: id.to_string(),
            });
        }
        info!(batch = %batch, whitelist = %id, "whitelist removed");
        Ok(())
    }

    /// Set union of the stored addresses and `additions`. Duplicates
    /// collapse, so re-adding is a no-op; returns the updated set.
    pub async fn add_addresses(
        &self,
        batch: &BatchId,
        id: &WhitelistId,
        additions: Vec<Address>,
    ) -> CoreResult<Vec<Address>> {
        let mut whitelist = self.load(batch, id).await?;
        for address in additions {
            if !whitelist.contains(&address) {
                whitelist.addresses.push(address);
            }
        }
        self.store.put_whitelist(batch, id, &whitelist).await?;
        info!(
            batch = %batch,
            whitelist = %id,
            addresses = whitelist.addresses.len(),
            "addresses added"
        );
        Ok(whitelist.addresses)
    }

    /// Set difference of the stored addresses and `removals`. Removing
    /// a non-member is a no-op; returns the updated set.
    pub async fn remove_addresses(
        &self,
        batch: &BatchId,
        id: &WhitelistId,
        removals: Vec<Address>,
    ) -> CoreResult<Vec<Address>> {
        let mut whitelist = self.load(batch, id).await?;
        whitelist.addresses.retain(|a| !removals.contains(a));
        self.store.put_whitelist(batch, id, &whitelist).await?;
        info!(
            batch = %batch,
            whitelist = %id,
            addresses = whitelist.addresses.len(),
            "addresses removed"
        );
        Ok(whitelist.addresses)
    }

    async fn load(&self, batch: &BatchId, id: &WhitelistId) -> CoreResult<Whitelist> {
        self.store
            .get_whitelist(batch, id)
            .await?
            .ok_or_else(|| CoreError::WhitelistNotFound {
                batch: batch.to_string(),
                whitelist: id.to_string(),
            })
    }
}
