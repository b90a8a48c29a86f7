//! Batch aggregation
//!
//! A batch is enumerated as the ordered sequence of its whitelist
//! documents, ascending by whitelist id. The position of a whitelist
//! in that sequence is the `whitelist_idx` clients receive in proofs,
//! so [`BatchSummary`] arrays and proof indices stay aligned as long
//! as the store honors its ordering contract.

use std::sync::Arc;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::storage::WhitelistStore;
use crate::types::{BatchId, BatchSummary, Whitelist, WhitelistId};

/// Read-side aggregation over a batch's whitelist documents.
pub struct BatchAggregator {
    store: Arc<dyn WhitelistStore>,
}

impl BatchAggregator {
    pub fn new(store: Arc<dyn WhitelistStore>) -> Self {
        Self { store }
    }

    /// Ordered whitelist documents of a batch. A batch with zero
    /// whitelists does not exist as far as callers are concerned.
    pub async fn enumerate(&self, batch: &BatchId) -> CoreResult<Vec<(WhitelistId, Whitelist)>> {
        let entries = self.store.list_whitelists(batch).await?;
        if entries.is_empty() {
            return Err(CoreError::BatchNotFound {
                batch: batch.to_string(),
            });
        }
        debug!(batch = %batch, whitelists = entries.len(), "batch enumerated");
        Ok(entries)
    }

    /// Publication summary: per-whitelist tier code, allocation and
    /// Merkle root, index-aligned with [`enumerate`](Self::enumerate).
    pub async fn summarize(&self, batch: &BatchId) -> CoreResult<BatchSummary> {
        let mut summary = BatchSummary::default();
        for (id, whitelist) in self.enumerate(batch).await? {
            let root = whitelist.merkle_root().map_err(|err| match err {
                CoreError::EmptyAddressSet => CoreError::EmptyWhitelist {
                    batch: batch.to_string(),
                    whitelist: id.to_string(),
                },
                other => other,
            })?;
            summary.tier_codes.push(whitelist.tier_code);
            summary.allocations.push(whitelist.allocation);
            summary.merkle_roots.push(root);
        }
        Ok(summary)
    }
}
