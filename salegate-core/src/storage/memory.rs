//! In-memory store backend
//!
//! Thread-safe map-backed implementation, used by tests and as the
//! dev-mode default. `BTreeMap` keys give the lexicographic
//! enumeration order the trait requires for free.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::WhitelistStore;
use crate::error::StoreResult;
use crate::types::{BatchId, Sale, Whitelist, WhitelistId};

/// Map-backed [`WhitelistStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    batches: RwLock<BTreeMap<BatchId, BTreeMap<WhitelistId, Whitelist>>>,
    sale: RwLock<Option<Sale>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all documents and the sale record.
    pub async fn clear(&self) {
        self.batches.write().await.clear();
        *self.sale.write().await = None;
    }
}

#[async_trait]
impl WhitelistStore for MemoryStore {
    async fn get_whitelist(
        &self,
        batch: &BatchId,
        id: &WhitelistId,
    ) -> StoreResult<Option<Whitelist>> {
        let batches = self.batches.read().await;
        Ok(batches.get(batch).and_then(|wls| wls.get(id)).cloned())
    }

    async fn put_whitelist(
        &self,
        batch: &BatchId,
        id: &WhitelistId,
        whitelist: &Whitelist,
    ) -> StoreResult<()> {
        let mut batches = self.batches.write().await;
        batches
            .entry(batch.clone())
            .or_default()
            .insert(id.clone(), whitelist.clone());
        Ok(())
    }

    async fn delete_whitelist(&self, batch: &BatchId, id: &WhitelistId) -> StoreResult<bool> {
        let mut batches = self.batches.write().await;
        Ok(batches
            .get_mut(batch)
            .map(|wls| wls.remove(id).is_some())
            .unwrap_or(false))
    }

    async fn list_whitelists(
        &self,
        batch: &BatchId,
    ) -> StoreResult<Vec<(WhitelistId, Whitelist)>> {
        let batches = self.batches.read().await;
        Ok(batches
            .get(batch)
            .map(|wls| {
                wls.iter()
                    .map(|(id, wl)| (id.clone(), wl.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_sale(&self) -> StoreResult<Option<Sale>> {
        Ok(self.sale.read().await.clone())
    }

    async fn set_sale(&self, sale: &Sale) -> StoreResult<()> {
        *self.sale.write().await = Some(sale.clone());
        Ok(())
    }
}
