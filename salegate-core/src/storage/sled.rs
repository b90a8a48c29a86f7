//! Sled store backend
//!
//! Embedded persistent implementation. Each batch maps to one sled
//! tree (key = whitelist id, value = JSON document), so tree iteration
//! yields exactly the lexicographic enumeration the trait requires.
//! The sale singleton lives in the db's default tree under a fixed
//! key, out of the way of batch trees.

use async_trait::async_trait;
use std::path::Path;

use super::WhitelistStore;
use crate::error::{StoreError, StoreResult};
use crate::types::{BatchId, Sale, Whitelist, WhitelistId};

const SALE_KEY: &[u8] = b"active_sale";

/// Sled-backed [`WhitelistStore`].
#[derive(Debug, Clone)]
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open or create the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let db = sled::open(path)
            .map_err(|e| StoreError::Backend(format!("failed to open sled db: {}", e)))?;
        Ok(Self { db })
    }

    /// Ephemeral database for tests.
    pub fn temporary() -> StoreResult<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| StoreError::Backend(format!("failed to open sled db: {}", e)))?;
        Ok(Self { db })
    }

    /// Flush outstanding writes to disk.
    pub fn flush(&self) -> StoreResult<()> {
        self.db
            .flush()
            .map_err(|e| StoreError::Backend(format!("failed to flush db: {}", e)))?;
        Ok(())
    }

    fn batch_tree(&self, batch: &BatchId) -> StoreResult<sled::Tree> {
        self.db
            .open_tree(batch.as_str())
            .map_err(|e| StoreError::Backend(format!("failed to open batch tree: {}", e)))
    }
}

fn serialize<T: serde::Serialize>(value: &T) -> StoreResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn deserialize<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> StoreResult<T> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

#[async_trait]
impl WhitelistStore for SledStore {
    async fn get_whitelist(
        &self,
        batch: &BatchId,
        id: &WhitelistId,
    ) -> StoreResult<Option<Whitelist>> {
        let tree = self.batch_tree(batch)?;
        let value = tree
            .get(id.as_str())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        value.map(|bytes| deserialize(&bytes)).transpose()
    }

    async fn put_whitelist(
        &self,
        batch: &BatchId,
        id: &WhitelistId,
        whitelist: &Whitelist,
    ) -> StoreResult<()> {
        let tree = self.batch_tree(batch)?;
        tree.insert(id.as_str(), serialize(whitelist)?)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn delete_whitelist(&self, batch: &BatchId, id: &WhitelistId) -> StoreResult<bool> {
        let tree = self.batch_tree(batch)?;
        let removed = tree
            .remove(id.as_str())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(removed.is_some())
    }

    async fn list_whitelists(
        &self,
        batch: &BatchId,
    ) -> StoreResult<Vec<(WhitelistId, Whitelist)>> {
        let tree = self.batch_tree(batch)?;
        let mut entries = Vec::new();
        for item in tree.iter() {
            let (key, value) = item.map_err(|e| StoreError::Backend(e.to_string()))?;
            let id = String::from_utf8(key.to_vec())
                .map_err(|_| StoreError::Serialization("non-utf8 whitelist key".to_string()))?;
            entries.push((WhitelistId::trusted(id), deserialize(&value)?));
        }
        Ok(entries)
    }

    async fn get_sale(&self) -> StoreResult<Option<Sale>> {
        let value = self
            .db
            .get(SALE_KEY)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        value.map(|bytes| deserialize(&bytes)).transpose()
    }

    async fn set_sale(&self, sale: &Sale) -> StoreResult<()> {
        self.db
            .insert(SALE_KEY, serialize(sale)?)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}
