//! Sale descriptor management
//!
//! The sale is a singleton record replaced wholesale by the admin.
//! Setting it validates the time window and that the referenced batch
//! actually holds at least one whitelist, so a sale can never point
//! clients at nothing.

use std::sync::Arc;
use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::ops::batch::BatchAggregator;
use crate::storage::WhitelistStore;
use crate::types::Sale;

/// Validated access to the singleton sale record.
pub struct SaleManager {
    store: Arc<dyn WhitelistStore>,
    batches: BatchAggregator,
}

impl SaleManager {
    pub fn new(store: Arc<dyn WhitelistStore>) -> Self {
        Self {
            batches: BatchAggregator::new(store.clone()),
            store,
        }
    }

    /// Validate and overwrite the active sale.
    pub async fn set_sale(&self, sale: Sale) -> CoreResult<Sale> {
        sale.validate()?;
        // existence check: the referenced batch must be non-empty now
        self.batches.enumerate(&sale.batch).await?;
        self.store.set_sale(&sale).await?;
        info!(
            kind = %sale.kind,
            batch = %sale.batch,
            start = sale.start_timestamp,
            end = sale.end_timestamp,
            "active sale replaced"
        );
        Ok(sale)
    }

    /// The active sale, if one has been configured.
    pub async fn get_sale(&self) -> CoreResult<Sale> {
        self.store
            .get_sale()
            .await?
            .ok_or(CoreError::SaleNotConfigured)
    }
}
