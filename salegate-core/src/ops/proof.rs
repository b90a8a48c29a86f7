//! Proof resolution
//!
//! Given the active sale and a client address, scan every whitelist in
//! the sale's batch and build the inclusion proof for the best match.
//!
//! When an address sits on several whitelists the one with the
//! strictly greatest allocation wins, first-seen keeping exact ties.
//! The assumption is that a user prefers a higher value over a higher
//! tier when a lower tier grants them more; this is a policy choice,
//! not a cryptographic requirement.
//!
//! The scan is O(total addresses across the batch) per request. Fine
//! for the expected handful of whitelist memberships per address, but
//! it is the first thing to revisit if batches grow large.

use std::sync::Arc;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::merkle::MerkleTree;
use crate::ops::batch::BatchAggregator;
use crate::storage::WhitelistStore;
use crate::types::{Address, AllocationProof, Sale, Whitelist};

/// Builds allocation proofs for client addresses.
pub struct ProofResolver {
    batches: BatchAggregator,
}

impl ProofResolver {
    pub fn new(store: Arc<dyn WhitelistStore>) -> Self {
        Self {
            batches: BatchAggregator::new(store),
        }
    }

    /// Resolve the winning whitelist for `address` in the sale's batch
    /// and build its Merkle path.
    pub async fn resolve(&self, sale: &Sale, address: &Address) -> CoreResult<AllocationProof> {
        let entries = self.batches.enumerate(&sale.batch).await?;

        let mut winner: Option<(usize, &Whitelist)> = None;
        for (idx, (_, whitelist)) in entries.iter().enumerate() {
            if !whitelist.contains(address) {
                continue;
            }
            let replace = match winner {
                None => true,
                Some((_, best)) => whitelist.allocation > best.allocation,
            };
            if replace {
                winner = Some((idx, whitelist));
            }
        }

        let (whitelist_idx, whitelist) =
            winner.ok_or_else(|| CoreError::AddressNotWhitelisted {
                address: address.to_string(),
            })?;

        let tree = MerkleTree::from_addresses(&whitelist.addresses)?;
        let proof = tree.proof(address)?;

        debug!(
            address = %address,
            batch = %sale.batch,
            whitelist_idx,
            allocation = whitelist.allocation,
            "proof resolved"
        );

        Ok(AllocationProof {
            allocation: whitelist.allocation,
            tier_code: whitelist.tier_code,
            whitelist_idx,
            proof,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::verify;
    use crate::storage::MemoryStore;
    use crate::types::{BatchId, SaleKind, WhitelistId};

    fn batch(id: &str) -> BatchId {
        BatchId::new(id).unwrap()
    }

    fn wl_id(id: &str) -> WhitelistId {
        WhitelistId::new(id).unwrap()
    }

    fn addr(suffix: u8) -> Address {
        Address::parse(&format!("0x{:040x}", suffix)).unwrap()
    }

    fn sale(batch_id: &str) -> Sale {
        Sale::new(SaleKind::PreSale, batch(batch_id), 0, 1).unwrap()
    }

    async fn put(store: &MemoryStore, b: &str, w: &str, whitelist: &Whitelist) {
        store
            .put_whitelist(&batch(b), &wl_id(w), whitelist)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn proof_verifies_against_the_whitelist_root() {
        let store = Arc::new(MemoryStore::new());
        let members = vec![addr(1), addr(2), addr(3), addr(4)];
        let whitelist = Whitelist::new(0, 40000, members.clone());
        put(&store, "b1", "w1", &whitelist).await;

        let resolver = ProofResolver::new(store);
        let result = resolver.resolve(&sale("b1"), &addr(1)).await.unwrap();

        assert_eq!(result.allocation, 40000);
        assert_eq!(result.tier_code, 0);
        assert_eq!(result.whitelist_idx, 0);

        let root = whitelist.merkle_root().unwrap();
        assert!(verify(&root, &MerkleTree::leaf(&addr(1)), &result.proof));
    }

    #[tokio::test]
    async fn highest_allocation_wins() {
        let store = Arc::new(MemoryStore::new());
        // addr(5) is on both whitelists; w2 grants more
        put(&store, "b1", "w1", &Whitelist::new(0, 100, vec![addr(5), addr(1)])).await;
        put(&store, "b1", "w2", &Whitelist::new(1, 200, vec![addr(5), addr(2)])).await;

        let resolver = ProofResolver::new(store);
        let result = resolver.resolve(&sale("b1"), &addr(5)).await.unwrap();

        assert_eq!(result.allocation, 200);
        assert_eq!(result.tier_code, 1);
        assert_eq!(result.whitelist_idx, 1);
    }

    #[tokio::test]
    async fn exact_tie_keeps_the_first_whitelist() {
        let store = Arc::new(MemoryStore::new());
        put(&store, "b1", "w1", &Whitelist::new(0, 100, vec![addr(5)])).await;
        put(&store, "b1", "w2", &Whitelist::new(1, 100, vec![addr(5)])).await;

        let resolver = ProofResolver::new(store);
        let result = resolver.resolve(&sale("b1"), &addr(5)).await.unwrap();

        assert_eq!(result.whitelist_idx, 0);
        assert_eq!(result.tier_code, 0);
    }

    #[tokio::test]
    async fn unknown_address_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        put(&store, "b1", "w1", &Whitelist::new(0, 100, vec![addr(1)])).await;

        let resolver = ProofResolver::new(store);
        let err = resolver.resolve(&sale("b1"), &addr(9)).await.unwrap_err();
        assert!(matches!(err, CoreError::AddressNotWhitelisted { .. }));
    }

    #[tokio::test]
    async fn empty_batch_is_not_found() {
        let resolver = ProofResolver::new(Arc::new(MemoryStore::new()));
        let err = resolver.resolve(&sale("b1"), &addr(1)).await.unwrap_err();
        assert!(matches!(err, CoreError::BatchNotFound { .. }));
    }

    #[tokio::test]
    async fn whitelist_idx_matches_enumeration_position() {
        let store = Arc::new(MemoryStore::new());
        // ids chosen so insertion order differs from lexicographic order
        put(&store, "b1", "w2", &Whitelist::new(2, 300, vec![addr(7)])).await;
        put(&store, "b1", "w1", &Whitelist::new(1, 100, vec![addr(1)])).await;

        let resolver = ProofResolver::new(store);
        let result = resolver.resolve(&sale("b1"), &addr(7)).await.unwrap();

        // w1 < w2, so w2 sits at index 1
        assert_eq!(result.whitelist_idx, 1);
    }
}
