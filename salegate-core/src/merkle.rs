//! Merkle engine
//!
//! Builds the canonical Merkle tree over a whitelist's address set and
//! produces inclusion proofs for single addresses.
//!
//! Construction rules:
//! - leaf = keccak-256 of the address's 20 raw bytes;
//! - leaves are sorted ascending by byte value and deduplicated, so
//!   the tree is identical for any permutation of the same address set
//!   and tolerates re-added addresses;
//! - a parent hashes its children in sorted order,
//!   `keccak256(min(a,b) || max(a,b))`, which lets a verifier fold a
//!   proof without left/right markers;
//! - a level with an odd count promotes its trailing node unchanged;
//! - a single leaf is its own root, with an empty proof;
//! - an empty address set is an error: a whitelist with no addresses
//!   is not meaningfully provable.
//!
//! Independent parties (client, contract) can therefore reconstruct
//! identical roots and proofs without knowing the original insertion
//! order.

use crate::error::{CoreError, CoreResult};
use crate::types::address::Address;
use sha3::{Digest as _, Keccak256};

/// 32-byte keccak-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// keccak-256 of arbitrary bytes.
    pub fn keccak256(data: &[u8]) -> Self {
        Self(Keccak256::digest(data).into())
    }

    /// Parse from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> CoreResult<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| CoreError::InvalidDigest)?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| CoreError::InvalidDigest)?;
        Ok(Self(arr))
    }

    /// `0x`-prefixed hex form, as published on-chain.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parent digest: children are concatenated in sorted order before
    /// hashing.
    pub fn combine_sorted(a: &Self, b: &Self) -> Self {
        let (lo, hi) = if a.0 <= b.0 { (a, b) } else { (b, a) };
        let mut data = [0u8; 64];
        data[..32].copy_from_slice(&lo.0);
        data[32..].copy_from_slice(&hi.0);
        Self::keccak256(&data)
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({}...)", &self.to_hex()[..10])
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Canonical sorted-leaf Merkle tree over a set of addresses.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    // Sorted ascending, deduplicated.
    leaves: Vec<Digest>,
}

impl MerkleTree {
    /// Build the tree. Fails with [`CoreError::EmptyAddressSet`] when
    /// the input is empty.
    pub fn from_addresses<'a, I>(addresses: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = &'a Address>,
    {
        let mut leaves: Vec<Digest> = addresses.into_iter().map(Self::leaf).collect();
        if leaves.is_empty() {
            return Err(CoreError::EmptyAddressSet);
        }
        leaves.sort_unstable();
        leaves.dedup();
        Ok(Self { leaves })
    }

    /// Leaf digest for one address.
    pub fn leaf(address: &Address) -> Digest {
        Digest::keccak256(&address.leaf_bytes())
    }

    /// Number of distinct leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Root digest. A single leaf is its own root.
    pub fn root(&self) -> Digest {
        let mut level = self.leaves.clone();
        while level.len() > 1 {
            level = next_level(&level);
        }
        level[0]
    }

    /// Sibling-hash path from the address's leaf to the root, ordered
    /// leaf-first. Fails with [`CoreError::AddressNotInTree`] when the
    /// address's hash is not a leaf.
    pub fn proof(&self, address: &Address) -> CoreResult<Vec<Digest>> {
        let target = Self::leaf(address);
        let mut index =
            self.leaves
                .binary_search(&target)
                .map_err(|_| CoreError::AddressNotInTree {
                    address: address.to_string(),
                })?;

        let mut path = Vec::new();
        let mut level = self.leaves.clone();
        while level.len() > 1 {
            let sibling = index ^ 1;
            // A promoted odd node has no sibling at this level.
            if sibling < level.len() {
                path.push(level[sibling]);
            }
            level = next_level(&level);
            index /= 2;
        }
        Ok(path)
    }
}

fn next_level(level: &[Digest]) -> Vec<Digest> {
    level
        .chunks(2)
        .map(|pair| {
            if pair.len() == 2 {
                Digest::combine_sorted(&pair[0], &pair[1])
            } else {
                pair[0]
            }
        })
        .collect()
}

/// Fold a proof from a leaf back up to a root. Pair ordering is
/// recomputed at every step, mirroring the construction.
pub fn verify(root: &Digest, leaf: &Digest, proof: &[Digest]) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |acc, sibling| Digest::combine_sorted(&acc, sibling));
    computed == *root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(suffix: u8) -> Address {
        Address::parse(&format!("0x{:040x}", suffix)).unwrap()
    }

    fn addrs(suffixes: &[u8]) -> Vec<Address> {
        suffixes.iter().copied().map(addr).collect()
    }

    #[test]
    fn root_is_permutation_invariant() {
        let a = addrs(&[1, 2, 3, 4, 5]);
        let mut b = a.clone();
        b.reverse();
        b.swap(0, 2);

        let root_a = MerkleTree::from_addresses(&a).unwrap().root();
        let root_b = MerkleTree::from_addresses(&b).unwrap().root();
        assert_eq!(root_a, root_b);
    }

    #[test]
    fn root_is_duplicate_invariant() {
        let base = addrs(&[1, 2, 3]);
        let mut doubled = base.clone();
        doubled.extend(base.clone());

        let root_base = MerkleTree::from_addresses(&base).unwrap().root();
        let root_doubled = MerkleTree::from_addresses(&doubled).unwrap().root();
        assert_eq!(root_base, root_doubled);
    }

    #[test]
    fn single_leaf_root_equals_leaf() {
        let only = addr(7);
        let tree = MerkleTree::from_addresses([&only]).unwrap();
        assert_eq!(tree.root(), MerkleTree::leaf(&only));
        assert!(tree.proof(&only).unwrap().is_empty());
    }

    #[test]
    fn empty_set_is_an_error() {
        let none: Vec<Address> = vec![];
        assert_eq!(
            MerkleTree::from_addresses(&none).unwrap_err(),
            CoreError::EmptyAddressSet
        );
    }

    #[test]
    fn every_member_proof_verifies() {
        for n in [2u8, 3, 4, 5, 8, 9] {
            let set = addrs(&(1..=n).collect::<Vec<_>>());
            let tree = MerkleTree::from_addresses(&set).unwrap();
            let root = tree.root();
            for address in &set {
                let proof = tree.proof(address).unwrap();
                assert!(
                    verify(&root, &MerkleTree::leaf(address), &proof),
                    "proof failed for member {} of a {}-leaf tree",
                    address,
                    n
                );
            }
        }
    }

    #[test]
    fn non_member_proof_fails() {
        let set = addrs(&[1, 2, 3, 4]);
        let tree = MerkleTree::from_addresses(&set).unwrap();
        let outsider = addr(99);
        assert!(matches!(
            tree.proof(&outsider).unwrap_err(),
            CoreError::AddressNotInTree { .. }
        ));
    }

    #[test]
    fn wrong_leaf_does_not_verify() {
        let set = addrs(&[1, 2, 3, 4]);
        let tree = MerkleTree::from_addresses(&set).unwrap();
        let root = tree.root();
        let proof = tree.proof(&addr(1)).unwrap();
        assert!(!verify(&root, &MerkleTree::leaf(&addr(2)), &proof));
    }

    #[test]
    fn odd_leaf_promotion_still_proves() {
        // 3 leaves: one node is promoted through the first level
        let set = addrs(&[10, 11, 12]);
        let tree = MerkleTree::from_addresses(&set).unwrap();
        let root = tree.root();
        for address in &set {
            let proof = tree.proof(address).unwrap();
            assert!(verify(&root, &MerkleTree::leaf(address), &proof));
        }
    }

    #[test]
    fn digest_hex_round_trip() {
        let digest = Digest::keccak256(b"salegate");
        let parsed = Digest::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(parsed, digest);

        // without prefix too
        let parsed = Digest::from_hex(&digest.to_hex()[2..]).unwrap();
        assert_eq!(parsed, digest);

        assert!(Digest::from_hex("0x1234").is_err());
    }
}
