//! Sorted-pair Merkle tree construction and proof generation.

use std::collections::HashMap;

use alloy_primitives::B256;
use tracing::{debug, trace};

use crate::config::{DuplicatePolicy, TreeConfig};
use crate::error::{MerkleError, Result};
use crate::hasher::{hash_leaves, hash_pair, leaf_hash};
use crate::proof::Proof;

/// An immutable binary Merkle tree over keccak256 leaves.
///
/// Each pair of nodes is hashed in ascending byte order, and an unpaired
/// trailing node is promoted to the next layer unchanged. Every layer is
/// retained, so proofs for any leaf are read straight out of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    /// Layer 0 holds the leaves, the last layer holds only the root.
    layers: Vec<Vec<B256>>,
}

impl MerkleTree {
    /// Build a tree from identifiers with the default [`TreeConfig`].
    ///
    /// Identifiers are lowercased and hashed in the order given.
    pub fn from_identifiers<S>(identifiers: &[S]) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        Self::from_identifiers_with(identifiers, &TreeConfig::default())
    }

    /// Build a tree from identifiers with an explicit configuration.
    pub fn from_identifiers_with<S>(identifiers: &[S], config: &TreeConfig) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        if identifiers.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let leaves = hash_leaves(identifiers, config.parallel_threshold());
        Self::from_leaves_with(leaves, config)
    }

    /// Build a tree from precomputed leaf digests with the default [`TreeConfig`].
    pub fn from_leaves(leaves: Vec<B256>) -> Result<Self> {
        Self::from_leaves_with(leaves, &TreeConfig::default())
    }

    /// Build a tree from precomputed leaf digests, kept in the order given.
    pub fn from_leaves_with(leaves: Vec<B256>, config: &TreeConfig) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        if config.duplicates() == DuplicatePolicy::Reject {
            reject_duplicates(&leaves)?;
        }

        let leaf_count = leaves.len();
        let mut layers = Vec::with_capacity(depth_for(leaf_count) + 1);
        let mut current = leaves;

        while current.len() > 1 {
            let next = next_layer(&current, config.parallel_threshold());
            layers.push(current);
            current = next;
        }
        layers.push(current);

        let tree = Self { layers };
        debug!(
            leaves = leaf_count,
            depth = tree.depth(),
            root = %tree.root(),
            "built merkle tree"
        );

        Ok(tree)
    }

    /// The root digest: the sole element of the top layer.
    #[inline]
    pub fn root(&self) -> B256 {
        // Construction guarantees at least one layer ending in exactly one node.
        self.layers[self.layers.len() - 1][0]
    }

    /// The leaf digests in input order.
    #[inline]
    pub fn leaves(&self) -> &[B256] {
        &self.layers[0]
    }

    /// All layers, leaves first and root last.
    #[inline]
    pub fn layers(&self) -> &[Vec<B256>] {
        &self.layers
    }

    /// Number of leaves.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of layers above the leaves; zero for a single-leaf tree.
    #[inline]
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Index of the first occurrence of `leaf` in layer 0.
    #[inline]
    pub fn leaf_index(&self, leaf: &B256) -> Option<usize> {
        self.leaves().iter().position(|candidate| candidate == leaf)
    }

    /// Whether the identifier's leaf is part of the tree.
    #[inline]
    pub fn contains(&self, identifier: &str) -> bool {
        self.leaf_index(&leaf_hash(identifier)).is_some()
    }

    /// Generate the proof for a leaf digest.
    ///
    /// If the leaf occurs more than once the first occurrence is proven.
    pub fn prove(&self, leaf: &B256) -> Result<Proof> {
        let index = self
            .leaf_index(leaf)
            .ok_or(MerkleError::LeafNotFound { leaf: *leaf })?;

        trace!(%leaf, index, "generating merkle proof");
        Ok(self.proof_at(index))
    }

    /// Generate the proof for the leaf at a given position in layer 0.
    ///
    /// Returns `None` when the index is out of range. Unlike [`Self::prove`],
    /// this reaches every occurrence of a duplicated leaf.
    pub fn prove_index(&self, index: usize) -> Option<Proof> {
        (index < self.leaf_count()).then(|| self.proof_at(index))
    }

    /// Normalize and hash an identifier, then generate its proof.
    ///
    /// Fails with [`MerkleError::LeafNotFound`] when the identifier is absent.
    pub fn proof_for(&self, identifier: &str) -> Result<Proof> {
        self.prove(&leaf_hash(identifier))
    }

    fn proof_at(&self, mut index: usize) -> Proof {
        let mut siblings = Vec::with_capacity(self.depth());

        for layer in &self.layers[..self.depth()] {
            // Promoted nodes have no partner and contribute nothing at this level.
            if let Some(sibling) = layer.get(index ^ 1) {
                siblings.push(*sibling);
            }
            index /= 2;
        }

        Proof::new(siblings)
    }
}

/// Build a tree from identifiers with the default configuration.
///
/// ```
/// use allowlist_merkle::{MerkleError, build_tree};
///
/// let tree = build_tree(&["0xAAAA", "0xBBBB", "0xCCCC"]).unwrap();
/// assert_eq!(tree.leaf_count(), 3);
///
/// let empty: [&str; 0] = [];
/// assert_eq!(build_tree(&empty).unwrap_err(), MerkleError::EmptyInput);
/// ```
pub fn build_tree<S>(identifiers: &[S]) -> Result<MerkleTree>
where
    S: AsRef<str> + Sync,
{
    MerkleTree::from_identifiers(identifiers)
}

/// Number of layers above `leaf_count` leaves when odd nodes are promoted.
const fn depth_for(leaf_count: usize) -> usize {
    let mut width = leaf_count;
    let mut depth = 0;
    while width > 1 {
        width = width.div_ceil(2);
        depth += 1;
    }
    depth
}

#[inline]
fn combine(chunk: &[B256]) -> B256 {
    match chunk {
        [left, right] => hash_pair(left, right),
        [single] => *single,
        _ => unreachable!("chunks of a layer hold one or two nodes"),
    }
}

fn next_layer(layer: &[B256], parallel_threshold: usize) -> Vec<B256> {
    #[cfg(feature = "parallel")]
    if layer.len() >= parallel_threshold {
        use rayon::prelude::*;
        return layer.par_chunks(2).map(combine).collect();
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel_threshold;

    layer.chunks(2).map(combine).collect()
}

fn reject_duplicates(leaves: &[B256]) -> Result<()> {
    let mut seen = HashMap::with_capacity(leaves.len());

    for (index, leaf) in leaves.iter().enumerate() {
        if let Some(&first) = seen.get(leaf) {
            return Err(MerkleError::DuplicateLeaf {
                leaf: *leaf,
                first,
                second: index,
            });
        }
        seen.insert(*leaf, index);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_for() {
        assert_eq!(depth_for(1), 0);
        assert_eq!(depth_for(2), 1);
        assert_eq!(depth_for(3), 2);
        assert_eq!(depth_for(4), 2);
        assert_eq!(depth_for(5), 3);
        assert_eq!(depth_for(8), 3);
        assert_eq!(depth_for(9), 4);
    }

    #[test]
    fn test_layer_widths_halve_rounding_up() {
        let ids: Vec<String> = (0..11).map(|i| format!("0x{i:04x}")).collect();
        let tree = MerkleTree::from_identifiers(&ids).unwrap();
        let widths: Vec<usize> = tree.layers().iter().map(Vec::len).collect();
        assert_eq!(widths, vec![11, 6, 3, 2, 1]);
        assert_eq!(tree.depth(), depth_for(11));
    }

    #[test]
    fn test_odd_node_is_promoted_not_duplicated() {
        let tree = MerkleTree::from_identifiers(&["0xaaaa", "0xbbbb", "0xcccc"]).unwrap();
        let leaves = tree.leaves();
        assert_eq!(tree.layers()[1][1], leaves[2]);
        assert_eq!(tree.layers()[1][0], hash_pair(&leaves[0], &leaves[1]));
    }

    #[test]
    fn test_parallel_layers_match_sequential() {
        let ids: Vec<String> = (0..257).map(|i| format!("0x{i:040x}")).collect();
        let sequential = TreeConfig::new().with_parallel_threshold(usize::MAX);
        let parallel = TreeConfig::new().with_parallel_threshold(1);
        assert_eq!(
            MerkleTree::from_identifiers_with(&ids, &sequential).unwrap(),
            MerkleTree::from_identifiers_with(&ids, &parallel).unwrap()
        );
    }

    #[test]
    fn test_reject_duplicates_reports_positions() {
        let config = TreeConfig::new().with_duplicates(DuplicatePolicy::Reject);
        let err = MerkleTree::from_identifiers_with(&["0xaaaa", "0xbbbb", "0xAAAA"], &config)
            .unwrap_err();
        assert_eq!(
            err,
            MerkleError::DuplicateLeaf {
                leaf: leaf_hash("0xaaaa"),
                first: 0,
                second: 2,
            }
        );
    }

    #[test]
    fn test_prove_index_out_of_range() {
        let tree = MerkleTree::from_identifiers(&["0xaaaa"]).unwrap();
        assert!(tree.prove_index(1).is_none());
        assert_eq!(tree.prove_index(0), Some(Proof::default()));
    }
}
