//! Address set snapshots and their content keys
//!
//! An [`AddressSet`] is the consistent input a tree is built from. It drops
//! blank entries (rows a user added but never filled in) and derives a
//! [`SetKey`] that identifies the exact leaf sequence, which is what the
//! [`TreeCache`](crate::TreeCache) is keyed by.
//!
//! ## Example Usage
//!
//! ```
//! use allowlist_merkle::AddressSet;
//!
//! let set = AddressSet::new(["0xAAAA", "", "  ", "0xBBBB"]);
//! assert_eq!(set.len(), 2);
//!
//! // Case does not change the key, order does.
//! assert_eq!(set.key(), AddressSet::new(["0xaaaa", "0xbbbb"]).key());
//! assert_ne!(set.key(), AddressSet::new(["0xbbbb", "0xaaaa"]).key());
//! ```

use std::fmt;
use std::sync::OnceLock;

use alloy_primitives::{B256, Keccak256};

use crate::config::TreeConfig;
use crate::error::Result;
use crate::hasher::hash_leaves;
use crate::tree::MerkleTree;

/// Content hash of a normalized, ordered identifier sequence.
///
/// Equal keys mean equal leaf sequences and therefore equal trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SetKey(B256);

impl SetKey {
    /// Key of a leaf sequence: `keccak256(leaf_0 || leaf_1 || ...)`
    pub fn from_leaves(leaves: &[B256]) -> Self {
        let mut hasher = Keccak256::new();
        for leaf in leaves {
            hasher.update(leaf.as_slice());
        }
        Self(hasher.finalize())
    }

    /// The underlying digest
    #[inline]
    pub const fn digest(&self) -> B256 {
        self.0
    }
}

impl fmt::Display for SetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<SetKey> for B256 {
    fn from(key: SetKey) -> Self {
        key.0
    }
}

/// An ordered snapshot of identifiers to commit to.
#[derive(Clone, Debug, Default)]
pub struct AddressSet {
    identifiers: Vec<String>,
    leaves: OnceLock<Vec<B256>>,
    key: OnceLock<SetKey>,
}

impl AddressSet {
    /// Snapshot identifiers, skipping blank (empty or whitespace-only) entries.
    ///
    /// Non-blank identifiers are kept exactly as given, surrounding whitespace included.
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::unfiltered(
            identifiers
                .into_iter()
                .map(Into::into)
                .filter(|id: &String| !id.trim().is_empty()),
        )
    }

    /// Snapshot identifiers exactly as given, blank entries included.
    pub fn unfiltered<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
            leaves: OnceLock::new(),
            key: OnceLock::new(),
        }
    }

    /// The identifiers in snapshot order
    #[inline]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Number of identifiers
    #[inline]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// True if there is nothing to build a tree from
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Leaf digests in snapshot order, computed on first use with the default
    /// [`TreeConfig`]
    pub fn leaves(&self) -> &[B256] {
        self.leaves_with(&TreeConfig::default())
    }

    /// Leaf digests in snapshot order, hashed in parallel once the set reaches
    /// `config.parallel_threshold()`.
    ///
    /// Digests are computed once per snapshot; later calls return them as they
    /// are whatever `config` says.
    pub fn leaves_with(&self, config: &TreeConfig) -> &[B256] {
        self.leaves
            .get_or_init(|| hash_leaves(&self.identifiers, config.parallel_threshold()))
    }

    /// Content key of this snapshot, computed on first use
    pub fn key(&self) -> SetKey {
        *self.key.get_or_init(|| SetKey::from_leaves(self.leaves()))
    }

    /// Build the tree committing to this snapshot
    pub fn build(&self, config: &TreeConfig) -> Result<MerkleTree> {
        MerkleTree::from_leaves_with(self.leaves_with(config).to_vec(), config)
    }
}

impl<S: Into<String>> FromIterator<S> for AddressSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MerkleError, hasher::leaf_hash};

    #[test]
    fn test_blank_entries_are_skipped() {
        let set = AddressSet::new(["", "0xAAAA", "\t", "0xBBBB", ""]);
        assert_eq!(set.identifiers(), ["0xAAAA", "0xBBBB"]);
    }

    #[test]
    fn test_unfiltered_keeps_blank_entries() {
        let set = AddressSet::unfiltered(["", "0xAAAA"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.leaves()[0], leaf_hash(""));
    }

    #[test]
    fn test_leaves_are_normalized() {
        let set: AddressSet = ["0xAAAA", "0xbbbb"].into_iter().collect();
        assert_eq!(set.leaves(), [leaf_hash("0xaaaa"), leaf_hash("0xbbbb")]);
    }

    #[test]
    fn test_key_tracks_content() {
        let a = AddressSet::new(["0xAAAA", "0xBBBB"]);
        assert_eq!(a.key(), AddressSet::new(["0xaaaa", "0xbbbb"]).key());
        assert_ne!(a.key(), AddressSet::new(["0xaaaa"]).key());
        assert_ne!(a.key(), AddressSet::new(["0xaaaa", "0xbbbb", "0xcccc"]).key());
        assert_eq!(a.key(), a.clone().key());
    }

    #[test]
    fn test_build_matches_direct_build() {
        let set = AddressSet::new(["0xAAAA", "", "0xBBBB", "0xCCCC"]);
        let tree = set.build(&TreeConfig::default()).unwrap();
        let direct = MerkleTree::from_identifiers(&["0xaaaa", "0xbbbb", "0xcccc"]).unwrap();
        assert_eq!(tree, direct);
    }

    #[test]
    fn test_build_with_any_parallel_threshold() {
        let ids: Vec<String> = (0..64).map(|i| format!("0x{i:040X}")).collect();
        let expected = MerkleTree::from_identifiers(&ids).unwrap();

        for threshold in [0, 1, 64, usize::MAX] {
            let config = TreeConfig::new().with_parallel_threshold(threshold);
            let set = AddressSet::new(ids.iter().cloned());
            assert_eq!(set.leaves_with(&config), expected.leaves());
            assert_eq!(set.build(&config).unwrap(), expected, "threshold {threshold}");
        }
    }

    #[test]
    fn test_leaves_computed_once() {
        let set = AddressSet::new(["0xAAAA", "0xBBBB"]);
        let first = set.leaves_with(&TreeConfig::new().with_parallel_threshold(0));
        let second = set.leaves();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_all_blank_set_cannot_build() {
        let set = AddressSet::new(["", " "]);
        assert!(set.is_empty());
        assert_eq!(
            set.build(&TreeConfig::default()).unwrap_err(),
            MerkleError::EmptyInput
        );
    }
}
