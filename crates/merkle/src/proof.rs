//! Inclusion proofs and their verification.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::B256;

use crate::error::{MerkleError, Result};
use crate::hasher::{hash_pair, leaf_hash};
use crate::wire::{format_digest, parse_digest};

/// Sibling digests on the path from a leaf to the root, bottom level first.
///
/// Levels where the node was promoted without a partner contribute no
/// sibling, so a proof may be shorter than the tree depth.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Proof(Vec<B256>);

impl Proof {
    /// Create a proof from sibling digests, bottom level first
    #[inline]
    pub const fn new(siblings: Vec<B256>) -> Self {
        Self(siblings)
    }

    /// The sibling digests in the order they are applied
    #[inline]
    pub fn siblings(&self) -> &[B256] {
        &self.0
    }

    /// Number of siblings in the proof
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the proof of a single-leaf tree
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the siblings
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, B256> {
        self.0.iter()
    }

    /// Consume the proof, returning the sibling digests
    #[inline]
    pub fn into_inner(self) -> Vec<B256> {
        self.0
    }

    /// Fold the siblings onto `leaf` with the sorted-pair rule
    #[inline]
    pub fn compute_root(&self, leaf: B256) -> B256 {
        compute_root(leaf, &self.0)
    }

    /// Verify this proof for a leaf digest against a root
    #[inline]
    pub fn verify(&self, leaf: B256, root: B256) -> bool {
        self.compute_root(leaf) == root
    }

    /// Verify this proof for an identifier, normalizing and hashing it first
    #[inline]
    pub fn verify_identifier(&self, identifier: &str, root: B256) -> bool {
        self.verify(leaf_hash(identifier), root)
    }
}

/// Recompute the root reached from `leaf` through `siblings`.
pub fn compute_root(leaf: B256, siblings: &[B256]) -> B256 {
    siblings
        .iter()
        .fold(leaf, |current, sibling| hash_pair(&current, sibling))
}

/// Check that `siblings` lead from `leaf` to `root`.
///
/// Total over its inputs: a wrong leaf, corrupted sibling or wrong root all
/// yield `false`.
#[inline]
pub fn verify(leaf: B256, siblings: &[B256], root: B256) -> bool {
    compute_root(leaf, siblings) == root
}

/// Check that `proof` shows `identifier` to be part of the set committed to by `root`.
///
/// ```
/// use allowlist_merkle::{MerkleTree, verify_proof};
///
/// let tree = MerkleTree::from_identifiers(&["0xAAAA", "0xBBBB", "0xCCCC"]).unwrap();
/// let proof = tree.proof_for("0xaaaa").unwrap();
///
/// assert!(verify_proof("0xAAAA", &proof, tree.root()));
/// assert!(!verify_proof("0xdddd", &proof, tree.root()));
/// ```
#[inline]
pub fn verify_proof(identifier: &str, proof: &Proof, root: B256) -> bool {
    proof.verify_identifier(identifier, root)
}

impl From<Vec<B256>> for Proof {
    fn from(siblings: Vec<B256>) -> Self {
        Self(siblings)
    }
}

impl From<Proof> for Vec<B256> {
    fn from(proof: Proof) -> Self {
        proof.0
    }
}

impl FromIterator<B256> for Proof {
    fn from_iter<I: IntoIterator<Item = B256>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[B256]> for Proof {
    fn as_ref(&self) -> &[B256] {
        &self.0
    }
}

impl IntoIterator for Proof {
    type Item = B256;
    type IntoIter = std::vec::IntoIter<B256>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = &'a B256;
    type IntoIter = std::slice::Iter<'a, B256>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Bracketed form returned by the legacy `getProof` endpoint: `[0x..,0x..]`.
impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, sibling) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&format_digest(sibling))?;
        }
        f.write_str("]")
    }
}

/// Parses the bracketed form; whitespace around elements is ignored.
impl FromStr for Proof {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or(MerkleError::MalformedProof("expected a bracketed list"))?
            .trim();

        if inner.is_empty() {
            return Ok(Self::default());
        }

        inner
            .split(',')
            .map(|element| parse_digest(element.trim()))
            .collect()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Proof {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.collect_seq(self.0.iter().map(format_digest))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Proof {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let elements = <Vec<String> as serde::Deserialize>::deserialize(d)?;
        elements
            .iter()
            .map(|element| parse_digest(element))
            .collect::<Result<Self>>()
            .map_err(serde::de::Error::custom)
    }
}
