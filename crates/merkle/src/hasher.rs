//! Keccak256 hashing for leaves and internal nodes
//!
//! The same function is used for leaves, internal nodes and verification, so
//! roots and proofs computed here agree bit-for-bit with any other verifier
//! that hashes sorted pairs with keccak256 (for example OpenZeppelin's
//! `MerkleProof` library on-chain).

use std::borrow::Cow;

use alloy_primitives::{B256, Keccak256, keccak256};

/// Hash size in bytes (keccak256)
pub const HASH_SIZE: usize = 32;

/// Hash an arbitrary byte sequence.
#[inline]
pub fn hash(data: impl AsRef<[u8]>) -> B256 {
    keccak256(data)
}

/// Canonical form of an identifier before it is hashed into a leaf.
///
/// Identifiers are lowercased, so `0xABCD` and `0xabcd` produce the same leaf.
/// Already-lowercase ASCII input is borrowed rather than copied.
#[inline]
pub fn normalize(identifier: &str) -> Cow<'_, str> {
    if identifier.is_ascii() && !identifier.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Borrowed(identifier)
    } else {
        Cow::Owned(identifier.to_lowercase())
    }
}

/// Leaf digest of an identifier: `keccak256(lowercase(identifier))`.
#[inline]
pub fn leaf_hash(identifier: &str) -> B256 {
    hash(normalize(identifier).as_bytes())
}

/// Hash two nodes in ascending byte order: `keccak256(min(a, b) || max(a, b))`.
#[inline]
pub fn hash_pair(a: &B256, b: &B256) -> B256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let mut hasher = Keccak256::new();
    hasher.update(lo.as_slice());
    hasher.update(hi.as_slice());
    hasher.finalize()
}

/// Hash a list of identifiers into leaves, preserving their order.
///
/// Lists at least `parallel_threshold` long are hashed on the rayon pool when
/// the `parallel` feature is enabled. Both paths produce the same output.
pub(crate) fn hash_leaves<S>(identifiers: &[S], parallel_threshold: usize) -> Vec<B256>
where
    S: AsRef<str> + Sync,
{
    #[cfg(feature = "parallel")]
    if identifiers.len() >= parallel_threshold {
        use rayon::prelude::*;
        return identifiers
            .par_iter()
            .map(|id| leaf_hash(id.as_ref()))
            .collect();
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel_threshold;

    identifiers.iter().map(|id| leaf_hash(id.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    #[test]
    fn test_hash_known_vectors() {
        assert_eq!(
            hash(b""),
            b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
        assert_eq!(
            hash(b"abc"),
            b256!("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45")
        );
    }

    #[test]
    fn test_normalize_borrows_lowercase_input() {
        assert!(matches!(normalize("0xabcdef"), Cow::Borrowed(_)));
        assert_eq!(normalize("0xABCdef"), "0xabcdef");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_leaf_hash_is_case_insensitive() {
        assert_eq!(leaf_hash("0xAAAA"), leaf_hash("0xaaaa"));
        assert_eq!(leaf_hash("0xAaAa"), leaf_hash("0xaaaa"));
        assert_ne!(leaf_hash("0xaaaa"), leaf_hash("0xbbbb"));
    }

    #[test]
    fn test_empty_identifier_has_well_defined_leaf() {
        assert_eq!(leaf_hash(""), hash(b""));
    }

    #[test]
    fn test_hash_pair_is_commutative() {
        let a = leaf_hash("0xaaaa");
        let b = leaf_hash("0xbbbb");
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));

        let lo = a.min(b);
        let hi = a.max(b);
        assert_eq!(hash_pair(&a, &b), hash([lo.as_slice(), hi.as_slice()].concat()));
    }

    #[test]
    fn test_hash_leaves_parallel_matches_sequential() {
        let ids: Vec<String> = (0..300).map(|i| format!("0x{i:040X}")).collect();
        assert_eq!(hash_leaves(&ids, 0), hash_leaves(&ids, usize::MAX));
    }
}
