//! Sorted-pair keccak256 Merkle trees for address allowlists
//!
//! This crate commits to a list of identifiers (typically Ethereum addresses)
//! with a single root digest, and produces inclusion proofs that anyone can
//! check against that root without seeing the rest of the list. The hashing
//! rules match OpenZeppelin's `MerkleProof` library, so proofs produced here
//! verify on-chain.
//!
//! ## Key Components
//!
//! - **Leaves**: `keccak256(lowercase(identifier))` ([`leaf_hash`])
//! - **Tree**: pairs hashed in ascending byte order, odd nodes promoted ([`MerkleTree`])
//! - **Proofs**: sibling digests from leaf to root ([`Proof`], [`verify_proof`])
//! - **Snapshots and caching**: content-keyed reuse of built trees ([`AddressSet`], [`TreeCache`])
//! - **Wire format**: `0x`-prefixed hex digests ([`parse_digest`], [`format_digest`])
//!
//! ## Usage Examples
//!
//! ```
//! use allowlist_merkle::{MerkleTree, verify_proof};
//!
//! let tree = MerkleTree::from_identifiers(&["0xAAAA", "0xBBBB", "0xCCCC"]).unwrap();
//! let root = tree.root();
//!
//! // Lookups are case-insensitive.
//! let proof = tree.proof_for("0xaaaa").unwrap();
//! assert_eq!(proof.len(), 2);
//! assert!(verify_proof("0xAAAA", &proof, root));
//!
//! // A proof only works for the leaf it was made for.
//! assert!(!verify_proof("0xdddd", &proof, root));
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): hash large identifier lists on the rayon pool
//! - `serde`: serde support for proofs, keys and configuration

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod cache;
mod config;
pub mod error;
mod hasher;
mod proof;
mod set;
mod tree;
mod wire;

// Re-export the digest type that is part of our public API
pub use alloy_primitives::B256;

/// A 32-byte keccak256 digest: leaves, internal nodes and roots.
pub type Digest = B256;

pub use cache::TreeCache;
pub use config::{
    CacheConfig, DEFAULT_CACHE_CAPACITY, DEFAULT_PARALLEL_THRESHOLD, DuplicatePolicy, TreeConfig,
};
pub use error::{MerkleError, Result};
pub use hasher::{HASH_SIZE, hash, hash_pair, leaf_hash, normalize};
pub use proof::{Proof, compute_root, verify, verify_proof};
pub use set::{AddressSet, SetKey};
pub use tree::{MerkleTree, build_tree};
pub use wire::{DIGEST_HEX_LEN, format_digest, parse_digest};
