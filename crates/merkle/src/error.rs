//! Error types for the allowlist-merkle crate
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! is [`MerkleError`]. Errors are plain values: building, proving and parsing
//! either succeed completely or fail without producing partial output.
//!
//! ## Example Usage
//!
//! ```
//! use allowlist_merkle::{MerkleError, MerkleTree};
//!
//! let tree = MerkleTree::from_identifiers(&["0xAAAA", "0xBBBB"]).unwrap();
//!
//! match tree.proof_for("0xdddd") {
//!     Ok(proof) => println!("eligible, proof has {} siblings", proof.len()),
//!     Err(MerkleError::LeafNotFound { .. }) => println!("not eligible"),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```

use alloy_primitives::B256;
use thiserror::Error;

/// Result type for operations in the merkle crate
pub type Result<T> = std::result::Result<T, MerkleError>;

/// Main error type for the merkle crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// A tree was requested for an empty identifier set
    #[error("cannot build a merkle tree from an empty identifier set")]
    EmptyInput,

    /// The queried leaf is not part of the tree
    #[error("leaf {leaf} not found in tree")]
    LeafNotFound {
        /// Digest of the normalized identifier that was looked up.
        leaf: B256,
    },

    /// The same leaf occurs twice and the tree rejects duplicates
    #[error("duplicate leaf {leaf} at positions {first} and {second}")]
    DuplicateLeaf {
        /// The repeated leaf digest.
        leaf: B256,
        /// Index of the first occurrence.
        first: usize,
        /// Index of the repeated occurrence.
        second: usize,
    },

    /// Externally supplied digest text is not `0x` followed by 64 hex characters
    #[error("malformed digest {input:?}: {reason}")]
    MalformedDigest {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A serialized proof is not a bracketed, comma separated digest list
    #[error("malformed proof: {0}")]
    MalformedProof(&'static str),
}

impl MerkleError {
    pub(crate) fn malformed_digest<S: Into<String>>(input: S, reason: &'static str) -> Self {
        Self::MalformedDigest {
            input: input.into(),
            reason,
        }
    }

    /// Returns true if the error means the identifier is simply not in the set.
    ///
    /// Callers typically map this to a "not eligible" answer rather than a failure.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::LeafNotFound { .. })
    }
}
