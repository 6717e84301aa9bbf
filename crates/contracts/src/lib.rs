//! Allowlist mint contract bindings.
//!
//! This crate provides type-safe Solidity bindings, generated with Alloy's `sol!`
//! macro, for a contract that gates minting on a Merkle allowlist. The contract
//! stores the root published by [`allowlist_merkle`] and checks callers' proofs
//! with sorted-pair keccak256 hashing, the same rule the tree is built with.
//!
//! # Contract Bindings
//!
//! ```
//! use alloy_sol_types::SolCall;
//! use allowlist_contracts::{IAllowlistMint, mint_call};
//! use allowlist_merkle::MerkleTree;
//!
//! let tree = MerkleTree::from_identifiers(&["0xAAAA", "0xBBBB", "0xCCCC"]).unwrap();
//! let proof = tree.proof_for("0xaaaa").unwrap();
//!
//! let calldata = mint_call(&proof);
//! assert_eq!(calldata[..4], IAllowlistMint::allowlistMintCall::SELECTOR);
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use alloy_primitives::{Address, B256};
use alloy_sol_types::{SolCall, sol};
use allowlist_merkle::{Proof, leaf_hash};

// Allowlist Interface

sol! {
    /// Merkle allowlist mint interface.
    ///
    /// The owner publishes the allowlist root; allowlisted accounts mint by
    /// presenting the proof for their address.
    #[derive(Debug, PartialEq, Eq)]
    interface IAllowlistMint {
        function merkleRoot() external view returns (bytes32);
        function setMerkleRoot(bytes32 root) external;
        function isAllowlisted(address account, bytes32[] proof) external view returns (bool);
        function allowlistMint(bytes32[] proof) external payable;

        event MerkleRootUpdated(bytes32 indexed previousRoot, bytes32 indexed newRoot);
    }
}

/// Leaf digest the allowlist uses for an account.
///
/// Accounts are committed as their lowercase `0x`-prefixed hex string, so the
/// checksummed form produced by `Address`'s `Display` hashes to the same leaf.
#[inline]
pub fn address_leaf(account: Address) -> B256 {
    leaf_hash(&account.to_string())
}

/// ABI-encoded calldata publishing a new root.
pub fn set_root_call(root: B256) -> Vec<u8> {
    IAllowlistMint::setMerkleRootCall { root }.abi_encode()
}

/// ABI-encoded calldata minting with a proof.
pub fn mint_call(proof: &Proof) -> Vec<u8> {
    IAllowlistMint::allowlistMintCall {
        proof: proof.siblings().to_vec(),
    }
    .abi_encode()
}

/// ABI-encoded calldata asking whether `account` is allowlisted under `proof`.
pub fn is_allowlisted_call(account: Address, proof: &Proof) -> Vec<u8> {
    IAllowlistMint::isAllowlistedCall {
        account,
        proof: proof.siblings().to_vec(),
    }
    .abi_encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex};
    use alloy_sol_types::SolEvent;
    use allowlist_merkle::{MerkleTree, verify};

    const ACCOUNT: Address = address!("5B38Da6a701c568545dCfcB03FcB875f56beddC4");

    #[test]
    fn test_selectors() {
        assert_eq!(IAllowlistMint::allowlistMintCall::SELECTOR, hex!("537924ef"));
        assert_eq!(IAllowlistMint::setMerkleRootCall::SELECTOR, hex!("7cb64759"));
        assert_eq!(IAllowlistMint::merkleRootCall::SELECTOR, hex!("2eb4a7ab"));
        assert_eq!(IAllowlistMint::isAllowlistedCall::SELECTOR, hex!("33006786"));
        assert_eq!(
            IAllowlistMint::MerkleRootUpdated::SIGNATURE_HASH,
            B256::from(hex!(
                "fd69edeceaf1d6832d935be1fba54ca93bf17e71520c6c9ffc08d6e9529f8757"
            ))
        );
    }

    #[test]
    fn test_address_leaf_ignores_checksum_case() {
        assert_eq!(
            address_leaf(ACCOUNT),
            leaf_hash("0x5b38da6a701c568545dcfcb03fcb875f56beddc4")
        );
    }

    #[test]
    fn test_set_root_call_layout() {
        let root = B256::repeat_byte(0x11);
        let calldata = set_root_call(root);
        assert_eq!(calldata.len(), 4 + 32);
        assert_eq!(calldata[4..], root[..]);
    }

    #[test]
    fn test_mint_call_decodes_to_proof() {
        let tree = MerkleTree::from_identifiers(&[
            "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4",
            "0xAb8483F64d9C6d1EcF9b849Ae677dD3315835cb2",
            "0x4B20993Bc481177ec7E8f571ceCaE8A9e22C02db",
        ])
        .unwrap();
        let proof = tree.prove(&address_leaf(ACCOUNT)).unwrap();

        let decoded = IAllowlistMint::allowlistMintCall::abi_decode(&mint_call(&proof)).unwrap();
        assert_eq!(decoded.proof, proof.siblings());
        assert!(verify(address_leaf(ACCOUNT), &decoded.proof, tree.root()));
    }

    #[test]
    fn test_is_allowlisted_call_round_trip() {
        let proof = Proof::new(vec![B256::repeat_byte(1), B256::repeat_byte(2)]);
        let decoded =
            IAllowlistMint::isAllowlistedCall::abi_decode(&is_allowlisted_call(ACCOUNT, &proof))
                .unwrap();
        assert_eq!(decoded.account, ACCOUNT);
        assert_eq!(decoded.proof, proof.into_inner());
    }
}
