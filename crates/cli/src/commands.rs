//! Subcommand implementations.
//!
//! Each command returns its JSON output and whether the answer was positive;
//! printing and exit codes are left to `main`.

use std::path::Path;

use allowlist_merkle::{B256, MerkleError, Proof, TreeConfig, parse_digest, verify_proof};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::input;

#[derive(Debug, Serialize)]
struct RootOutput {
    root: B256,
}

#[derive(Debug, Serialize)]
struct ProofOutput {
    proof: Proof,
}

#[derive(Debug, Serialize)]
struct LegacyProofOutput {
    proof: String,
}

/// `allowlist root`
pub(crate) fn root(file: &Path, config: &TreeConfig) -> Result<Value> {
    let tree = input::load(file)?
        .build(config)
        .context("failed to build merkle tree")?;

    Ok(serde_json::to_value(RootOutput { root: tree.root() })?)
}

/// `allowlist proof`; an address outside the list is a negative answer, not an error.
pub(crate) fn proof(
    file: &Path,
    address: &str,
    legacy: bool,
    config: &TreeConfig,
) -> Result<(Value, bool)> {
    let tree = input::load(file)?
        .build(config)
        .context("failed to build merkle tree")?;

    let proof = match tree.proof_for(address) {
        Ok(proof) => proof,
        Err(MerkleError::LeafNotFound { .. }) => {
            debug!(address, "address not in list");
            let error = format!("{address} is not in the address list");
            return Ok((json!({ "error": error }), false));
        }
        Err(e) => return Err(e.into()),
    };
    debug!(address, siblings = proof.len(), "generated proof");

    let value = if legacy {
        serde_json::to_value(LegacyProofOutput {
            proof: proof.to_string(),
        })?
    } else {
        serde_json::to_value(ProofOutput { proof })?
    };

    Ok((value, true))
}

/// `allowlist verify`; the returned flag is the verification result.
pub(crate) fn verify(address: &str, root: &str, proof: &str) -> Result<(Value, bool)> {
    let root = parse_digest(root).context("invalid root")?;
    let proof = parse_proof(proof).context("invalid proof")?;

    let valid = verify_proof(address, &proof, root);
    debug!(address, %root, siblings = proof.len(), valid, "verified proof");

    Ok((json!({ "valid": valid }), valid))
}

/// Accepts either a JSON array of hex strings or the bracketed legacy form.
fn parse_proof(raw: &str) -> Result<Proof> {
    if let Ok(proof) = serde_json::from_str(raw) {
        return Ok(proof);
    }
    Ok(raw.parse()?)
}
