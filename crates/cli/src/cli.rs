//! Command-line arguments.

use std::path::PathBuf;

use allowlist_merkle::{DEFAULT_PARALLEL_THRESHOLD, DuplicatePolicy, TreeConfig};
use clap::{Parser, Subcommand};

/// Merkle roots and inclusion proofs for address allowlists
#[derive(Debug, Parser)]
#[command(
    name = "allowlist",
    version,
    about = "Merkle roots and inclusion proofs for address allowlists",
    long_about = "Builds a sorted-pair keccak256 Merkle tree over a JSON list of addresses, \
                  prints its root and per-address proofs, and verifies proofs against a root.",
    after_help = "Exit status: 0 on a positive answer, 1 when the address is not listed or the \
                  proof is invalid, 2 on errors."
)]
pub(crate) struct Cli {
    /// Log build details to stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,

    /// How repeated addresses are handled: allow or reject
    #[arg(long, global = true, env = "ALLOWLIST_DUPLICATES", default_value_t = DuplicatePolicy::Allow)]
    pub(crate) duplicates: DuplicatePolicy,

    /// Address count at which leaf hashing and layer combining run in parallel
    #[arg(long, global = true, env = "ALLOWLIST_PARALLEL_THRESHOLD", default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    pub(crate) parallel_threshold: usize,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

impl Cli {
    /// Tree parameters selected by the global flags
    pub(crate) const fn tree_config(&self) -> TreeConfig {
        TreeConfig::new()
            .with_duplicates(self.duplicates)
            .with_parallel_threshold(self.parallel_threshold)
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Print the Merkle root of an address list
    Root {
        /// JSON file holding an array of addresses or {"addresses": [...]}; "-" reads stdin
        file: PathBuf,
    },

    /// Print the inclusion proof for an address
    Proof {
        /// JSON file holding an array of addresses or {"addresses": [...]}; "-" reads stdin
        file: PathBuf,

        /// Address to prove (case-insensitive)
        address: String,

        /// Print the proof as a single "[0x..,0x..]" string
        #[arg(long)]
        legacy: bool,
    },

    /// Check a proof for an address against a root
    Verify {
        /// Address the proof is for (case-insensitive)
        address: String,

        /// Root as 0x-prefixed hex
        #[arg(long)]
        root: String,

        /// Proof as a JSON array of hex strings or "[0x..,0x..]"
        #[arg(long, default_value = "[]")]
        proof: String,
    },
}
