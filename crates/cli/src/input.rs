//! Loading address lists.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use allowlist_merkle::AddressSet;
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Accepted shapes of an address file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AddressFile {
    /// `["0x..", "0x.."]`
    List(Vec<String>),
    /// `{"addresses": ["0x..", "0x.."]}`, the layout of the stored allowlist document
    Document { addresses: Vec<String> },
}

impl AddressFile {
    fn into_addresses(self) -> Vec<String> {
        match self {
            Self::List(addresses) | Self::Document { addresses } => addresses,
        }
    }
}

/// Read an address list from `path`, or from stdin when `path` is `-`.
///
/// Blank entries are dropped.
pub(crate) fn load(path: &Path) -> Result<AddressSet> {
    let raw = if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read address list from stdin")?;
        raw
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read address list {}", path.display()))?
    };

    let file: AddressFile = serde_json::from_str(&raw).with_context(|| {
        format!(
            "{} is not a JSON array of addresses or an object with an \"addresses\" array",
            path.display()
        )
    })?;

    let set = AddressSet::new(file.into_addresses());
    debug!(path = %path.display(), addresses = set.len(), "loaded address list");

    Ok(set)
}
