//! Hex wire format for digests
//!
//! A digest travels as `0x` followed by exactly 64 hex characters. Anything
//! else is rejected with [`MerkleError::MalformedDigest`]; input is never
//! truncated or padded to fit.

use alloy_primitives::{B256, hex};

use crate::error::{MerkleError, Result};
use crate::hasher::HASH_SIZE;

/// Number of hex characters in a serialized digest, without the `0x` prefix
pub const DIGEST_HEX_LEN: usize = 2 * HASH_SIZE;

/// Parse a `0x`-prefixed, 64 character hex string into a digest.
///
/// Upper and lower case hex digits are both accepted; the prefix itself must
/// be a lowercase `0x`.
///
/// ```
/// use allowlist_merkle::parse_digest;
///
/// let digest = parse_digest(
///     "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470",
/// ).unwrap();
/// assert_eq!(digest, allowlist_merkle::hash(b""));
///
/// assert!(parse_digest("0xc5d2").is_err());
/// ```
pub fn parse_digest(input: &str) -> Result<B256> {
    let digits = input
        .strip_prefix("0x")
        .ok_or_else(|| MerkleError::malformed_digest(input, "missing 0x prefix"))?;

    if digits.len() != DIGEST_HEX_LEN {
        return Err(MerkleError::malformed_digest(
            input,
            "expected exactly 64 hex characters",
        ));
    }

    let mut out = [0u8; HASH_SIZE];
    hex::decode_to_slice(digits, &mut out)
        .map_err(|_| MerkleError::malformed_digest(input, "invalid hex character"))?;

    Ok(B256::from(out))
}

/// Format a digest as `0x` followed by 64 lowercase hex characters.
#[inline]
pub fn format_digest(digest: &B256) -> String {
    hex::encode_prefixed(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_HASH: &str = "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";

    #[test]
    fn test_format_then_parse() {
        let digest = crate::hash(b"");
        let text = format_digest(&digest);
        assert_eq!(text, EMPTY_HASH);
        assert_eq!(text.len(), 2 + DIGEST_HEX_LEN);
        assert_eq!(parse_digest(&text).unwrap(), digest);
    }

    #[test]
    fn test_parse_accepts_uppercase_hex() {
        let upper = format!("0x{}", EMPTY_HASH[2..].to_uppercase());
        assert_eq!(parse_digest(&upper).unwrap(), crate::hash(b""));
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        let upper_prefix = format!("0X{}", &EMPTY_HASH[2..]);
        for input in [&EMPTY_HASH[2..], upper_prefix.as_str()] {
            let err = parse_digest(input).unwrap_err();
            assert!(matches!(
                err,
                MerkleError::MalformedDigest { reason: "missing 0x prefix", .. }
            ));
        }
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        // One character short, one character long, and a 31-byte digest.
        let long = format!("{EMPTY_HASH}0");
        for input in [
            &EMPTY_HASH[..EMPTY_HASH.len() - 1],
            long.as_str(),
            &EMPTY_HASH[..EMPTY_HASH.len() - 2],
        ] {
            let err = parse_digest(input).unwrap_err();
            assert!(
                matches!(err, MerkleError::MalformedDigest { .. }),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let bad = format!("0x{}", "zz".repeat(HASH_SIZE));
        assert_eq!(
            parse_digest(&bad).unwrap_err(),
            MerkleError::MalformedDigest {
                input: bad,
                reason: "invalid hex character",
            }
        );
    }
}
