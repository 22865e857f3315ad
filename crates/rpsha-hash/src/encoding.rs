//! Digest text encoding.

#![forbid(unsafe_code)]

use crate::sha256::{DIGEST_HEX_LEN, DIGEST_LEN};
use rpsha_core::{Error, Result};

/// Parse a 64-character hex digest (either case) into raw bytes.
pub fn parse_hex_digest(text: &str) -> Result<[u8; DIGEST_LEN]> {
    if text.len() != DIGEST_HEX_LEN {
        return Err(Error::InvalidDigestLength { got: text.len() });
    }

    let mut digest = [0u8; DIGEST_LEN];
    hex::decode_to_slice(text, &mut digest).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => Error::InvalidHexDigit {
            position: index,
            found: c,
        },
        // Length was checked above; remaining variants are length mismatches
        _ => Error::InvalidDigestLength { got: text.len() },
    })?;
    Ok(digest)
}
