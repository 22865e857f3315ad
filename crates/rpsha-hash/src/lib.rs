//! SHA-256 hash engine for rpsha.
//!
//! Implemented from scratch with fixed-size buffers so it runs unchanged on
//! small targets. The reference `sha2` crate is a dev-dependency only.

#![forbid(unsafe_code)]

pub mod encoding;
pub mod reader;
pub mod sha256;

pub use encoding::parse_hex_digest;
pub use reader::hash_reader;
pub use sha256::{sha256, sha256_hex, Sha256, BLOCK_LEN, DIGEST_HEX_LEN, DIGEST_LEN};
