//! Benchmark input generation.

#![forbid(unsafe_code)]

use rpsha_core::{Error, Result};

/// `len` copies of `byte`, failing cleanly if the buffer cannot be reserved.
pub fn repeated(byte: u8, len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::Allocation { requested: len })?;
    buf.resize(len, byte);
    Ok(buf)
}
