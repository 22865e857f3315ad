//! Hashing byte streams through `std::io`.

#![forbid(unsafe_code)]

use crate::sha256::{Sha256, DIGEST_LEN};
use rpsha_core::Result;
use std::io::{self, Read, Write};

impl Write for Sha256 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Hash everything `reader` yields until EOF.
///
/// A read error aborts the hash; no digest is produced for partial input.
pub fn hash_reader<R: Read>(mut reader: R) -> Result<[u8; DIGEST_LEN]> {
    let mut hasher = Sha256::new();
    let n = io::copy(&mut reader, &mut hasher)?;
    log::debug!("hashed {} bytes from reader", n);
    Ok(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sha256::sha256;
    use rpsha_core::Error;

    /// Yields some bytes, then fails.
    struct FailingReader {
        remaining: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            let n = buf.len().min(self.remaining);
            buf[..n].fill(b'x');
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_hash_reader_matches_one_shot() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 256) as u8).collect();
        let digest = hash_reader(io::Cursor::new(&data)).unwrap();
        assert_eq!(digest, sha256(&data));
    }

    #[test]
    fn test_hash_reader_empty() {
        let digest = hash_reader(io::empty()).unwrap();
        assert_eq!(digest, sha256(b""));
    }

    #[test]
    fn test_hash_reader_surfaces_read_errors() {
        let result = hash_reader(FailingReader { remaining: 100 });
        match result {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_impl_feeds_hasher() {
        let mut hasher = Sha256::new();
        write!(hasher, "Hello, {}!", "World").unwrap();
        hasher.flush().unwrap();
        assert_eq!(hasher.digest(), sha256(b"Hello, World!"));
    }
}
