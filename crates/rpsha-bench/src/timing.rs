//! Timing single hash operations.

#![forbid(unsafe_code)]

use crate::clock::TickSource;
use rpsha_hash::sha256_hex;
use serde::Serialize;

/// Run `f` between two clock reads and return its value with elapsed ticks.
///
/// A negative difference (clock misuse, or more than half a period elapsed)
/// is reported as zero.
pub fn measure<C: TickSource + ?Sized, T>(clock: &C, f: impl FnOnce() -> T) -> (T, u64) {
    let start = clock.now();
    let value = f();
    let end = clock.now();
    let elapsed = clock.diff(end, start).max(0) as u64;
    (value, elapsed)
}

/// A message hashed once, with the time it took.
#[derive(Debug, Clone, Serialize)]
pub struct TimedHash {
    pub message: String,
    pub digest_hex: String,
    pub elapsed_us: u64,
}

impl TimedHash {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_us as f64 / 1000.0
    }
}

/// Hash the UTF-8 bytes of `message` and time it.
pub fn timed_hash_hex<C: TickSource + ?Sized>(clock: &C, message: &str) -> TimedHash {
    let (digest_hex, elapsed_us) = measure(clock, || sha256_hex(message.as_bytes()));
    log::trace!("hashed {} bytes in {} us", message.len(), elapsed_us);
    TimedHash {
        message: message.to_string(),
        digest_hex,
        elapsed_us,
    }
}
