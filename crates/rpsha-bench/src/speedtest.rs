//! Quick one-pass speed test over a handful of sizes.

#![forbid(unsafe_code)]

use crate::clock::TickSource;
use crate::payload;
use crate::timing::measure;
use rpsha_core::{Error, Result};
use rpsha_hash::sha256;
use serde::Serialize;
use std::hint::black_box;

/// Speed test configuration.
#[derive(Debug, Clone)]
pub struct SpeedTestConfig {
    /// Message sizes in bytes, hashed once each.
    pub sizes: Vec<usize>,
    /// Byte the messages are filled with.
    pub fill: u8,
}

impl Default for SpeedTestConfig {
    fn default() -> Self {
        Self {
            sizes: vec![16, 64, 256, 1024],
            fill: b'x',
        }
    }
}

impl SpeedTestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::InvalidBenchConfig(
                "speed test needs at least one size".into(),
            ));
        }
        Ok(())
    }
}

/// Timing for one message size.
#[derive(Debug, Clone, Serialize)]
pub struct SpeedSample {
    pub size: usize,
    pub elapsed_us: u64,
    pub kib_per_sec: f64,
}

/// KiB/s for `bytes` hashed in `elapsed_us`. `elapsed_us` must be positive.
pub fn kib_per_sec(bytes: usize, elapsed_us: f64) -> f64 {
    bytes as f64 / elapsed_us * 1_000_000.0 / 1024.0
}

/// Measured ticks as a rate denominator. A zero reading counts as one tick.
pub(crate) fn nonzero_us(total_us: u64) -> f64 {
    (total_us as f64).max(1.0)
}

/// Hash one message per configured size and record the time each took.
pub fn run_speedtest<C: TickSource + ?Sized>(
    clock: &C,
    cfg: &SpeedTestConfig,
) -> Result<Vec<SpeedSample>> {
    cfg.validate()?;
    log::debug!("speed test sizes {:?}", cfg.sizes);

    let mut samples = Vec::with_capacity(cfg.sizes.len());
    for &size in &cfg.sizes {
        let data = payload::repeated(cfg.fill, size)?;
        let (_, elapsed_us) = measure(clock, || black_box(sha256(black_box(&data))));

        let sample = SpeedSample {
            size,
            elapsed_us,
            kib_per_sec: kib_per_sec(size, nonzero_us(elapsed_us)),
        };
        log::trace!("{:?}", sample);
        samples.push(sample);
    }
    Ok(samples)
}
