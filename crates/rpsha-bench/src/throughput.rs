//! Throughput and per-block cost analysis.
//!
//! Averages several runs per size and converts the result into bytes per
//! second and CPU cycles per byte at a reference clock frequency, so numbers
//! from a host can be compared with a target microcontroller.

#![forbid(unsafe_code)]

use crate::clock::TickSource;
use crate::payload;
use crate::speedtest::{kib_per_sec, nonzero_us};
use crate::timing::measure;
use rpsha_core::{Error, Result};
use rpsha_hash::{sha256_hex, BLOCK_LEN};
use serde::Serialize;
use std::hint::black_box;

/// Reference CPU clock (RP2040 default, 125 MHz).
pub const DEFAULT_CPU_HZ: u64 = 125_000_000;

/// Cycles per block of the RP2350 SHA-256 accelerator, used as a baseline.
pub const HARDWARE_CYCLES_PER_BLOCK: f64 = 121.0;

/// Number of blocks the message data spans, ignoring padding.
pub fn data_blocks(len: usize) -> usize {
    len.div_ceil(BLOCK_LEN)
}

/// Blocks compressed for a message of `len` bytes, padding included.
pub fn padded_blocks(len: usize) -> usize {
    // 0x80 marker plus 8-byte length field
    (len + 9).div_ceil(BLOCK_LEN)
}

/// Throughput run configuration.
#[derive(Debug, Clone)]
pub struct ThroughputConfig {
    /// Message sizes in bytes.
    pub sizes: Vec<usize>,
    /// Iterations for messages shorter than `large_threshold`.
    pub small_iters: u32,
    /// Iterations for messages of at least `large_threshold` bytes.
    pub large_iters: u32,
    pub large_threshold: usize,
    /// Reference clock used for the cycles/byte estimate.
    pub cpu_hz: u64,
    pub fill: u8,
}

impl Default for ThroughputConfig {
    fn default() -> Self {
        Self {
            sizes: vec![64, 512, 1024, 4096, 8192],
            small_iters: 10,
            large_iters: 5,
            large_threshold: 1024,
            cpu_hz: DEFAULT_CPU_HZ,
            fill: b'x',
        }
    }
}

impl ThroughputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::InvalidBenchConfig(
                "throughput run needs at least one size".into(),
            ));
        }
        if self.sizes.contains(&0) {
            return Err(Error::InvalidBenchConfig(
                "throughput sizes must be non-zero".into(),
            ));
        }
        if self.small_iters == 0 || self.large_iters == 0 {
            return Err(Error::InvalidBenchConfig(
                "iteration counts must be at least 1".into(),
            ));
        }
        if self.cpu_hz == 0 {
            return Err(Error::InvalidBenchConfig(
                "reference cpu clock must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn iterations_for(&self, size: usize) -> u32 {
        if size < self.large_threshold {
            self.small_iters
        } else {
            self.large_iters
        }
    }
}

/// Averaged measurement for one message size.
#[derive(Debug, Clone, Serialize)]
pub struct ThroughputSample {
    pub size: usize,
    pub blocks: usize,
    pub iterations: u32,
    pub avg_elapsed_us: f64,
    pub bytes_per_sec: f64,
    pub kib_per_sec: f64,
    pub mib_per_sec: f64,
    pub cycles_per_byte: f64,
}

impl ThroughputSample {
    fn from_timing(size: usize, iterations: u32, total_us: u64, cpu_hz: u64) -> Self {
        let avg_elapsed_us = total_us as f64 / iterations as f64;
        // Only the measured total is floored; a sub-tick average is real
        let rate_avg_us = nonzero_us(total_us) / iterations as f64;
        let avg_secs = rate_avg_us / 1_000_000.0;
        let bytes_per_sec = size as f64 / avg_secs;
        let kib = kib_per_sec(size, rate_avg_us);

        Self {
            size,
            blocks: data_blocks(size),
            iterations,
            avg_elapsed_us,
            bytes_per_sec,
            kib_per_sec: kib,
            mib_per_sec: kib / 1024.0,
            cycles_per_byte: cpu_hz as f64 * avg_secs / size as f64,
        }
    }
}

/// Hash each configured size several times and report averaged rates.
pub fn run_throughput<C: TickSource + ?Sized>(
    clock: &C,
    cfg: &ThroughputConfig,
) -> Result<Vec<ThroughputSample>> {
    cfg.validate()?;
    log::debug!(
        "throughput sizes {:?}, iters {}/{} (threshold {} bytes), cpu {} Hz",
        cfg.sizes,
        cfg.small_iters,
        cfg.large_iters,
        cfg.large_threshold,
        cfg.cpu_hz
    );

    let mut samples = Vec::with_capacity(cfg.sizes.len());
    for &size in &cfg.sizes {
        let data = payload::repeated(cfg.fill, size)?;
        let iterations = cfg.iterations_for(size);

        // One bracket around the whole loop, like a wall-clock stopwatch
        let (_, total_us) = measure(clock, || {
            for _ in 0..iterations {
                black_box(sha256_hex(black_box(&data)));
            }
        });

        let sample = ThroughputSample::from_timing(size, iterations, total_us, cfg.cpu_hz);
        log::trace!("{:?}", sample);
        samples.push(sample);
    }
    Ok(samples)
}

/// Configuration for the single-block cost analysis.
#[derive(Debug, Clone)]
pub struct SingleBlockConfig {
    /// 55 bytes is the longest message whose padding still fits one block.
    pub message_len: usize,
    pub fill: u8,
    pub iterations: u32,
    pub cpu_hz: u64,
    pub hardware_cycles_per_block: f64,
}

impl Default for SingleBlockConfig {
    fn default() -> Self {
        Self {
            message_len: BLOCK_LEN - 9,
            fill: b'a',
            iterations: 100,
            cpu_hz: DEFAULT_CPU_HZ,
            hardware_cycles_per_block: HARDWARE_CYCLES_PER_BLOCK,
        }
    }
}

impl SingleBlockConfig {
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidBenchConfig(
                "iteration count must be at least 1".into(),
            ));
        }
        if self.cpu_hz == 0 {
            return Err(Error::InvalidBenchConfig(
                "reference cpu clock must be non-zero".into(),
            ));
        }
        if !(self.hardware_cycles_per_block.is_finite() && self.hardware_cycles_per_block > 0.0) {
            return Err(Error::InvalidBenchConfig(
                "hardware cycles per block must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Estimated software cost of compressing one block.
#[derive(Debug, Clone, Serialize)]
pub struct SingleBlockReport {
    pub message_len: usize,
    pub padded_blocks: usize,
    pub iterations: u32,
    pub avg_elapsed_us: f64,
    pub estimated_cycles: f64,
    pub hardware_cycles: f64,
    pub slowdown: f64,
}

impl SingleBlockReport {
    pub fn avg_elapsed_ms(&self) -> f64 {
        self.avg_elapsed_us / 1000.0
    }
}

/// Time a message that pads to a single block and compare with the hardware baseline.
pub fn run_single_block<C: TickSource + ?Sized>(
    clock: &C,
    cfg: &SingleBlockConfig,
) -> Result<SingleBlockReport> {
    cfg.validate()?;
    let data = payload::repeated(cfg.fill, cfg.message_len)?;

    let (_, total_us) = measure(clock, || {
        for _ in 0..cfg.iterations {
            black_box(sha256_hex(black_box(&data)));
        }
    });

    let avg_elapsed_us = total_us as f64 / cfg.iterations as f64;
    let estimated_cycles = avg_elapsed_us / 1_000_000.0 * cfg.cpu_hz as f64;

    Ok(SingleBlockReport {
        message_len: cfg.message_len,
        padded_blocks: padded_blocks(cfg.message_len),
        iterations: cfg.iterations,
        avg_elapsed_us,
        estimated_cycles,
        hardware_cycles: cfg.hardware_cycles_per_block,
        slowdown: estimated_cycles / cfg.hardware_cycles_per_block,
    })
}
