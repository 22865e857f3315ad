//! Benchmark and demo drivers for the rpsha hash engine.
//!
//! Everything here is a consumer of the `rpsha-hash` API plus a microsecond
//! tick clock. No hashing logic lives in this crate.

#![forbid(unsafe_code)]

pub mod clock;
pub mod payload;
pub mod report;
pub mod selftest;
pub mod speedtest;
pub mod throughput;
pub mod timing;

pub use clock::{ticks_diff, MonotonicClock, StepClock, TickSource, DEFAULT_TICKS_PERIOD};
pub use selftest::{incremental_demo, run_self_test, IncrementalDemo, SelfTestReport};
pub use speedtest::{run_speedtest, SpeedSample, SpeedTestConfig};
pub use throughput::{
    run_single_block, run_throughput, SingleBlockConfig, SingleBlockReport, ThroughputConfig,
    ThroughputSample,
};
pub use timing::{measure, timed_hash_hex, TimedHash};
