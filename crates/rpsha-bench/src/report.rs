//! Human-readable output for bench and demo results.

#![forbid(unsafe_code)]

use crate::selftest::{IncrementalDemo, SelfTestReport};
use crate::speedtest::SpeedSample;
use crate::throughput::{SingleBlockReport, ThroughputConfig, ThroughputSample};
use crate::timing::TimedHash;

pub fn print_timed_hash(timed: &TimedHash) {
    println!("Message: {}", timed.message);
    println!("SHA-256: {}", timed.digest_hex);
    println!(
        "Time: {} microseconds ({:.3} ms)",
        timed.elapsed_us,
        timed.elapsed_ms()
    );
}

pub fn print_self_test(report: &SelfTestReport) {
    println!("\n=== SHA-256 known-answer self test ===\n");

    for outcome in &report.outcomes {
        println!("Input:    {:?}", outcome.input);
        println!("Expected: {}", outcome.expected);
        println!("Computed: {}", outcome.computed);
        if outcome.passed {
            println!("PASS (Time: {} microseconds)", outcome.elapsed_us);
        } else {
            println!("FAIL");
        }
        println!();
    }

    if report.all_passed() {
        println!("All tests passed!");
    } else {
        println!("{} of {} tests failed!", report.failures(), report.outcomes.len());
    }
}

pub fn print_incremental_demo(demo: &IncrementalDemo) {
    println!("\n=== Incremental hashing ===\n");
    println!("Parts:      {:?}", demo.parts);
    println!("Streamed:   {}", demo.streamed_hex);
    println!("One-shot:   {}", demo.one_shot_hex);
    println!("Match:      {}", demo.matches);
}

pub fn print_speedtest(samples: &[SpeedSample]) {
    println!("Speed Test:");
    for s in samples {
        println!(
            "{:>6} bytes: {:>8} us ({:.1} KB/s)",
            s.size, s.elapsed_us, s.kib_per_sec
        );
    }
}

pub fn print_throughput(samples: &[ThroughputSample], cfg: &ThroughputConfig) {
    println!(
        "SHA-256 throughput, iters={}/{} (threshold {} bytes), reference clock {:.0} MHz\n",
        cfg.small_iters,
        cfg.large_iters,
        cfg.large_threshold,
        cfg.cpu_hz as f64 / 1_000_000.0
    );

    for s in samples {
        println!("Size: {:>6} bytes ({:>4} blocks)", s.size, s.blocks);
        println!("  Time:        {:>10.0} us", s.avg_elapsed_us);
        println!(
            "  Throughput:  {:>8.3} MB/s ({:>9.2} KB/s)",
            s.mib_per_sec, s.kib_per_sec
        );
        println!(
            "  Cycles/byte: {:.1} @ {:.0} MHz",
            s.cycles_per_byte,
            cfg.cpu_hz as f64 / 1_000_000.0
        );
        println!();
    }
}

pub fn print_single_block(report: &SingleBlockReport, cpu_hz: u64) {
    let mhz = cpu_hz as f64 / 1_000_000.0;

    println!("\nSingle block analysis\n");
    println!(
        "Message size: {} bytes ({} block{} after padding)",
        report.message_len,
        report.padded_blocks,
        if report.padded_blocks == 1 { "" } else { "s" }
    );
    println!(
        "Average time: {:.1} us ({:.3} ms) over {} iterations",
        report.avg_elapsed_us,
        report.avg_elapsed_ms(),
        report.iterations
    );
    println!("Estimated cycles @ {:.0} MHz: {:.0}", mhz, report.estimated_cycles);
    println!();
    println!("Hardware:  {:.0} cycles per block", report.hardware_cycles);
    println!("Software: ~{:.0} cycles per block", report.estimated_cycles);
    println!("Slowdown factor: ~{:.1}x", report.slowdown);
}
