use anyhow::{bail, Context};
use clap::Parser;
use rpsha_bench::report;
use rpsha_bench::selftest::DEMO_PARTS;
use rpsha_bench::{
    incremental_demo, measure, run_self_test, run_single_block, run_speedtest, run_throughput,
    timed_hash_hex, MonotonicClock, SingleBlockConfig, SpeedTestConfig, ThroughputConfig,
    DEFAULT_TICKS_PERIOD,
};
use rpsha_hash::{hash_reader, parse_hex_digest, sha256};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Message hashed by `--demo` when none is given.
const DEMO_MESSAGE: &str = "GO";

/// Largest accepted reference clock, in MHz.
const MAX_CPU_MHZ: u64 = 100_000;

/// Exit code for a digest mismatch or failed self test.
const EXIT_MISMATCH: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "rpsha", about = "Streaming SHA-256 for small targets")]
struct Args {
    /// Message to hash (UTF-8)
    #[arg(short = 'm', long = "message", conflicts_with = "file")]
    message: Option<String>,

    /// File to hash, or "-" for stdin
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Report how long hashing took
    #[arg(long = "time", default_value_t = false)]
    time: bool,

    /// Expected hex digest; exit with status 3 on mismatch
    #[arg(long = "verify")]
    verify: Option<String>,

    /// Run the known-answer self test and exit
    #[arg(long = "self-test", default_value_t = false)]
    self_test: bool,

    /// Run the data hash demo and incremental hashing demo, then exit
    #[arg(long = "demo", default_value_t = false)]
    demo: bool,

    /// Run the quick speed test and exit
    #[arg(long = "speedtest", default_value_t = false)]
    speedtest: bool,

    /// Run the throughput analysis and exit
    #[arg(long = "throughput", default_value_t = false)]
    throughput: bool,

    /// Run the single block analysis and exit
    #[arg(long = "single-block", default_value_t = false)]
    single_block: bool,

    /// Comma-separated message sizes in bytes for --speedtest/--throughput
    #[arg(long = "sizes", value_delimiter = ',')]
    sizes: Vec<usize>,

    /// Iterations per size (overrides the size-dependent default)
    #[arg(long = "iters")]
    iters: Option<u32>,

    /// Reference CPU clock in MHz for cycle estimates
    #[arg(long = "cpu-mhz", default_value_t = 125)]
    cpu_mhz: u64,

    /// Hardware accelerator cycles per block, used as the slowdown baseline
    #[arg(long = "hw-cycles", default_value_t = 121.0)]
    hw_cycles: f64,

    /// Tick counter wrap period in microseconds (power of two)
    #[arg(long = "tick-period", default_value_t = DEFAULT_TICKS_PERIOD)]
    tick_period: u64,

    /// Print reports as JSON
    #[arg(long = "json", default_value_t = false)]
    json: bool,

    /// Message to hash, as a positional argument
    #[arg(conflicts_with_all = ["message", "file"])]
    positional: Option<String>,
}

/// Where the bytes to hash come from.
#[derive(Debug, PartialEq)]
enum Input {
    Text(String),
    Stdin,
    File(PathBuf),
}

/// Pick the input source from CLI args. Returns `None` when nothing was given.
fn select_input(args: &Args) -> Option<Input> {
    if let Some(path) = &args.file {
        if path.as_os_str() == "-" {
            return Some(Input::Stdin);
        }
        return Some(Input::File(path.clone()));
    }
    args.message
        .clone()
        .or_else(|| args.positional.clone())
        .map(Input::Text)
}

/// True when any report mode was requested instead of hashing an input.
fn report_mode(args: &Args) -> bool {
    args.self_test || args.demo || args.speedtest || args.throughput || args.single_block
}

/// Validate numeric overrides and flag combinations before any work starts.
fn validate_args(args: &Args) -> Result<(), String> {
    if report_mode(args) {
        // Report modes take no input; only --demo reads a message
        if args.file.is_some() {
            return Err("-f/--file cannot be combined with report modes".to_string());
        }
        if args.verify.is_some() || args.time {
            return Err("--verify and --time only apply when hashing an input".to_string());
        }
        if !args.demo && (args.message.is_some() || args.positional.is_some()) {
            return Err(
                "a message can only be combined with --demo among report modes".to_string(),
            );
        }
    }
    if args.cpu_mhz == 0 {
        return Err("--cpu-mhz must be at least 1".to_string());
    }
    if args.cpu_mhz > MAX_CPU_MHZ {
        return Err(format!(
            "--cpu-mhz {} exceeds maximum of {}",
            args.cpu_mhz, MAX_CPU_MHZ
        ));
    }
    if args.iters == Some(0) {
        return Err("--iters must be at least 1".to_string());
    }
    if !(args.hw_cycles.is_finite() && args.hw_cycles > 0.0) {
        return Err("--hw-cycles must be positive".to_string());
    }
    if args.sizes.contains(&0) {
        return Err("--sizes entries must be at least 1 byte".to_string());
    }
    MonotonicClock::with_period(args.tick_period)
        .map_err(|e| format!("--tick-period: {}", e))?;
    if let Some(expected) = &args.verify {
        parse_hex_digest(expected.trim()).map_err(|e| format!("--verify: {}", e))?;
    }
    Ok(())
}

fn speedtest_config(args: &Args) -> SpeedTestConfig {
    let mut cfg = SpeedTestConfig::default();
    if !args.sizes.is_empty() {
        cfg.sizes = args.sizes.clone();
    }
    cfg
}

fn throughput_config(args: &Args) -> ThroughputConfig {
    let mut cfg = ThroughputConfig {
        cpu_hz: args.cpu_mhz * 1_000_000,
        ..ThroughputConfig::default()
    };
    if !args.sizes.is_empty() {
        cfg.sizes = args.sizes.clone();
    }
    if let Some(iters) = args.iters {
        cfg.small_iters = iters;
        cfg.large_iters = iters;
    }
    cfg
}

fn single_block_config(args: &Args) -> SingleBlockConfig {
    let mut cfg = SingleBlockConfig {
        cpu_hz: args.cpu_mhz * 1_000_000,
        hardware_cycles_per_block: args.hw_cycles,
        ..SingleBlockConfig::default()
    };
    if let Some(iters) = args.iters {
        cfg.iterations = iters;
    }
    cfg
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Hash one input and print its digest. Returns false on a `--verify` mismatch.
fn hash_input(input: Input, args: &Args, clock: &MonotonicClock) -> anyhow::Result<bool> {
    let (digest, elapsed_us) = match input {
        Input::Text(text) => measure(clock, || sha256(text.as_bytes())),
        Input::Stdin => {
            let (digest, elapsed) = measure(clock, || hash_reader(io::stdin().lock()));
            (digest.context("failed to hash stdin")?, elapsed)
        }
        Input::File(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let (digest, elapsed) = measure(clock, || hash_reader(BufReader::new(file)));
            let digest = digest.with_context(|| format!("failed to hash {}", path.display()))?;
            (digest, elapsed)
        }
    };

    let digest_hex = hex::encode(digest);
    let verified = match &args.verify {
        Some(expected) => Some(parse_hex_digest(expected.trim())? == digest),
        None => None,
    };

    if args.json {
        #[derive(Serialize)]
        struct HashOutput<'a> {
            digest_hex: &'a str,
            elapsed_us: Option<u64>,
            verified: Option<bool>,
        }
        print_json(&HashOutput {
            digest_hex: &digest_hex,
            elapsed_us: args.time.then_some(elapsed_us),
            verified,
        })?;
    } else {
        println!("{}", digest_hex);
        if args.time {
            eprintln!(
                "Time: {} microseconds ({:.3} ms)",
                elapsed_us,
                elapsed_us as f64 / 1000.0
            );
        }
        if verified == Some(false) {
            eprintln!("Digest mismatch: expected {}", args.verify.as_deref().unwrap_or(""));
        }
    }

    Ok(verified != Some(false))
}

/// Run whichever report modes were requested. Returns false if the self test failed.
fn run_reports(args: &Args, clock: &MonotonicClock) -> anyhow::Result<bool> {
    let mut ok = true;

    if args.self_test {
        let report = run_self_test(clock);
        ok &= report.all_passed();
        if args.json {
            print_json(&report)?;
        } else {
            report::print_self_test(&report);
        }
    }

    if args.demo {
        let message = args
            .message
            .as_deref()
            .or(args.positional.as_deref())
            .unwrap_or(DEMO_MESSAGE);
        let timed = timed_hash_hex(clock, message);
        let demo = incremental_demo(&DEMO_PARTS);
        ok &= demo.matches;
        if args.json {
            print_json(&(&timed, &demo))?;
        } else {
            println!("Simple Hash");
            report::print_timed_hash(&timed);
            report::print_incremental_demo(&demo);
        }
    }

    if args.speedtest {
        let samples = run_speedtest(clock, &speedtest_config(args))?;
        if args.json {
            print_json(&samples)?;
        } else {
            report::print_speedtest(&samples);
        }
    }

    if args.throughput {
        let cfg = throughput_config(args);
        let samples = run_throughput(clock, &cfg)?;
        if args.json {
            print_json(&samples)?;
        } else {
            report::print_throughput(&samples, &cfg);
        }
    }

    if args.single_block {
        let cfg = single_block_config(args);
        let single = run_single_block(clock, &cfg)?;
        if args.json {
            print_json(&single)?;
        } else {
            report::print_single_block(&single, cfg.cpu_hz);
        }
    }

    Ok(ok)
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let clock = MonotonicClock::with_period(args.tick_period)?;

    if report_mode(args) {
        return run_reports(args, &clock);
    }

    let Some(input) = select_input(args) else {
        bail!("nothing to hash: pass a message, -m, -f, or one of the report modes");
    };
    log::debug!("hashing input {:?}", input);
    hash_input(input, args, &clock)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(err) = validate_args(&args) {
        eprintln!("Error: {}", err);
        std::process::exit(2);
    }

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_MISMATCH),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}
