//! dart69 CLI: residue-filtered prime scans, checks and filter audits.
//!
//! See `dart69::cli` for the full list of modes and options. Every mode prints
//! a pretty JSON report on stdout; set `RUST_LOG=info` for progress logging.

use std::time::Instant;

use num_bigint::BigUint;
use serde::Serialize;

use dart69::report::{NearbyReport, ScanReport, SieveReport};
use dart69::{output, CliConfig, Dart69Error, Mode};
use prime_core::{
    audit_filter, check, nearby_primes, parse_natural, prev_prime, random_with_digits, Sieve,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = CliConfig::from_args(&args).and_then(|config| run(&config));
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<(), Dart69Error> {
    let start = Instant::now();
    match config.mode {
        Mode::Scan => run_scan(config)?,
        Mode::Check => {
            let n = parse_natural(required_n(config)?)?;
            run_check(config, &n)?;
        }
        Mode::Random => {
            let n = random_with_digits(config.digits, &mut rand::thread_rng());
            run_check(config, &n)?;
        }
        Mode::Nearby => run_nearby(config)?,
        Mode::Audit => run_audit(config)?,
        Mode::Sieve => {
            let sieve = Sieve::new(config.scan.high)?;
            print_json(&SieveReport::from(&sieve))?;
        }
    }
    log::info!("finished {:?} in {:.3}s", config.mode, start.elapsed().as_secs_f64());
    Ok(())
}

fn run_scan(config: &CliConfig) -> Result<(), Dart69Error> {
    let scan = &config.scan;
    let range = scan.range()?;
    let filter = scan.residue_filter()?;
    let scanner = scan.scanner()?;

    let (primes, stats) = if config.wheel {
        (scanner.scan_wheel(&range, &filter), None)
    } else {
        let outcome = scanner.scan_with_stats(&range, &filter);
        (outcome.primes, Some(outcome.stats))
    };

    let mut report = ScanReport::new(
        range,
        &filter,
        scanner.test().name(),
        &primes,
        stats,
        config.quiet,
    );
    if let Some(path) = &config.save {
        output::save_primes(path, &primes, scan.per_line)?;
        report.saved_to = Some(path.display().to_string());
    }
    print_json(&report)
}

fn run_check(config: &CliConfig, n: &BigUint) -> Result<(), Dart69Error> {
    let filter = config.scan.residue_filter()?;
    let test = config.scan.primality_test();
    print_json(&check(n, &filter, &test))
}

fn run_nearby(config: &CliConfig) -> Result<(), Dart69Error> {
    let n = parse_natural(required_n(config)?)?;
    let filter = config.scan.residue_filter()?;
    let test = config.scan.primality_test();
    let previous = prev_prime(&n, &test);
    let primes = nearby_primes(&n, config.count, &filter, &test);
    print_json(&NearbyReport::new(
        &n,
        config.count,
        &filter,
        previous.as_ref(),
        &primes,
    ))
}

fn run_audit(config: &CliConfig) -> Result<(), Dart69Error> {
    let range = config.scan.range()?;
    let filter = config.scan.residue_filter()?;
    let sieve = Sieve::new(range.high())?;
    print_json(&audit_filter(&range, &filter, &sieve)?)
}

fn required_n(config: &CliConfig) -> Result<&str, Dart69Error> {
    config
        .n
        .as_deref()
        .ok_or_else(|| Dart69Error::Usage("--n=<integer> is required".to_string()))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Dart69Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
