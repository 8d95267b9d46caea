//! Scaling benchmarks for residue-filtered prime scans.
//!
//! Runs the linear and wheel scans over ranges of increasing size, then over
//! windows far past the sieve table, to show how the DART-69 filter changes
//! the amount of primality work as the range grows.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use prime_core::{
    Adaptive, MillerRabin, PrimalityTest, Range, ResidueFilter, Scanner, Sieve, TrialDivision,
    DART69_MODULUS,
};

/// Width of each window scanned past the sieve table.
const WINDOW: u64 = 20_000;

fn main() {
    env_logger::init();

    println!("================================================================");
    println!("  SCALING BENCHMARKS: DART-69 Residue-Filtered Scans");
    println!("================================================================\n");

    bench_table_scans();
    bench_past_table();
}

// ============================================================================
// Part 1: ranges answered from the sieve table
// ============================================================================

fn bench_table_scans() {
    println!("  Ranges [0, N] answered from a sieve table of the same size.\n");
    println!(
        "  {:>12} {:>10} {:>12} {:>12} {:>12} {:>8}",
        "N", "primes", "sieve_ms", "linear_ms", "wheel_ms", "elim_%"
    );
    println!("  {}", "-".repeat(72));

    let dart69 = ResidueFilter::dart69();
    for exp in 4..=7u32 {
        let high = 10u64.pow(exp);
        let range = Range::up_to(high);

        let start = Instant::now();
        let sieve = match Sieve::new(high) {
            Ok(sieve) => sieve,
            Err(e) => {
                println!("  {:>12} {}", high, e);
                continue;
            }
        };
        let sieve_ms = start.elapsed().as_secs_f64() * 1e3;
        let scanner = Scanner::new(Adaptive::default()).with_sieve(sieve);

        let start = Instant::now();
        let outcome = scanner.scan_with_stats(&range, &dart69);
        let linear_ms = start.elapsed().as_secs_f64() * 1e3;

        let start = Instant::now();
        let wheel = scanner.scan_wheel(&range, &dart69);
        let wheel_ms = start.elapsed().as_secs_f64() * 1e3;
        assert_eq!(wheel, outcome.primes, "wheel and linear scans disagree");

        println!(
            "  {:>12} {:>10} {:>12.2} {:>12.2} {:>12.2} {:>8.2}",
            high,
            outcome.primes.len(),
            sieve_ms,
            linear_ms,
            wheel_ms,
            outcome.stats.elimination_rate()
        );
    }
    println!();
}

// ============================================================================
// Part 2: windows past the table, every candidate tested directly
// ============================================================================

fn bench_past_table() {
    println!("  Random windows of {} integers past the table.\n", WINDOW);
    println!(
        "  {:>22} {:>8} {:>12} {:>12} {:>12} {:>12}",
        "low", "primes", "trial_ms", "mr_ms", "mr_wheel_ms", "none_mr_ms"
    );
    println!("  {}", "-".repeat(84));

    let mut rng = StdRng::seed_from_u64(12345);
    let dart69 = ResidueFilter::dart69();
    let permissive = match ResidueFilter::permissive(DART69_MODULUS) {
        Ok(filter) => filter,
        Err(e) => {
            println!("  {}", e);
            return;
        }
    };

    for exp in [9u32, 12, 15, 18] {
        let low = rng.gen_range(10u64.pow(exp)..10u64.pow(exp) * 9);
        let range = match Range::new(low, low + WINDOW) {
            Ok(range) => range,
            Err(e) => {
                println!("  {:>22} {}", low, e);
                continue;
            }
        };

        // Trial division is only practical up to around 10^12.
        let trial_ms = if exp <= 12 {
            Some(time_scan(&Scanner::new(TrialDivision), &range, &dart69).1)
        } else {
            None
        };
        let mr = Scanner::new(MillerRabin::default());
        let (primes, mr_ms) = time_scan(&mr, &range, &dart69);

        let start = Instant::now();
        let wheel = mr.scan_wheel(&range, &dart69);
        let wheel_ms = start.elapsed().as_secs_f64() * 1e3;
        assert_eq!(wheel, primes, "wheel and linear scans disagree");

        let (_, none_ms) = time_scan(&mr, &range, &permissive);

        println!(
            "  {:>22} {:>8} {:>12} {:>12.2} {:>12.2} {:>12.2}",
            low,
            primes.len(),
            trial_ms.map_or_else(|| "SKIP".to_string(), |ms| format!("{:.2}", ms)),
            mr_ms,
            wheel_ms,
            none_ms
        );
    }
    println!();
}

fn time_scan<T: PrimalityTest>(
    scanner: &Scanner<T>,
    range: &Range,
    filter: &ResidueFilter,
) -> (Vec<u64>, f64) {
    let start = Instant::now();
    let primes = scanner.scan(range, filter);
    (primes, start.elapsed().as_secs_f64() * 1e3)
}
