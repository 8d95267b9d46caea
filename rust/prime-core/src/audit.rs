//! Measuring how well a residue filter separates primes from composites.
//!
//! The audit reports what the filter did over a range, checked against the
//! sieve table. It asserts no target rates.

use serde::Serialize;

use crate::error::{PrimeError, Result};
use crate::range::Range;
use crate::residue::ResidueFilter;
use crate::sieve::Sieve;

/// Filter efficacy over one range.
#[derive(Debug, Clone, Serialize)]
pub struct FilterAudit {
    pub low: u64,
    pub high: u64,
    pub modulus: u64,
    pub total_numbers: u64,
    /// Integers that passed the filter.
    pub candidates: u64,
    /// Integers the filter rejected.
    pub eliminated: u64,
    pub actual_primes: u64,
    pub primes_captured: u64,
    /// Primes the filter rejected, ascending.
    pub primes_missed: Vec<u64>,
    /// Candidates that turned out composite (or 0/1).
    pub false_positives: u64,
    /// `eliminated / total_numbers`, percent.
    pub elimination_rate: f64,
    /// `primes_captured / actual_primes`, percent; 100 when the range has no primes.
    pub prime_capture_rate: f64,
    /// `false_positives / candidates`, percent; 0 when there are no candidates.
    pub false_positive_rate: f64,
}

/// Compare `filter` against the sieve over `range`.
pub fn audit_filter(range: &Range, filter: &ResidueFilter, sieve: &Sieve) -> Result<FilterAudit> {
    if !sieve.covers(range.high()) {
        return Err(PrimeError::OutOfRange(format!(
            "audit range {} extends beyond the sieve bound {}",
            range,
            sieve.bound()
        )));
    }

    let mut candidates = 0u64;
    let mut actual_primes = 0u64;
    let mut primes_captured = 0u64;
    let mut false_positives = 0u64;
    let mut primes_missed = Vec::new();

    for n in range.iter() {
        let prime = sieve.is_prime(n)?;
        let passes = filter.admits(&n);
        if prime {
            actual_primes += 1;
        }
        match (passes, prime) {
            (true, true) => {
                candidates += 1;
                primes_captured += 1;
            }
            (true, false) => {
                candidates += 1;
                false_positives += 1;
            }
            (false, true) => primes_missed.push(n),
            (false, false) => {}
        }
    }

    let total_numbers = range.size();
    let eliminated = total_numbers - candidates;
    let audit = FilterAudit {
        low: range.low(),
        high: range.high(),
        modulus: filter.modulus(),
        total_numbers,
        candidates,
        eliminated,
        actual_primes,
        primes_captured,
        primes_missed,
        false_positives,
        elimination_rate: percent(eliminated, total_numbers, 0.0),
        prime_capture_rate: percent(primes_captured, actual_primes, 100.0),
        false_positive_rate: percent(false_positives, candidates, 0.0),
    };
    log::info!(
        "audit {}: {:.1}% eliminated, {:.1}% of primes captured",
        range,
        audit.elimination_rate,
        audit.prime_capture_rate
    );
    Ok(audit)
}

fn percent(part: u64, whole: u64, if_empty: f64) -> f64 {
    if whole == 0 {
        if_empty
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
