//! Range scans: residue pre-filter, then sieve lookup or primality test.

use serde::Serialize;

use crate::primality::PrimalityTest;
use crate::range::Range;
use crate::residue::ResidueFilter;
use crate::sieve::Sieve;

/// Counters collected while scanning a range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub low: u64,
    pub high: u64,
    /// Integers in the range.
    pub total_numbers: u64,
    /// Integers that survived the residue filter and reached the primality check.
    pub candidates_tested: u64,
    /// Primes found among the candidates.
    pub primes_found: u64,
    /// Candidates answered from the sieve table rather than the strategy.
    pub sieve_lookups: u64,
}

impl ScanStats {
    /// Percentage of the range rejected by the residue filter.
    pub fn elimination_rate(&self) -> f64 {
        if self.total_numbers == 0 {
            return 0.0;
        }
        (self.total_numbers - self.candidates_tested) as f64 / self.total_numbers as f64 * 100.0
    }

    /// Percentage of tested candidates that were prime.
    pub fn hit_rate(&self) -> f64 {
        if self.candidates_tested == 0 {
            return 0.0;
        }
        self.primes_found as f64 / self.candidates_tested as f64 * 100.0
    }
}

/// Primes of one scan together with its counters.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub primes: Vec<u64>,
    pub stats: ScanStats,
}

/// The scan pipeline. The primality strategy is fixed at construction; an
/// optional sieve table answers for every integer it covers.
#[derive(Debug, Clone)]
pub struct Scanner<T: PrimalityTest> {
    test: T,
    sieve: Option<Sieve>,
}

impl<T: PrimalityTest> Scanner<T> {
    pub fn new(test: T) -> Self {
        Scanner { test, sieve: None }
    }

    /// Use `sieve` for every integer up to its bound.
    pub fn with_sieve(mut self, sieve: Sieve) -> Self {
        self.sieve = Some(sieve);
        self
    }

    pub fn sieve(&self) -> Option<&Sieve> {
        self.sieve.as_ref()
    }

    pub fn test(&self) -> &T {
        &self.test
    }

    /// Primality of a single integer: table lookup when covered, strategy otherwise.
    pub fn is_prime(&self, n: u64) -> bool {
        self.lookup(n).0
    }

    /// Every prime in `range` that the filter admits, ascending.
    pub fn scan(&self, range: &Range, filter: &ResidueFilter) -> Vec<u64> {
        self.scan_with_stats(range, filter).primes
    }

    /// Like [`scan`](Self::scan), also reporting how much work the filter saved.
    pub fn scan_with_stats(&self, range: &Range, filter: &ResidueFilter) -> ScanOutcome {
        let mut stats = ScanStats {
            low: range.low(),
            high: range.high(),
            total_numbers: range.size(),
            ..ScanStats::default()
        };
        let mut primes = Vec::new();

        for n in range.iter() {
            if !filter.admits(&n) {
                continue;
            }
            stats.candidates_tested += 1;
            let (prime, from_sieve) = self.lookup(n);
            if from_sieve {
                stats.sieve_lookups += 1;
            }
            if prime {
                primes.push(n);
            }
        }

        stats.primes_found = primes.len() as u64;
        log::info!(
            "scanned {} with {}: {} candidates, {} primes ({:.1}% eliminated)",
            range,
            self.test.name(),
            stats.candidates_tested,
            stats.primes_found,
            stats.elimination_rate()
        );
        ScanOutcome { primes, stats }
    }

    /// Same result as [`scan`](Self::scan), but only visits members of the
    /// allowed residue classes: the first one at or above `low`, then every
    /// `modulus` after it. Exceptions inside the range are tested on their own.
    ///
    /// When the modulus exceeds the range size each class holds at most one
    /// member, so the linear scan is used instead.
    pub fn scan_wheel(&self, range: &Range, filter: &ResidueFilter) -> Vec<u64> {
        let modulus = filter.modulus();
        if modulus > range.size() {
            log::debug!(
                "modulus {} exceeds the size of {}; scanning linearly",
                modulus,
                range
            );
            return self.scan(range, filter);
        }
        let low = range.low();
        let offset = low % modulus;
        log::debug!(
            "wheel scan of {} over {} allowed residues mod {}",
            range,
            filter.allowed_count(),
            modulus
        );

        let mut primes = Vec::new();
        for residue in filter.allowed() {
            let delta = if residue >= offset {
                residue - offset
            } else {
                residue + (modulus - offset)
            };
            let mut candidate = match low.checked_add(delta) {
                Some(first) => first,
                None => continue,
            };
            while candidate <= range.high() {
                if self.is_prime(candidate) {
                    primes.push(candidate);
                }
                candidate = match candidate.checked_add(modulus) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
        // Exceptions in allowed classes were already visited by the wheel.
        for n in filter.exceptions() {
            if range.contains(n) && !filter.classify(&n).is_candidate() && self.is_prime(n) {
                primes.push(n);
            }
        }
        primes.sort_unstable();
        primes
    }

    fn lookup(&self, n: u64) -> (bool, bool) {
        match &self.sieve {
            Some(sieve) if sieve.covers(n) => (sieve.is_prime(n).unwrap_or(false), true),
            _ => (self.test.is_prime_u64(n), false),
        }
    }
}
