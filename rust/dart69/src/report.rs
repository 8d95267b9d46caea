//! JSON reports printed by the `dart69` binary.

use num_bigint::BigUint;
use serde::Serialize;

use prime_core::nearby::signed_distance;
use prime_core::{Range, ResidueFilter, ScanStats, Sieve};

/// Primes shown at each end of a scan preview.
pub const PREVIEW_LEN: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct FilterSummary {
    pub modulus: u64,
    pub forbidden: Vec<u64>,
    pub allowed_count: u64,
    pub exceptions: Vec<u64>,
}

impl From<&ResidueFilter> for FilterSummary {
    fn from(filter: &ResidueFilter) -> Self {
        FilterSummary {
            modulus: filter.modulus(),
            forbidden: filter.forbidden().collect(),
            allowed_count: filter.allowed_count(),
            exceptions: filter.exceptions().collect(),
        }
    }
}

/// Result of `--mode=scan`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub range: Range,
    pub filter: FilterSummary,
    pub strategy: &'static str,
    pub wheel: bool,
    pub primes_found: usize,
    /// Counters of a linear scan; wheel scans never visit the rejected integers.
    pub stats: Option<ScanStats>,
    pub elimination_rate: Option<f64>,
    pub hit_rate: Option<f64>,
    /// Every prime when there are at most `2 * PREVIEW_LEN`, else the first few.
    pub first: Vec<u64>,
    pub last: Vec<u64>,
    pub saved_to: Option<String>,
}

impl ScanReport {
    pub fn new(
        range: Range,
        filter: &ResidueFilter,
        strategy: &'static str,
        primes: &[u64],
        stats: Option<ScanStats>,
        quiet: bool,
    ) -> Self {
        let (first, last) = if quiet {
            (Vec::new(), Vec::new())
        } else {
            preview(primes)
        };
        ScanReport {
            range,
            filter: FilterSummary::from(filter),
            strategy,
            wheel: stats.is_none(),
            primes_found: primes.len(),
            elimination_rate: stats.as_ref().map(|s| s.elimination_rate()),
            hit_rate: stats.as_ref().map(|s| s.hit_rate()),
            stats,
            first,
            last,
            saved_to: None,
        }
    }
}

fn preview(primes: &[u64]) -> (Vec<u64>, Vec<u64>) {
    if primes.len() <= 2 * PREVIEW_LEN {
        return (primes.to_vec(), Vec::new());
    }
    (
        primes[..PREVIEW_LEN].to_vec(),
        primes[primes.len() - PREVIEW_LEN..].to_vec(),
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct NearbyPrime {
    pub prime: String,
    pub residue: u64,
    /// Signed offset from the query, e.g. `+6`.
    pub distance: String,
}

/// Result of `--mode=nearby`.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyReport {
    pub n: String,
    pub modulus: u64,
    pub requested: usize,
    /// Largest prime below `n`, unfiltered.
    pub previous: Option<NearbyPrime>,
    pub primes: Vec<NearbyPrime>,
}

impl NearbyPrime {
    fn new(n: &BigUint, p: &BigUint, filter: &ResidueFilter) -> Self {
        let (above, gap) = signed_distance(n, p);
        NearbyPrime {
            prime: p.to_string(),
            residue: filter.residue(p),
            distance: format!("{}{}", if above { '+' } else { '-' }, gap),
        }
    }
}

impl NearbyReport {
    pub fn new(
        n: &BigUint,
        requested: usize,
        filter: &ResidueFilter,
        previous: Option<&BigUint>,
        primes: &[BigUint],
    ) -> Self {
        NearbyReport {
            n: n.to_string(),
            modulus: filter.modulus(),
            requested,
            previous: previous.map(|p| NearbyPrime::new(n, p, filter)),
            primes: primes.iter().map(|p| NearbyPrime::new(n, p, filter)).collect(),
        }
    }
}

/// Result of `--mode=sieve`.
#[derive(Debug, Clone, Serialize)]
pub struct SieveReport {
    pub bound: u64,
    pub prime_count: usize,
    pub largest: Option<u64>,
}

impl From<&Sieve> for SieveReport {
    fn from(sieve: &Sieve) -> Self {
        SieveReport {
            bound: sieve.bound(),
            prime_count: sieve.count(),
            largest: sieve.primes().last(),
        }
    }
}
