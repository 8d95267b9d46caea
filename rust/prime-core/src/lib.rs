//! Sieve, residue-class pre-filter and primality strategies for DART-69 prime scans.
//!
//! The pipeline is linear: a [`ResidueFilter`] rejects integers whose residue
//! is forbidden, and the survivors are confirmed by a [`Sieve`] lookup or, past
//! the table, by a [`PrimalityTest`] strategy chosen when the [`Scanner`] is
//! built.

pub mod audit;
pub mod check;
pub mod error;
pub mod nearby;
pub mod primality;
pub mod range;
pub mod residue;
pub mod scan;
pub mod sieve;

use std::str::FromStr;

use num_bigint::BigInt;

pub use audit::{audit_filter, FilterAudit};
pub use check::{check, CheckReport, Stage, Verdict};
pub use error::{PrimeError, Result};
pub use nearby::{nearby_primes, next_prime, prev_prime};
pub use primality::{
    random_prime, random_with_digits, Adaptive, MillerRabin, PrimalityTest, TrialDivision,
};
pub use range::Range;
pub use residue::{Classification, Residue, ResidueFilter, DART69_MODULUS};
pub use scan::{ScanOutcome, ScanStats, Scanner};
pub use sieve::Sieve;

/// Largest sieve table [`scan_range`] builds before relying on the strategy alone.
pub const DEFAULT_TABLE_LIMIT: u64 = 10_000_000;

/// Build a sieve table over `[0, n]`. Fails with `OutOfRange` for negative `n`.
pub fn build_sieve(n: i64) -> Result<Sieve> {
    let bound = u64::try_from(n)
        .map_err(|_| PrimeError::OutOfRange(format!("sieve bound {} is negative", n)))?;
    Sieve::new(bound)
}

/// Primality of an arbitrary integer using the [`Adaptive`] strategy.
///
/// Fails with `InvalidInput` for negative `x`; 0 and 1 are simply not prime.
pub fn is_prime(x: &BigInt) -> Result<bool> {
    let n = x.to_biguint().ok_or_else(|| {
        PrimeError::InvalidInput(format!("{} is negative; expected a non-negative integer", x))
    })?;
    Ok(Adaptive::default().is_prime(&n))
}

/// Every prime in `[low, high]` that `filter` admits, ascending.
///
/// Integers up to `min(high, DEFAULT_TABLE_LIMIT)` are answered from a sieve
/// table; the rest go through the [`Adaptive`] strategy.
pub fn scan_range(low: u64, high: u64, filter: &ResidueFilter) -> Result<Vec<u64>> {
    let range = Range::new(low, high)?;
    Ok(range_scanner(&range)?.scan(&range, filter))
}

/// Scanner for `range`, with a table only when the range starts inside it.
fn range_scanner(range: &Range) -> Result<Scanner<Adaptive>> {
    let scanner = Scanner::new(Adaptive::default());
    if range.low() > DEFAULT_TABLE_LIMIT {
        return Ok(scanner);
    }
    Ok(scanner.with_sieve(Sieve::new(range.high().min(DEFAULT_TABLE_LIMIT))?))
}

/// Parse a decimal integer, rejecting anything else with `InvalidInput`.
///
/// Surrounding whitespace, a leading sign and `_` digit separators are accepted.
pub fn parse_integer(text: &str) -> Result<BigInt> {
    let cleaned: String = text.trim().chars().filter(|&c| c != '_').collect();
    let digits = cleaned.strip_prefix(&['+', '-'][..]).unwrap_or(cleaned.as_str());
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PrimeError::InvalidInput(format!(
            "'{}' is not an integer",
            text.trim()
        )));
    }
    BigInt::from_str(&cleaned)
        .map_err(|e| PrimeError::InvalidInput(format!("'{}' is not an integer: {}", text.trim(), e)))
}

/// Parse a decimal integer that must be non-negative.
pub fn parse_natural(text: &str) -> Result<num_bigint::BigUint> {
    let value = parse_integer(text)?;
    value.to_biguint().ok_or_else(|| {
        PrimeError::InvalidInput(format!("{} is negative; expected a non-negative integer", value))
    })
}
