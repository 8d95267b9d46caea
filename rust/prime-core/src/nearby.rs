//! Searching for primes around a given number.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::primality::PrimalityTest;
use crate::residue::ResidueFilter;

/// Primes examined per requested result before [`nearby_primes`] gives up.
pub const NEARBY_SEARCH_FACTOR: usize = 1000;

/// Smallest prime strictly greater than `n`.
pub fn next_prime<T: PrimalityTest + ?Sized>(n: &BigUint, test: &T) -> BigUint {
    let two = BigUint::from(2u32);
    if *n < two {
        return two;
    }
    let mut candidate = n + 1u32;
    if candidate == BigUint::from(3u32) {
        return candidate;
    }
    if (&candidate % &two).is_zero() {
        candidate += 1u32;
    }
    while !test.is_prime(&candidate) {
        candidate += 2u32;
    }
    candidate
}

/// Largest prime strictly less than `n`, or `None` when `n <= 2`.
pub fn prev_prime<T: PrimalityTest + ?Sized>(n: &BigUint, test: &T) -> Option<BigUint> {
    let three = BigUint::from(3u32);
    if *n <= BigUint::from(2u32) {
        return None;
    }
    if *n == three {
        return Some(BigUint::from(2u32));
    }
    let mut candidate = n - 1u32;
    if (&candidate % 2u32).is_zero() {
        candidate -= 1u32;
    }
    while candidate >= three {
        if test.is_prime(&candidate) {
            return Some(candidate);
        }
        candidate -= 2u32;
    }
    Some(BigUint::from(2u32))
}

/// The first `count` primes `>= n` that `filter` admits, ascending.
///
/// Gives up after examining `count * NEARBY_SEARCH_FACTOR` primes, so a filter
/// that rejects nearly everything returns fewer than `count` results.
pub fn nearby_primes<T: PrimalityTest + ?Sized>(
    n: &BigUint,
    count: usize,
    filter: &ResidueFilter,
    test: &T,
) -> Vec<BigUint> {
    let mut found = Vec::with_capacity(count);
    if count == 0 {
        return found;
    }
    let max_examined = count.saturating_mul(NEARBY_SEARCH_FACTOR);

    let mut current = if test.is_prime(n) {
        n.clone()
    } else {
        next_prime(n, test)
    };
    let mut examined = 0usize;
    while found.len() < count && examined < max_examined {
        examined += 1;
        if filter.admits(&current) {
            found.push(current.clone());
        }
        current = next_prime(&current, test);
    }

    if found.len() < count {
        log::warn!(
            "nearby search from {} stopped after {} primes with {}/{} results",
            n,
            examined,
            found.len(),
            count
        );
    }
    found
}

/// Distance from `n` to `p`, signed by direction (`+` above, `-` below).
pub fn signed_distance(n: &BigUint, p: &BigUint) -> (bool, BigUint) {
    if p >= n {
        (true, p - n)
    } else {
        (false, n - p)
    }
}
