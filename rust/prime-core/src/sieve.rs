//! Bit-packed sieve of Eratosthenes over `[0, n]`.
//!
//! The table is built once and is read-only afterwards, so a `&Sieve` may be
//! shared freely between readers that partition a scan among themselves.

use crate::error::{PrimeError, Result};
use crate::range::Range;

const WORD_BITS: u64 = 64;

/// Largest bound a table may be built for (8 GiB of flags).
pub const MAX_SIEVE_BOUND: u64 = 1 << 36;

/// Primality flags for every integer in `[0, bound]`.
#[derive(Debug, Clone)]
pub struct Sieve {
    bound: u64,
    words: Vec<u64>,
}

impl Sieve {
    /// Build the table for `[0, bound]`.
    ///
    /// Marks 0 and 1 composite, then for each `i` in `2..=⌊√bound⌋` still
    /// marked prime clears every multiple from `i²` up to `bound`.
    pub fn new(bound: u64) -> Result<Self> {
        if bound > MAX_SIEVE_BOUND {
            return Err(PrimeError::OutOfRange(format!(
                "sieve bound {} exceeds the largest supported table ({})",
                bound, MAX_SIEVE_BOUND
            )));
        }
        let num_words = usize::try_from(bound / WORD_BITS + 1).map_err(|_| {
            PrimeError::OutOfRange(format!("sieve bound {} is not addressable", bound))
        })?;
        log::debug!("building sieve up to {} ({} words)", bound, num_words);

        let mut sieve = Sieve {
            bound,
            words: vec![u64::MAX; num_words],
        };

        // Flags past `bound` in the last word must never read as prime.
        let used = bound % WORD_BITS + 1;
        if used < WORD_BITS {
            sieve.words[num_words - 1] &= (1u64 << used) - 1;
        }

        sieve.clear(0);
        if bound >= 1 {
            sieve.clear(1);
        }

        let mut i = 2u64;
        while i <= bound / i {
            if sieve.get(i) {
                let mut j = i * i;
                while j <= bound {
                    sieve.clear(j);
                    j = match j.checked_add(i) {
                        Some(next) => next,
                        None => break,
                    };
                }
            }
            i += 1;
        }

        Ok(sieve)
    }

    /// Largest integer covered by the table.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Whether `k` is prime. Fails with `OutOfRange` for `k > bound`.
    pub fn is_prime(&self, k: u64) -> Result<bool> {
        if k > self.bound {
            return Err(PrimeError::OutOfRange(format!(
                "{} is beyond the sieve bound {}",
                k, self.bound
            )));
        }
        Ok(self.get(k))
    }

    /// Whether `k` lies inside the table.
    pub fn covers(&self, k: u64) -> bool {
        k <= self.bound
    }

    /// All primes in the table, ascending.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let base = w as u64 * WORD_BITS;
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let offset = bits.trailing_zeros() as u64;
                bits &= bits - 1;
                Some(base + offset)
            })
        })
    }

    /// Primes inside `range`, ascending. The range must lie within the table.
    pub fn primes_in(&self, range: &Range) -> Result<impl Iterator<Item = u64> + '_> {
        if range.high() > self.bound {
            return Err(PrimeError::OutOfRange(format!(
                "range {} extends beyond the sieve bound {}",
                range, self.bound
            )));
        }
        Ok(range.iter().filter(move |&k| self.get(k)))
    }

    /// Number of primes in `[0, bound]`.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    fn get(&self, k: u64) -> bool {
        (self.words[(k / WORD_BITS) as usize] >> (k % WORD_BITS)) & 1 == 1
    }

    #[inline]
    fn clear(&mut self, k: u64) {
        self.words[(k / WORD_BITS) as usize] &= !(1u64 << (k % WORD_BITS));
    }
}
