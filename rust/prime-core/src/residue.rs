//! Residue-class pre-filter applied before the expensive primality test.
//!
//! A [`ResidueFilter`] is a modulus plus a set of forbidden remainders. It
//! holds no state between calls; [`ResidueFilter::classify`] is a pure
//! predicate over any integer type implementing [`Residue`].
//!
//! A filter may also carry exceptions: individual integers admitted even
//! though their residue is forbidden. The 69-wheel uses them for 3 and 23,
//! the two primes that sit in forbidden positions.

use std::collections::BTreeSet;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::ToPrimitive;
use serde::Serialize;

use crate::error::{PrimeError, Result};

/// Modulus of the 69-position wheel (3 × 23).
pub const DART69_MODULUS: u64 = 69;

/// Prime factors of [`DART69_MODULUS`] whose multiples form the forbidden zones.
pub const DART69_FACTORS: [u64; 2] = [3, 23];

/// Largest modulus [`ResidueFilter::excluding_multiples`] will enumerate.
pub const MAX_ENUMERATED_MODULUS: u64 = 1 << 24;

/// Non-negative remainder of an integer modulo a positive `u64`.
pub trait Residue {
    fn residue(&self, modulus: u64) -> u64;

    /// The integer itself, when it is a non-negative value that fits in a `u64`.
    fn exact_u64(&self) -> Option<u64>;
}

impl Residue for u64 {
    fn residue(&self, modulus: u64) -> u64 {
        self % modulus
    }

    fn exact_u64(&self) -> Option<u64> {
        Some(*self)
    }
}

impl Residue for u32 {
    fn residue(&self, modulus: u64) -> u64 {
        u64::from(*self) % modulus
    }

    fn exact_u64(&self) -> Option<u64> {
        Some(u64::from(*self))
    }
}

impl Residue for i64 {
    fn residue(&self, modulus: u64) -> u64 {
        (i128::from(*self)).rem_euclid(i128::from(modulus)) as u64
    }

    fn exact_u64(&self) -> Option<u64> {
        u64::try_from(*self).ok()
    }
}

impl Residue for i32 {
    fn residue(&self, modulus: u64) -> u64 {
        i64::from(*self).residue(modulus)
    }

    fn exact_u64(&self) -> Option<u64> {
        u64::try_from(*self).ok()
    }
}

impl Residue for BigUint {
    fn residue(&self, modulus: u64) -> u64 {
        (self % modulus).to_u64_digits().first().copied().unwrap_or(0)
    }

    fn exact_u64(&self) -> Option<u64> {
        self.to_u64()
    }
}

impl Residue for BigInt {
    fn residue(&self, modulus: u64) -> u64 {
        // mod_floor with a positive modulus is never negative.
        let (_, digits) = self.mod_floor(&BigInt::from(modulus)).to_u64_digits();
        digits.first().copied().unwrap_or(0)
    }

    fn exact_u64(&self) -> Option<u64> {
        self.to_u64()
    }
}

/// Outcome of running an integer through a [`ResidueFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    Candidate,
    /// Rejected because its residue is forbidden.
    Excluded(u64),
}

impl Classification {
    pub fn is_candidate(&self) -> bool {
        matches!(self, Classification::Candidate)
    }
}

/// A modulus and the residues it forbids. Invariant: every forbidden value is
/// in `[0, modulus)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResidueFilter {
    modulus: u64,
    forbidden: BTreeSet<u64>,
    /// Integers admitted regardless of their residue.
    exceptions: BTreeSet<u64>,
}

impl ResidueFilter {
    /// Validate and build a filter. Fails with `InvalidFilter` for a zero
    /// modulus or a forbidden value outside `[0, modulus)`.
    pub fn new(modulus: u64, forbidden: impl IntoIterator<Item = u64>) -> Result<Self> {
        if modulus == 0 {
            return Err(PrimeError::InvalidFilter(
                "modulus must be positive".to_string(),
            ));
        }
        let forbidden: BTreeSet<u64> = forbidden.into_iter().collect();
        if let Some(&bad) = forbidden.iter().find(|&&r| r >= modulus) {
            return Err(PrimeError::InvalidFilter(format!(
                "forbidden residue {} is outside [0, {})",
                bad, modulus
            )));
        }
        Ok(ResidueFilter {
            modulus,
            forbidden,
            exceptions: BTreeSet::new(),
        })
    }

    /// A filter that forbids nothing: every integer is a candidate.
    pub fn permissive(modulus: u64) -> Result<Self> {
        Self::new(modulus, std::iter::empty())
    }

    /// Forbid every residue divisible by one of `factors`.
    ///
    /// Zero factors are ignored. Residue 0 is forbidden whenever any factor
    /// is given. The residues are enumerated, so the modulus is capped at
    /// [`MAX_ENUMERATED_MODULUS`].
    pub fn excluding_multiples(modulus: u64, factors: &[u64]) -> Result<Self> {
        if modulus > MAX_ENUMERATED_MODULUS {
            return Err(PrimeError::InvalidFilter(format!(
                "modulus {} is too large to enumerate its multiples (max {})",
                modulus, MAX_ENUMERATED_MODULUS
            )));
        }
        let factors: Vec<u64> = factors.iter().copied().filter(|&f| f != 0).collect();
        Self::new(
            modulus,
            (0..modulus).filter(|r| factors.iter().any(|f| r % f == 0)),
        )
    }

    /// The 69-wheel: forbid positions that are multiples of 3 or 23.
    pub fn dart69() -> Self {
        let forbidden = (0..DART69_MODULUS)
            .filter(|r| DART69_FACTORS.iter().any(|f| r % f == 0))
            .collect();
        ResidueFilter {
            modulus: DART69_MODULUS,
            forbidden,
            exceptions: BTreeSet::new(),
        }
    }

    /// Admit `exceptions` even when their residue is forbidden.
    pub fn with_exceptions(mut self, exceptions: impl IntoIterator<Item = u64>) -> Self {
        self.exceptions.extend(exceptions);
        self
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Forbidden residues, ascending.
    pub fn forbidden(&self) -> impl Iterator<Item = u64> + '_ {
        self.forbidden.iter().copied()
    }

    pub fn forbidden_count(&self) -> usize {
        self.forbidden.len()
    }

    pub fn is_forbidden(&self, residue: u64) -> bool {
        self.forbidden.contains(&residue)
    }

    /// Integers admitted regardless of residue, ascending.
    pub fn exceptions(&self) -> impl Iterator<Item = u64> + '_ {
        self.exceptions.iter().copied()
    }

    /// Number of residues in `[0, modulus)` that are not forbidden.
    pub fn allowed_count(&self) -> u64 {
        self.modulus - self.forbidden.len() as u64
    }

    /// Residues in `[0, modulus)` that are not forbidden, ascending. Lazy, so
    /// a huge modulus costs nothing until iterated.
    pub fn allowed(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.modulus).filter(move |r| !self.is_forbidden(*r))
    }

    /// [`allowed`](Self::allowed), collected.
    pub fn allowed_residues(&self) -> Vec<u64> {
        self.allowed().collect()
    }

    /// `n mod modulus`, always in `[0, modulus)`.
    pub fn residue<N: Residue + ?Sized>(&self, n: &N) -> u64 {
        n.residue(self.modulus)
    }

    /// `Excluded(r)` iff `r = n mod modulus` is forbidden, else `Candidate`.
    pub fn classify<N: Residue + ?Sized>(&self, n: &N) -> Classification {
        let r = self.residue(n);
        if self.is_forbidden(r) {
            Classification::Excluded(r)
        } else {
            Classification::Candidate
        }
    }

    /// Whether `n` gets past the filter: an allowed residue or a listed exception.
    pub fn admits<N: Residue + ?Sized>(&self, n: &N) -> bool {
        self.classify(n).is_candidate()
            || (!self.exceptions.is_empty()
                && n.exact_u64().map_or(false, |v| self.exceptions.contains(&v)))
    }
}
