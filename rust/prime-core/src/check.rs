//! Staged single-number check: cheap rejections first, full test last.

use std::fmt;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::Serialize;

use crate::primality::PrimalityTest;
use crate::residue::{Classification, ResidueFilter};

/// Last decimal digits that force a factor of 2 or 5.
const COMPOSITE_LAST_DIGITS: [u64; 6] = [0, 2, 4, 5, 6, 8];

/// The stage that settled a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    SmallCase,
    LastDigit,
    Residue,
    Primality,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::SmallCase => write!(f, "small case"),
            Stage::LastDigit => write!(f, "last digit"),
            Stage::Residue => write!(f, "residue filter"),
            Stage::Primality => write!(f, "primality test"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Prime,
    /// Passed a probabilistic test only.
    ProbablePrime,
    NotPrime,
    /// Filtered out by a forbidden residue before any primality test ran.
    Rejected(u64),
}

impl Verdict {
    /// Whether the number was accepted as (probably) prime.
    pub fn is_prime(&self) -> bool {
        matches!(self, Verdict::Prime | Verdict::ProbablePrime)
    }
}

/// Full record of one staged check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Decimal form of the checked number.
    pub n: String,
    pub digits: usize,
    pub residue: u64,
    pub modulus: u64,
    pub last_digit: u64,
    pub stage: Stage,
    pub verdict: Verdict,
    pub strategy: &'static str,
}

/// Run `n` through the small-case, last-digit, residue and primality stages,
/// stopping at the first stage that decides. Exceptions of `filter` skip the
/// residue stage.
pub fn check<T: PrimalityTest + ?Sized>(
    n: &BigUint,
    filter: &ResidueFilter,
    test: &T,
) -> CheckReport {
    let decimal = n.to_string();
    let residue = filter.residue(n);
    let last_digit = (n % 10u32).to_u64().unwrap_or(0);

    let (stage, verdict) = decide(n, last_digit, filter, test);
    log::debug!("check {}: {:?} at {}", decimal, verdict, stage);

    CheckReport {
        digits: decimal.len(),
        n: decimal,
        residue,
        modulus: filter.modulus(),
        last_digit,
        stage,
        verdict,
        strategy: test.name(),
    }
}

fn decide<T: PrimalityTest + ?Sized>(
    n: &BigUint,
    last_digit: u64,
    filter: &ResidueFilter,
    test: &T,
) -> (Stage, Verdict) {
    match n.to_u64() {
        Some(small) if small < 2 => return (Stage::SmallCase, Verdict::NotPrime),
        Some(2 | 3 | 5) => return (Stage::SmallCase, Verdict::Prime),
        _ => {}
    }

    if COMPOSITE_LAST_DIGITS.contains(&last_digit) {
        return (Stage::LastDigit, Verdict::NotPrime);
    }

    if let Classification::Excluded(r) = filter.classify(n) {
        if !filter.admits(n) {
            return (Stage::Residue, Verdict::Rejected(r));
        }
    }

    let verdict = if !test.is_prime(n) {
        Verdict::NotPrime
    } else if test.is_exact_for(n) {
        Verdict::Prime
    } else {
        Verdict::ProbablePrime
    };
    (Stage::Primality, verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primality::{MillerRabin, TrialDivision};
    use num_traits::One;

    fn run(n: u64, filter: &ResidueFilter) -> CheckReport {
        check(&BigUint::from(n), filter, &TrialDivision)
    }

    #[test]
    fn test_small_cases() {
        let filter = ResidueFilter::dart69();
        assert_eq!(run(0, &filter).verdict, Verdict::NotPrime);
        assert_eq!(run(1, &filter).stage, Stage::SmallCase);
        for p in [2u64, 3, 5] {
            let report = run(p, &filter);
            assert_eq!(report.stage, Stage::SmallCase);
            assert_eq!(report.verdict, Verdict::Prime);
        }
    }

    #[test]
    fn test_last_digit_stage() {
        let filter = ResidueFilter::permissive(69).unwrap();
        for n in [10u64, 12, 14, 15, 1_006, 98] {
            let report = run(n, &filter);
            assert_eq!(report.stage, Stage::LastDigit, "n = {}", n);
            assert_eq!(report.verdict, Verdict::NotPrime);
        }
    }

    #[test]
    fn test_residue_stage_rejects_forbidden_positions() {
        let filter = ResidueFilter::dart69();
        // 51 = 3 * 17 sits at position 51 (multiple of 3).
        let report = run(51, &filter);
        assert_eq!(report.stage, Stage::Residue);
        assert_eq!(report.verdict, Verdict::Rejected(51));
        assert_eq!(report.residue, 51);

        // 23 is prime but its position is forbidden on the wheel.
        assert_eq!(run(23, &filter).verdict, Verdict::Rejected(23));
    }

    #[test]
    fn test_exceptions_reach_primality_stage() {
        let filter = ResidueFilter::dart69().with_exceptions([3, 23]);
        let report = run(23, &filter);
        assert_eq!(report.stage, Stage::Primality);
        assert_eq!(report.verdict, Verdict::Prime);
        assert_eq!(report.residue, 23);
        assert!(run(3, &filter).verdict.is_prime());

        // 161 = 7 * 23 shares 23's position but is not listed.
        assert_eq!(run(161, &filter).verdict, Verdict::Rejected(23));

        let composite_exception = ResidueFilter::dart69().with_exceptions([51]);
        assert_eq!(run(51, &composite_exception).verdict, Verdict::NotPrime);
    }

    #[test]
    fn test_primality_stage() {
        let filter = ResidueFilter::dart69();
        let prime = run(97, &filter);
        assert_eq!(prime.stage, Stage::Primality);
        assert_eq!(prime.verdict, Verdict::Prime);
        assert_eq!(prime.digits, 2);
        assert_eq!(prime.last_digit, 7);

        // 77 = 7 * 11 passes the cheap stages (position 8).
        let composite = run(77, &filter);
        assert_eq!(composite.stage, Stage::Primality);
        assert_eq!(composite.verdict, Verdict::NotPrime);
    }

    #[test]
    fn test_large_number_is_probable_prime() {
        // 2^127 - 1 ends in 7 and sits at an allowed position.
        let m127 = (BigUint::one() << 127u32) - 1u32;
        let filter = ResidueFilter::permissive(69).unwrap();
        let report = check(&m127, &filter, &MillerRabin::default());
        assert_eq!(report.verdict, Verdict::ProbablePrime);
        assert!(report.verdict.is_prime());
        assert_eq!(report.digits, 39);
        assert_eq!(report.strategy, "miller-rabin");
    }
}
