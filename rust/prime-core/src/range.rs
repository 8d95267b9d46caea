//! Inclusive integer ranges scanned by the pipeline.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::{PrimeError, Result};

/// An inclusive range `[low, high]` with `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    low: u64,
    high: u64,
}

impl Range {
    pub fn new(low: u64, high: u64) -> Result<Self> {
        if low > high {
            return Err(PrimeError::InvalidInput(format!(
                "range low {} exceeds high {}",
                low, high
            )));
        }
        Ok(Range { low, high })
    }

    /// The range `[0, high]`, the shape a sieve table covers.
    pub fn up_to(high: u64) -> Self {
        Range { low: 0, high }
    }

    pub fn low(&self) -> u64 {
        self.low
    }

    pub fn high(&self) -> u64 {
        self.high
    }

    /// Number of integers in the range. Saturates at `u64::MAX` for `[0, u64::MAX]`.
    pub fn size(&self) -> u64 {
        (self.high - self.low).saturating_add(1)
    }

    pub fn contains(&self, n: u64) -> bool {
        self.low <= n && n <= self.high
    }

    /// Ascending iterator over every integer in the range.
    pub fn iter(&self) -> RangeInclusive<u64> {
        self.low..=self.high
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(matches!(Range::new(10, 9), Err(PrimeError::InvalidInput(_))));
        assert!(Range::new(9, 9).is_ok());
    }

    #[test]
    fn test_range_size_and_contains() {
        let r = Range::new(5, 14).unwrap();
        assert_eq!(r.size(), 10);
        assert!(r.contains(5) && r.contains(14));
        assert!(!r.contains(4) && !r.contains(15));
        assert_eq!(r.iter().count(), 10);
        assert_eq!(Range::up_to(u64::MAX).size(), u64::MAX);
    }
}
