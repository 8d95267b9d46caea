//! Scan configuration, loadable from a JSON file and overridable from the
//! command line.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use prime_core::{
    Adaptive, MillerRabin, PrimalityTest, Range, ResidueFilter, Scanner, Sieve, TrialDivision,
    DART69_MODULUS,
};

use crate::error::{Dart69Error, Result};

/// Which residue filter to build.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FilterConfig {
    /// Modulus 69, forbidding multiples of 3 and 23.
    #[default]
    Dart69,
    /// Forbid nothing.
    #[serde(rename = "none")]
    Permissive { modulus: u64 },
    /// Forbid every residue divisible by one of `factors`.
    Multiples { modulus: u64, factors: Vec<u64> },
    /// Forbid exactly the listed residues.
    Custom { modulus: u64, forbidden: Vec<u64> },
}

impl FilterConfig {
    pub fn modulus(&self) -> u64 {
        match self {
            FilterConfig::Dart69 => DART69_MODULUS,
            FilterConfig::Permissive { modulus }
            | FilterConfig::Multiples { modulus, .. }
            | FilterConfig::Custom { modulus, .. } => *modulus,
        }
    }

    /// Validate and build the filter.
    pub fn build(&self) -> Result<ResidueFilter> {
        let filter = match self {
            FilterConfig::Dart69 => ResidueFilter::dart69(),
            FilterConfig::Permissive { modulus } => ResidueFilter::permissive(*modulus)?,
            FilterConfig::Multiples { modulus, factors } => {
                ResidueFilter::excluding_multiples(*modulus, factors)?
            }
            FilterConfig::Custom { modulus, forbidden } => {
                ResidueFilter::new(*modulus, forbidden.iter().copied())?
            }
        };
        Ok(filter)
    }
}

/// Primality strategy used past the sieve table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[serde(rename = "trial")]
    TrialDivision,
    MillerRabin,
    #[default]
    Adaptive,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::TrialDivision => write!(f, "trial"),
            Strategy::MillerRabin => write!(f, "miller-rabin"),
            Strategy::Adaptive => write!(f, "adaptive"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Dart69Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "trial" | "trial-division" => Ok(Strategy::TrialDivision),
            "miller-rabin" | "mr" => Ok(Strategy::MillerRabin),
            "adaptive" => Ok(Strategy::Adaptive),
            other => Err(Dart69Error::Usage(format!(
                "Unknown strategy: {}. Use trial|miller-rabin|adaptive",
                other
            ))),
        }
    }
}

/// Everything a scan needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub low: u64,
    pub high: u64,
    pub filter: FilterConfig,
    /// Integers admitted even when the filter forbids their residue, e.g. `[3, 23]`.
    pub exceptions: Vec<u64>,
    pub strategy: Strategy,
    /// Miller-Rabin rounds for inputs beyond `u64`.
    pub rounds: u32,
    /// Largest value the adaptive strategy settles by trial division.
    pub trial_limit: u64,
    /// Largest sieve table built for a scan.
    pub sieve_limit: u64,
    /// Primes per line in saved output.
    pub per_line: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let adaptive = Adaptive::default();
        ScanConfig {
            low: 0,
            high: 10_000,
            filter: FilterConfig::default(),
            exceptions: Vec::new(),
            strategy: Strategy::default(),
            rounds: adaptive.rounds,
            trial_limit: adaptive.trial_limit,
            sieve_limit: prime_core::DEFAULT_TABLE_LIMIT,
            per_line: 1,
        }
    }
}

impl ScanConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: ScanConfig = serde_json::from_str(&contents)?;
        log::info!("loaded scan configuration from {}", path.display());
        Ok(config)
    }

    pub fn range(&self) -> Result<Range> {
        Ok(Range::new(self.low, self.high)?)
    }

    /// The configured filter with its exceptions.
    pub fn residue_filter(&self) -> Result<ResidueFilter> {
        Ok(self
            .filter
            .build()?
            .with_exceptions(self.exceptions.iter().copied()))
    }

    /// The configured primality strategy.
    pub fn primality_test(&self) -> Box<dyn PrimalityTest> {
        match self.strategy {
            Strategy::TrialDivision => Box::new(TrialDivision),
            Strategy::MillerRabin => Box::new(MillerRabin {
                rounds: self.rounds,
            }),
            Strategy::Adaptive => Box::new(Adaptive {
                trial_limit: self.trial_limit,
                rounds: self.rounds,
            }),
        }
    }

    /// Scanner with a sieve table over `[0, min(high, sieve_limit)]`.
    pub fn scanner(&self) -> Result<Scanner<Box<dyn PrimalityTest>>> {
        let sieve = Sieve::new(self.high.min(self.sieve_limit))?;
        Ok(Scanner::new(self.primality_test()).with_sieve(sieve))
    }
}
