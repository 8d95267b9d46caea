//! Error type shared by every prime-core operation.

/// Errors reported by sieve construction, queries, filters and scans.
#[derive(Debug, thiserror::Error)]
pub enum PrimeError {
    /// Input that is not a non-negative integer where one is required.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A query or construction outside the bounds a sieve table supports.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// A residue filter whose configuration violates `forbidden ⊆ [0, modulus)`.
    #[error("invalid residue filter: {0}")]
    InvalidFilter(String),
}

pub type Result<T> = std::result::Result<T, PrimeError>;
