//! Command-line driver for residue-filtered prime scans.
//!
//! Wraps `prime-core` with argument parsing, a JSON configuration file,
//! JSON reports and plain-text prime output.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod report;

pub use cli::{CliConfig, Mode};
pub use config::{FilterConfig, ScanConfig, Strategy};
pub use error::{Dart69Error, Result};
