//! Command-line parsing.
//!
//! Modes:
//!   --mode=scan   --low=0 --high=10000     Primes in a range passing the filter (default)
//!   --mode=check  --n=<integer>            Staged check of one number
//!   --mode=nearby --n=<integer> --count=5  Filtered primes at or above a number
//!   --mode=audit  --low=1000 --high=10000  Filter elimination / capture rates
//!   --mode=random --digits=20              Staged check of a random number
//!   --mode=sieve  --high=1000000           Prime count of a sieve table
//!
//! Options:
//!   --filter=dart69|none|<r1,r2,..>  Residue filter (default: dart69)
//!   --modulus=<N>                    Modulus for `none` or a residue list (default: 69)
//!   --exceptions=<n1,n2,..>          Integers admitted despite a forbidden residue, e.g. 3,23
//!   --strategy=trial|miller-rabin|adaptive
//!   --rounds=<N>                     Miller-Rabin rounds past u64 (default: 20)
//!   --trial-limit=<N>                Adaptive trial-division ceiling
//!   --sieve-limit=<N>                Largest sieve table built for a scan
//!   --wheel                          Scan by stepping allowed residue classes
//!   --save=<path>                    Write scan results, one group per line
//!   --per-line=<N>                   Primes per line in saved output (default: 1)
//!   --config=<file.json>             Load a ScanConfig; flags override it
//!   --quiet                          Omit the prime preview from the report

use std::path::PathBuf;
use std::str::FromStr;

use prime_core::DART69_MODULUS;

use crate::config::{FilterConfig, ScanConfig, Strategy};
use crate::error::{Dart69Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Scan,
    Check,
    Nearby,
    Audit,
    Random,
    Sieve,
}

impl FromStr for Mode {
    type Err = Dart69Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "scan" => Ok(Mode::Scan),
            "check" => Ok(Mode::Check),
            "nearby" => Ok(Mode::Nearby),
            "audit" => Ok(Mode::Audit),
            "random" => Ok(Mode::Random),
            "sieve" => Ok(Mode::Sieve),
            other => Err(Dart69Error::Usage(format!(
                "Unknown mode: {}. Use --mode=scan|check|nearby|audit|random|sieve",
                other
            ))),
        }
    }
}

/// CLI configuration parsed from command-line arguments.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub mode: Mode,
    pub scan: ScanConfig,
    /// Number for `check` and `nearby`, kept as text until parsed as a big integer.
    pub n: Option<String>,
    pub count: usize,
    pub digits: u32,
    pub wheel: bool,
    pub save: Option<PathBuf>,
    pub quiet: bool,
}

impl CliConfig {
    /// Parse arguments (without the program name).
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();

        let scan = match args.iter().find_map(|a| value(a, "--config")) {
            Some(path) => ScanConfig::from_json_file(path)?,
            None => ScanConfig::default(),
        };

        let mut config = CliConfig {
            mode: Mode::Scan,
            scan,
            n: None,
            count: 5,
            digits: 20,
            wheel: false,
            save: None,
            quiet: false,
        };
        let mut filter_arg: Option<&str> = None;
        let mut modulus_arg: Option<u64> = None;

        for &arg in &args {
            if let Some(v) = value(arg, "--mode") {
                config.mode = v.parse()?;
            } else if let Some(v) = value(arg, "--low") {
                config.scan.low = number(v, "--low")?;
            } else if let Some(v) = value(arg, "--high") {
                config.scan.high = number(v, "--high")?;
            } else if let Some(v) = value(arg, "--n") {
                config.n = Some(v.to_string());
            } else if let Some(v) = value(arg, "--count") {
                config.count = number(v, "--count")?;
            } else if let Some(v) = value(arg, "--digits") {
                config.digits = number(v, "--digits")?;
            } else if let Some(v) = value(arg, "--filter") {
                filter_arg = Some(v);
            } else if let Some(v) = value(arg, "--modulus") {
                modulus_arg = Some(number(v, "--modulus")?);
            } else if let Some(v) = value(arg, "--exceptions") {
                config.scan.exceptions = number_list(v, "--exceptions")?;
            } else if let Some(v) = value(arg, "--strategy") {
                config.scan.strategy = v.parse::<Strategy>()?;
            } else if let Some(v) = value(arg, "--rounds") {
                config.scan.rounds = number(v, "--rounds")?;
            } else if let Some(v) = value(arg, "--trial-limit") {
                config.scan.trial_limit = number(v, "--trial-limit")?;
            } else if let Some(v) = value(arg, "--sieve-limit") {
                config.scan.sieve_limit = number(v, "--sieve-limit")?;
            } else if let Some(v) = value(arg, "--save") {
                config.save = Some(PathBuf::from(v));
            } else if let Some(v) = value(arg, "--per-line") {
                config.scan.per_line = number(v, "--per-line")?;
            } else if arg == "--wheel" {
                config.wheel = true;
            } else if arg == "--quiet" || arg == "-q" {
                config.quiet = true;
            } else if value(arg, "--config").is_none() {
                return Err(Dart69Error::Usage(format!("Unknown argument: {}", arg)));
            }
        }

        if filter_arg.is_some() || modulus_arg.is_some() {
            config.scan.filter = resolve_filter(filter_arg, modulus_arg, &config.scan.filter)?;
        }

        if matches!(config.mode, Mode::Check | Mode::Nearby) && config.n.is_none() {
            return Err(Dart69Error::Usage(
                "--n=<integer> is required for check and nearby".to_string(),
            ));
        }
        if config.mode == Mode::Random && config.digits == 0 {
            return Err(Dart69Error::Usage("--digits must be at least 1".to_string()));
        }

        Ok(config)
    }
}

/// The value of `--key=value`, if `arg` is that flag.
fn value<'a>(arg: &'a str, key: &str) -> Option<&'a str> {
    arg.strip_prefix(key)?.strip_prefix('=')
}

fn number<T: FromStr>(text: &str, flag: &str) -> Result<T> {
    text.replace('_', "")
        .parse::<T>()
        .map_err(|_| Dart69Error::Usage(format!("{} expects a non-negative integer, got '{}'", flag, text)))
}

fn number_list(text: &str, flag: &str) -> Result<Vec<u64>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| number::<u64>(s, flag))
        .collect()
}

fn resolve_filter(
    filter_arg: Option<&str>,
    modulus_arg: Option<u64>,
    current: &FilterConfig,
) -> Result<FilterConfig> {
    let dart69 = match filter_arg {
        Some(kind) => kind == "dart69",
        None => *current == FilterConfig::Dart69,
    };
    if dart69 && modulus_arg.map_or(false, |m| m != DART69_MODULUS) {
        return Err(Dart69Error::Usage(
            "--modulus needs --filter=none|<residues>; the dart69 filter is fixed at 69"
                .to_string(),
        ));
    }

    let modulus = modulus_arg.unwrap_or_else(|| current.modulus());
    let filter = match filter_arg {
        Some("dart69") => FilterConfig::Dart69,
        Some("none") => FilterConfig::Permissive { modulus },
        Some(list) => FilterConfig::Custom {
            modulus,
            forbidden: number_list(list, "--filter")?,
        },
        // Only the modulus changed: keep the filter kind.
        None => match current {
            FilterConfig::Dart69 => FilterConfig::Dart69,
            FilterConfig::Permissive { .. } => FilterConfig::Permissive { modulus },
            FilterConfig::Multiples { factors, .. } => FilterConfig::Multiples {
                modulus,
                factors: factors.clone(),
            },
            FilterConfig::Custom { forbidden, .. } => FilterConfig::Custom {
                modulus,
                forbidden: forbidden.clone(),
            },
        },
    };
    // Validate before any work starts.
    filter.build()?;
    Ok(filter)
}
