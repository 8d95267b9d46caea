//! Plain-text prime output: decimal integers, `per_line` per line, in scan order.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Write `primes` as space-separated groups of `per_line` (at least 1).
pub fn write_primes<W: Write, P: Display>(
    writer: &mut W,
    primes: &[P],
    per_line: usize,
) -> std::io::Result<()> {
    for group in primes.chunks(per_line.max(1)) {
        let line = group
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

/// Write `primes` to `path`, creating parent directories. Returns the number written.
pub fn save_primes<P: Display>(path: &Path, primes: &[P], per_line: usize) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write_primes(&mut writer, primes, per_line)?;
    writer.flush()?;
    log::info!("saved {} primes to {}", primes.len(), path.display());
    Ok(primes.len())
}
