//! Append-only stop log files.
//!
//! Two files per permutation under a log directory: a one-line-per-stop
//! summary and a verbose register dump for auditing each accepted stop.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use super::BombeStop;

/// File sinks for one bombe run's stop records.
pub struct BombeLogs {
    stops: File,
    registers: File,
}

impl BombeLogs {
    /// Opens (creating as needed) `<dir>/<permutation>_stops.log` and
    /// `<dir>/<permutation>_registers.log` in append mode.
    pub fn new(dir: &Path, permutation: &str) -> io::Result<Self> {
        create_dir_all(dir)?;
        let open = |suffix: &str| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(format!("{permutation}_{suffix}.log")))
        };
        Ok(BombeLogs { stops: open("stops")?, registers: open("registers")? })
    }

    /// One summary line: permutation, rotor settings, stecker pairs.
    pub fn log_stop(&mut self, stop: &BombeStop) -> io::Result<()> {
        let mut pairs = String::new();
        for (a, b) in &stop.stecker_pairs {
            pairs.push(*a);
            pairs.push(*b);
            pairs.push(' ');
        }
        writeln!(
            self.stops,
            "{} {} {}",
            stop.permutation, stop.rotor_settings, pairs.trim_end()
        )
    }

    /// The full 26x26 register grid at an accepted stop.
    pub fn log_registers(
        &mut self,
        permutation: &str,
        rotor_settings: &str,
        dump: &str,
    ) -> io::Result<()> {
        writeln!(self.registers, "{permutation} {rotor_settings}\n{dump}")
    }
}
