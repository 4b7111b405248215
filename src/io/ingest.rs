//! Raw temperature log ingest.
//!
//! This module turns a sensor log into per-core `Series`. Each non-blank line
//! is one reading of every core:
//!
//! ```text
//! +61.0°C +63.0°C +50.0°C +58.0°C
//!  80.0    81.0    78.0    79.0
//! ```
//!
//! Design goals:
//! - **Row-level validation** (skip bad lines, but report what happened)
//! - **Deterministic timing**: the reading on line `k` (0-based, blank lines
//!   included) is taken at `k * step_seconds`, so times are strictly
//!   increasing by construction
//! - **Separation of concerns**: no fitting logic here

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::Series;
use crate::error::{AppError, FitError};

/// Seconds between consecutive log lines unless told otherwise.
pub const DEFAULT_STEP_SECONDS: i64 = 30;

/// A line that could not be used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
}

/// Parsed log: one time column plus one reading column per core.
#[derive(Debug, Clone, Serialize)]
pub struct TemperatureLog {
    pub step_seconds: i64,
    pub times: Vec<i64>,
    /// `cores[c][i]` is core `c` at `times[i]`.
    pub cores: Vec<Vec<f64>>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

impl TemperatureLog {
    pub fn n_cores(&self) -> usize {
        self.cores.len()
    }

    pub fn n_readings(&self) -> usize {
        self.times.len()
    }

    /// One series per core, sharing the time column.
    pub fn core_series(&self) -> Result<Vec<Series>, FitError> {
        self.cores
            .iter()
            .map(|values| Series::new(self.times.clone(), values.clone()))
            .collect()
    }

    /// Min/max over every reading of every core.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in self.cores.iter().flatten() {
            lo = lo.min(*v);
            hi = hi.max(*v);
        }
        (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
    }
}

/// Open and parse a log file.
pub fn load_temperature_log(path: &Path, step_seconds: i64) -> Result<TemperatureLog, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open log '{}': {e}", path.display())))?;
    let log = parse_temperature_log(BufReader::new(file), step_seconds)?;
    info!(
        path = %path.display(),
        readings = log.n_readings(),
        cores = log.n_cores(),
        skipped = log.row_errors.len(),
        "log loaded"
    );
    Ok(log)
}

/// Parse a raw log from any buffered reader.
pub fn parse_temperature_log<R: BufRead>(
    reader: R,
    step_seconds: i64,
) -> Result<TemperatureLog, AppError> {
    if step_seconds <= 0 {
        return Err(AppError::new(2, format!("Step must be > 0 seconds, got {step_seconds}.")));
    }

    let mut times = Vec::new();
    let mut cores: Vec<Vec<f64>> = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line
            .map_err(|e| AppError::new(2, format!("Failed to read log line {}: {e}", idx + 1)))?;
        if line.trim().is_empty() {
            continue;
        }
        rows_read += 1;

        let readings = match parse_line(&line) {
            Ok(r) => r,
            Err(message) => {
                row_errors.push(RowError { line: idx + 1, message });
                continue;
            }
        };

        if cores.is_empty() {
            cores = vec![Vec::new(); readings.len()];
        } else if readings.len() != cores.len() {
            row_errors.push(RowError {
                line: idx + 1,
                message: format!("Expected {} readings, found {}.", cores.len(), readings.len()),
            });
            continue;
        }

        times.push(reading_time(idx, step_seconds)?);
        for (column, value) in cores.iter_mut().zip(readings) {
            column.push(value);
        }
    }

    for e in &row_errors {
        warn!(line = e.line, "skipping log line: {}", e.message);
    }

    let rows_used = times.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "Nothing to process, check parser!"));
    }

    Ok(TemperatureLog {
        step_seconds,
        times,
        cores,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Time of the reading on 0-based line `idx`.
pub(crate) fn reading_time(idx: usize, step_seconds: i64) -> Result<i64, AppError> {
    i64::try_from(idx)
        .ok()
        .and_then(|i| i.checked_mul(step_seconds))
        .ok_or_else(|| {
            AppError::new(
                2,
                format!("Step of {step_seconds}s overflows the time axis at line {}.", idx + 1),
            )
        })
}

fn parse_line(line: &str) -> Result<Vec<f64>, String> {
    line.split_whitespace().map(parse_reading).collect()
}

fn parse_reading(token: &str) -> Result<f64, String> {
    let cleaned = token
        .trim_start_matches('+')
        .trim_end_matches("°C")
        .trim_end_matches('C')
        .trim_end_matches('°');
    let v = cleaned
        .parse::<f64>()
        .map_err(|_| format!("Invalid temperature '{token}'."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite temperature '{token}'."))
    }
}
