//! JSON export of a whole run.
//!
//! The document carries the run metadata and, per core, every fit in both
//! spline bases so downstream tools never have to re-derive coefficients.

use std::fs::File;
use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::domain::{CoreFits, StandardCubic};
use crate::error::{AppError, FitError};
use crate::io::ingest::{RowError, TemperatureLog};

#[derive(Debug, Serialize)]
pub struct FitsFile<'a> {
    pub tool: &'static str,
    pub generated: String,
    pub step_seconds: i64,
    pub n_readings: usize,
    pub skipped_lines: &'a [RowError],
    pub cores: Vec<CoreEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CoreEntry<'a> {
    pub core: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fits: Option<&'a CoreFits>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spline_standard: Vec<StandardCubic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Assemble the JSON document (kept separate from I/O for testing).
pub fn build_fits_file<'a>(
    log: &'a TemperatureLog,
    results: &'a [Result<CoreFits, FitError>],
) -> FitsFile<'a> {
    let cores = results
        .iter()
        .enumerate()
        .map(|(idx, result)| match result {
            Ok(fits) => CoreEntry {
                core: fits.core,
                fits: Some(fits),
                spline_standard: fits.spline.iter().map(|s| s.to_standard()).collect(),
                error: None,
            },
            Err(e) => CoreEntry {
                core: idx,
                fits: None,
                spline_standard: Vec::new(),
                error: Some(e.to_string()),
            },
        })
        .collect();

    FitsFile {
        tool: "thermal",
        generated: Local::now().to_rfc3339(),
        step_seconds: log.step_seconds,
        n_readings: log.n_readings(),
        skipped_lines: &log.row_errors,
        cores,
    }
}

/// Write the JSON export.
pub fn write_fits_json(
    path: &Path,
    log: &TemperatureLog,
    results: &[Result<CoreFits, FitError>],
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create JSON export '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, &build_fits_file(log, results))
        .map_err(|e| AppError::new(2, format!("Failed to write JSON export: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::fit_cores;
    use crate::io::ingest::parse_temperature_log;

    #[test]
    fn document_contains_both_spline_bases() {
        let log = parse_temperature_log("50 40\n55 41\n65 43\n".as_bytes(), 10).unwrap();
        let results = fit_cores(&log.core_series().unwrap());
        let value = serde_json::to_value(build_fits_file(&log, &results)).unwrap();

        assert_eq!(value["tool"], "thermal");
        assert_eq!(value["n_readings"], 3);
        let core0 = &value["cores"][0];
        assert_eq!(core0["fits"]["piecewise"].as_array().unwrap().len(), 2);
        assert_eq!(core0["fits"]["spline"][1]["a"], 55.0);
        assert_eq!(core0["spline_standard"].as_array().unwrap().len(), 2);
        assert!(core0.get("error").is_none());
    }
}
