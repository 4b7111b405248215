//! Shared "fit pipeline" logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! log ingest -> per-core series -> parallel fitting
//!
//! The subcommands can then focus on presentation (summaries, files, plots).

use tracing::info;

use crate::domain::{CoreFits, RunConfig};
use crate::error::{AppError, FitError};
use crate::fit::fit_cores;
use crate::io::ingest::{load_temperature_log, TemperatureLog};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub log: TemperatureLog,
    /// One entry per core, in core order.
    pub results: Vec<Result<CoreFits, FitError>>,
}

impl RunOutput {
    pub fn fitted_cores(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }
}

/// Load the configured log file and fit every core.
pub fn run_fit(config: &RunConfig) -> Result<RunOutput, AppError> {
    let log = load_temperature_log(&config.input, config.step_seconds)?;
    run_fit_with_log(log)
}

/// Fit every core of an already-parsed log.
///
/// Individual core failures are kept in `results`; the run only fails when no
/// core could be fitted at all.
pub fn run_fit_with_log(log: TemperatureLog) -> Result<RunOutput, AppError> {
    let series = log.core_series()?;
    info!(cores = series.len(), readings = log.n_readings(), "fitting");

    let results = fit_cores(&series);
    let output = RunOutput { log, results };

    if output.fitted_cores() == 0 {
        return Err(match output.results.first() {
            Some(Err(e)) => AppError::new(4, format!("No core could be fitted: {e}")),
            _ => AppError::new(3, "Nothing to process, check parser!"),
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::parse_temperature_log;

    #[test]
    fn fits_every_core_of_a_log() {
        let raw = "61 63 50\n62 64 52\n60 66 51\n63 65 53\n";
        let log = parse_temperature_log(raw.as_bytes(), 30).unwrap();
        let run = run_fit_with_log(log).unwrap();
        assert_eq!(run.results.len(), 3);
        assert_eq!(run.fitted_cores(), 3);
        for (idx, r) in run.results.iter().enumerate() {
            let fits = r.as_ref().unwrap();
            assert_eq!(fits.core, idx);
            assert_eq!(fits.piecewise.len(), 3);
            assert_eq!(fits.spline.len(), 3);
        }
    }

    #[test]
    fn single_reading_still_runs() {
        let log = parse_temperature_log("61 63\n".as_bytes(), 30).unwrap();
        let run = run_fit_with_log(log).unwrap();
        let fits = run.results[0].as_ref().unwrap();
        assert!(fits.piecewise.is_empty() && fits.spline.is_empty() && fits.global.is_none());
    }
}
