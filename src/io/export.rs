//! Write one text report per core.
//!
//! Files are named `core{idx}.txt` inside the output directory, which is
//! created if needed.

use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::{CoreFits, SplineBasis};
use crate::error::{AppError, FitError};
use crate::report::format_core_report;

/// Report file name for a core.
pub fn core_report_name(core: usize) -> String {
    format!("core{core}.txt")
}

/// Write a report for every successfully fitted core.
///
/// Cores that failed entirely are logged and skipped; the other reports are
/// still written. Returns the paths written, in core order.
pub fn write_core_reports(
    dir: &Path,
    results: &[Result<CoreFits, FitError>],
    basis: SplineBasis,
) -> Result<Vec<PathBuf>, AppError> {
    create_dir_all(dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create output dir '{}': {e}", dir.display()),
        )
    })?;

    let mut written = Vec::new();
    for (idx, result) in results.iter().enumerate() {
        let fits = match result {
            Ok(f) => f,
            Err(e) => {
                warn!(core = idx, "no report written: {e}");
                continue;
            }
        };

        let path = dir.join(core_report_name(fits.core));
        let report_error = |action: &str, e: std::io::Error| {
            AppError::new(2, format!("Failed to {action} report '{}': {e}", path.display()))
        };
        let mut file = File::create(&path).map_err(|e| report_error("create", e))?;
        file.write_all(format_core_report(fits, basis).as_bytes())
            .map_err(|e| report_error("write", e))?;

        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "reports written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::app::pipeline::{run_fit, run_fit_with_log};
    use crate::data::{SampleConfig, generate_log, render_raw_log};
    use crate::domain::RunConfig;
    use crate::io::ingest::parse_temperature_log;
    use crate::io::json::write_fits_json;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("thermal-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn sample_log_gets_one_report_per_core() {
        let dir = scratch_dir("sample");
        let log = generate_log(&SampleConfig {
            readings: 25,
            cores: 3,
            seed: 11,
            base_temp: 55.0,
            volatility: 1.0,
            step_seconds: 30,
        })
        .unwrap();
        let input = dir.join("temps.txt");
        fs::write(&input, render_raw_log(&log)).unwrap();

        let config = RunConfig {
            input,
            step_seconds: 30,
            out_dir: dir.join("out"),
            basis: SplineBasis::Standard,
            export_json: None,
            plot: false,
            plot_core: 0,
            plot_width: 80,
            plot_height: 20,
            quiet: true,
        };
        let run = run_fit(&config).unwrap();
        assert_eq!(run.fitted_cores(), 3);

        let written = write_core_reports(&config.out_dir, &run.results, config.basis).unwrap();
        assert_eq!(written.len(), 3);
        for core in 0..3 {
            let report = fs::read_to_string(config.out_dir.join(core_report_name(core))).unwrap();
            let lines: Vec<&str> = report.lines().collect();
            // 24 interpolation, 1 least-squares, 24 spline.
            assert_eq!(lines.len(), 49);
            assert_eq!(lines.iter().filter(|l| l.ends_with("least-squares")).count(), 1);
            assert!(lines[0].starts_with("       0 <= x <=       30 ;"));
            assert!(lines[48].starts_with("     690 <= x <=      720 ;"));
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn three_point_log_report_and_json() {
        let dir = scratch_dir("three");
        let log = parse_temperature_log("+50.0°C\n+55.0°C\n+65.0°C\n".as_bytes(), 10).unwrap();
        let run = run_fit_with_log(log).unwrap();

        let written = write_core_reports(&dir, &run.results, SplineBasis::Shifted).unwrap();
        assert_eq!(written, vec![dir.join("core0.txt")]);
        let report = fs::read_to_string(&written[0]).unwrap();
        assert!(report.contains(
            "       0 <= x <=       10 ; y =      50.0000 +       0.5000 x ; interpolation"
        ));
        assert!(report.contains(
            "       0 <= x <=       20 ; y =      49.1667 +       0.7500 x ; least-squares"
        ));

        let json_path = dir.join("fits.json");
        write_fits_json(&json_path, &run.log, &run.results).unwrap();
        let raw = fs::read_to_string(&json_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["tool"], "thermal");
        assert_eq!(value["n_readings"], 3);
        assert_eq!(value["cores"].as_array().unwrap().len(), 1);
        assert!(value["cores"][0]["error"].is_null());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_cores_get_no_report() {
        let dir = scratch_dir("failed");
        let results = vec![Err(FitError::EmptySeries)];
        assert!(write_core_reports(&dir, &results, SplineBasis::Standard).unwrap().is_empty());
        assert!(!dir.join("core0.txt").exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
