//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the per-core fits
//! - prints summaries, cross-checks and plots
//! - writes the per-core reports and optional exports

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::cli::{CheckArgs, Command, FitArgs, PlotArgs, SampleArgs};
use crate::data::{SampleConfig, generate_log, render_raw_log};
use crate::domain::{RunConfig, SplineBasis};
use crate::error::AppError;
use crate::io::ingest::DEFAULT_STEP_SECONDS;

pub mod pipeline;

/// Entry point for the `thermal` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Check(args) => handle_check(args),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    if !config.quiet {
        println!("{}", crate::report::format_run_summary(&run.log, &run.results));
    }

    crate::io::export::write_core_reports(&config.out_dir, &run.results, config.basis)?;

    if let Some(path) = &config.export_json {
        crate::io::json::write_fits_json(path, &run.log, &run.results)?;
        info!(path = %path.display(), "JSON export written");
    }

    if config.plot {
        println!("{}", render_plot(&run, config.plot_core, config.plot_width, config.plot_height)?);
    }

    Ok(())
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let config = RunConfig {
        step_seconds: args.step_seconds,
        ..default_run_config(args.input)
    };
    let run = pipeline::run_fit(&config)?;

    println!("{}", crate::report::format_cross_check(&run.log, &run.results));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let config = RunConfig {
        step_seconds: args.step_seconds,
        plot: true,
        plot_core: args.core,
        plot_width: args.width,
        plot_height: args.height,
        ..default_run_config(args.input)
    };
    let run = pipeline::run_fit(&config)?;

    println!("{}", render_plot(&run, config.plot_core, config.plot_width, config.plot_height)?);
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let log = generate_log(&SampleConfig {
        readings: args.readings,
        cores: args.cores,
        seed: args.seed,
        base_temp: args.base,
        volatility: args.volatility,
        step_seconds: DEFAULT_STEP_SECONDS,
    })?;

    std::fs::write(&args.out, render_raw_log(&log)).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to write sample log '{}': {e}", args.out.display()),
        )
    })?;

    println!(
        "Wrote {} readings x {} cores to {}",
        log.n_readings(),
        log.n_cores(),
        args.out.display()
    );
    Ok(())
}

/// Plot one core of a finished run.
fn render_plot(
    run: &pipeline::RunOutput,
    core: usize,
    width: usize,
    height: usize,
) -> Result<String, AppError> {
    let n_cores = run.log.n_cores();
    let fits = match run.results.get(core) {
        Some(Ok(fits)) => fits,
        Some(Err(e)) => {
            return Err(AppError::new(4, format!("Core {core} could not be fitted: {e}")));
        }
        None => {
            return Err(AppError::new(
                2,
                format!("Core {core} out of range (log has {n_cores} cores)."),
            ));
        }
    };
    let series = run.log.core_series()?;

    Ok(crate::plot::render_core_plot(&series[core], &fits.spline, width, height))
}

pub fn run_config_from_args(args: &FitArgs) -> RunConfig {
    RunConfig {
        input: args.input.clone(),
        step_seconds: args.step_seconds,
        out_dir: args.out_dir.clone(),
        basis: args.basis,
        export_json: args.export_json.clone(),

        plot: args.plot,
        plot_core: args.core,
        plot_width: args.width,
        plot_height: args.height,

        quiet: args.quiet,
    }
}

fn default_run_config(input: PathBuf) -> RunConfig {
    RunConfig {
        input,
        step_seconds: DEFAULT_STEP_SECONDS,
        out_dir: PathBuf::from("."),
        basis: SplineBasis::default(),
        export_json: None,
        plot: false,
        plot_core: 0,
        plot_width: 100,
        plot_height: 25,
        quiet: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_config_mirrors_fit_flags() {
        let cli = crate::cli::Cli::parse_from([
            "thermal",
            "fit",
            "log.txt",
            "--plot",
            "--core",
            "2",
            "--export-json",
            "fits.json",
            "--quiet",
        ]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit subcommand");
        };
        let config = run_config_from_args(&args);
        assert_eq!(config.input, PathBuf::from("log.txt"));
        assert!(config.plot && config.quiet);
        assert_eq!(config.plot_core, 2);
        assert_eq!(config.export_json, Some(PathBuf::from("fits.json")));
        assert_eq!(config.basis, SplineBasis::Standard);
    }

    #[test]
    fn plotting_a_missing_core_is_an_input_error() {
        let log =
            crate::io::ingest::parse_temperature_log("60 61\n62 63\n".as_bytes(), 30).unwrap();
        let run = pipeline::run_fit_with_log(log).unwrap();
        let err = render_plot(&run, 5, 40, 10).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(render_plot(&run, 1, 40, 10).unwrap().starts_with("Plot:"));
    }
}
