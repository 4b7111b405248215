//! Command-line parsing for the temperature curve fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::SplineBasis;
use crate::io::ingest::DEFAULT_STEP_SECONDS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "thermal", version, about = "CPU core temperature curve fitter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit every core, write one report per core, and print a summary.
    Fit(FitArgs),
    /// Print the input table and compare closed-form vs matrix least squares.
    Check(CheckArgs),
    /// Plot one core's samples and cubic spline in the terminal.
    Plot(PlotArgs),
    /// Write a synthetic temperature log.
    Sample(SampleArgs),
}

/// Options for a full fitting run.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Raw temperature log (one line per reading, one column per core).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Seconds between consecutive log lines.
    #[arg(long, default_value_t = DEFAULT_STEP_SECONDS)]
    pub step_seconds: i64,

    /// Directory for the per-core `core{N}.txt` reports.
    #[arg(short = 'o', long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Polynomial basis used for cubic-spline report lines.
    #[arg(long, value_enum, default_value_t = SplineBasis::Standard)]
    pub basis: SplineBasis,

    /// Also export every fit to a JSON file.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Render an ASCII plot of one core after fitting.
    #[arg(long)]
    pub plot: bool,

    /// Core to plot.
    #[arg(long, default_value_t = 0)]
    pub core: usize,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Don't print the run summary.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Options for the least-squares cross-check.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Seconds between consecutive log lines.
    #[arg(long, default_value_t = DEFAULT_STEP_SECONDS)]
    pub step_seconds: i64,
}

/// Options for plotting a single core.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Core to plot.
    #[arg(long, default_value_t = 0)]
    pub core: usize,

    /// Seconds between consecutive log lines.
    #[arg(long, default_value_t = DEFAULT_STEP_SECONDS)]
    pub step_seconds: i64,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for synthetic log generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Where to write the log.
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,

    /// Number of readings (lines).
    #[arg(short = 'n', long, default_value_t = 20)]
    pub readings: usize,

    /// Number of cores (columns).
    #[arg(long, default_value_t = 4)]
    pub cores: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Mean temperature (°C).
    #[arg(long, default_value_t = 60.0)]
    pub base: f64,

    /// Per-reading noise standard deviation (°C).
    #[arg(long, default_value_t = 1.5)]
    pub volatility: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fit_defaults() {
        let cli = Cli::parse_from(["thermal", "fit", "temps.txt"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit subcommand");
        };
        assert_eq!(args.step_seconds, 30);
        assert_eq!(args.basis, SplineBasis::Standard);
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert!(!args.plot);
    }

    #[test]
    fn fit_accepts_shifted_basis() {
        let cli = Cli::parse_from(["thermal", "fit", "t.txt", "--basis", "shifted", "-o", "out"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit subcommand");
        };
        assert_eq!(args.basis, SplineBasis::Shifted);
        assert_eq!(args.out_dir, PathBuf::from("out"));
    }
}
