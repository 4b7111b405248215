//! Fixed-width text rendering of fit results.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (the golden tests below pin the layout)

use crate::domain::{CoreFits, FitKind, GlobalFit, LinearFit, SplineBasis, SplineSegment};
use crate::error::FitError;
use crate::io::ingest::TemperatureLog;

/// Line written in place of the least-squares fit when it could not be solved.
pub const SINGULAR_WARNING: &str = "Warning: System is singular or nearly singular";

/// Full per-core report: interpolation lines, the least-squares line, then
/// one cubic-spline line per segment.
pub fn format_core_report(fits: &CoreFits, basis: SplineBasis) -> String {
    let mut out = String::new();

    for piece in &fits.piecewise {
        out.push_str(&linear_line(piece.x_start, piece.x_end, &piece.fit, FitKind::Interpolation));
        out.push('\n');
    }

    match &fits.global {
        Some(g) => {
            out.push_str(&linear_line(g.x_start, g.x_end, &g.closed_form, FitKind::LeastSquares));
            out.push('\n');
        }
        None if fits.n_points > 0 => {
            out.push_str(SINGULAR_WARNING);
            out.push('\n');
        }
        None => {}
    }

    for seg in &fits.spline {
        out.push_str(&spline_line(seg, basis));
        out.push('\n');
    }

    out
}

fn linear_line(x0: i64, x1: i64, fit: &LinearFit, kind: FitKind) -> String {
    format!(
        "{x0:>8} <= x <= {x1:>8} ; y = {:>12.4} + {:>12.4} x ; {}",
        fit.intercept,
        fit.slope,
        kind.label()
    )
}

fn spline_line(seg: &SplineSegment, basis: SplineBasis) -> String {
    let (x0, x1) = (seg.x_start, seg.x_end);
    let label = FitKind::CubicSpline.label();
    match basis {
        SplineBasis::Shifted => format!(
            "{x0:>8} <= x <= {x1:>8} ; y = {:>12.4} + {:>12.4}(x-{x0}) + {:>12.4}(x-{x0})^2 + {:>12.4}(x-{x0})^3 ; {label}",
            seg.a, seg.b, seg.c, seg.d
        ),
        SplineBasis::Standard => {
            let [c0, c1, c2, c3] = seg.to_standard().coeffs;
            format!(
                "{x0:>8} <= x <= {x1:>8} ; y = {c0:>12.4} + {c1:>12.4} x + {c2:>12.4} x^2 + {c3:>12.4} x^3 ; {label}"
            )
        }
    }
}

/// Terminal summary of a run: input stats, per-core global fits, skips.
pub fn format_run_summary(log: &TemperatureLog, results: &[Result<CoreFits, FitError>]) -> String {
    let mut out = String::new();

    out.push_str("=== thermal - CPU core temperature curve fit ===\n");
    out.push_str(&format!(
        "Readings: n={} | cores={} | t=[{}, {}]s (step {}s)\n",
        log.n_readings(),
        log.n_cores(),
        log.times.first().copied().unwrap_or(0),
        log.times.last().copied().unwrap_or(0),
        log.step_seconds,
    ));
    if let Some((lo, hi)) = log.value_range() {
        out.push_str(&format!("Temperature: [{lo:.1}, {hi:.1}]°C\n"));
    }
    if !log.row_errors.is_empty() {
        out.push_str(&format!(
            "Skipped lines: {} of {}\n",
            log.row_errors.len(),
            log.rows_read
        ));
        for e in &log.row_errors {
            out.push_str(&format!("  line {}: {}\n", e.line, e.message));
        }
    }

    out.push_str("\nGlobal least-squares fits:\n");
    for (idx, result) in results.iter().enumerate() {
        match result {
            Ok(fits) => {
                match &fits.global {
                    Some(g) => out.push_str(&format!(
                        "  Core {:>2}: y = {:.4} + {:.4} * x  RMSE={:.3}°C  pieces={} segments={}\n",
                        fits.core,
                        g.closed_form.intercept,
                        g.closed_form.slope,
                        g.quality.rmse,
                        fits.piecewise.len(),
                        fits.spline.len(),
                    )),
                    None => out.push_str(&format!("  Core {:>2}: (no global fit)\n", fits.core)),
                }
                for (kind, reason) in &fits.skipped {
                    out.push_str(&format!("    (skipped {}) {reason}\n", kind.label()));
                }
            }
            Err(e) => out.push_str(&format!("  Core {idx:>2}: failed: {e}\n")),
        }
    }

    out
}

/// The input table followed by both least-squares solve paths per core.
pub fn format_cross_check(log: &TemperatureLog, results: &[Result<CoreFits, FitError>]) -> String {
    let mut out = String::new();

    out.push_str("Input data:\n");
    let mut header = format!("{:>8}", "Time(s)");
    for c in 0..log.n_cores() {
        header.push_str(&format!(" {:>7}", format!("Core{c}")));
    }
    out.push_str(&header);
    out.push('\n');
    for (i, t) in log.times.iter().enumerate() {
        let mut row = format!("{t:>8}");
        for column in &log.cores {
            row.push_str(&format!(" {:>7.1}", column[i]));
        }
        out.push_str(&row);
        out.push('\n');
    }

    out.push_str("\nClosed-form vs matrix least squares:\n");
    for (idx, result) in results.iter().enumerate() {
        let line = match result {
            Ok(CoreFits { global: Some(g), .. }) => cross_check_line(idx, g),
            Ok(_) => format!("Core {idx}: {SINGULAR_WARNING}"),
            Err(e) => format!("Core {idx}: failed: {e}"),
        };
        out.push_str(&line);
        out.push('\n');
    }

    out
}

fn cross_check_line(idx: usize, g: &GlobalFit) -> String {
    let closed = g.closed_form;
    match (g.matrix, g.path_disagreement()) {
        (Some(m), Some(diff)) => format!(
            "Core {idx}: closed y = {:.4} + {:.4} * x | matrix y = {:.4} + {:.4} * x | rel diff {diff:.1e}",
            closed.intercept, closed.slope, m.intercept, m.slope
        ),
        _ => format!(
            "Core {idx}: closed y = {:.4} + {:.4} * x | matrix: singular",
            closed.intercept, closed.slope
        ),
    }
}
