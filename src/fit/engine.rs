//! Per-core orchestration.
//!
//! Runs every fit kind over one core's series and isolates failures: a
//! singular least-squares system only drops the global fit, never the
//! piecewise or spline output of the same core. Cores are independent and
//! are fitted in parallel.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::domain::{CoreFits, FitKind, Series};
use crate::error::FitError;
use crate::fit::least_squares::fit_global;
use crate::fit::piecewise::piecewise_linear;
use crate::fit::spline::natural_cubic_spline;

/// Fit one core.
///
/// Errors only when nothing can be computed at all: an empty series, or times
/// that are not strictly increasing (the fitters divide by time deltas).
pub fn fit_core(core: usize, series: &Series) -> Result<CoreFits, FitError> {
    if series.is_empty() {
        return Err(FitError::EmptySeries);
    }
    series.check_increasing()?;

    let mut skipped = Vec::new();
    let piecewise = piecewise_linear(series);

    let global = match fit_global(series) {
        Ok(g) => Some(g),
        Err(e) => {
            warn!(core, "least-squares fit skipped: {e}");
            skipped.push((FitKind::LeastSquares, e.to_string()));
            None
        }
    };

    let spline = match natural_cubic_spline(series) {
        Ok(segs) => {
            if segs.iter().any(|s| ![s.a, s.b, s.c, s.d].iter().all(|v| v.is_finite())) {
                warn!(core, "cubic spline produced non-finite coefficients");
            }
            segs
        }
        Err(e) => {
            debug!(core, "cubic spline skipped: {e}");
            skipped.push((FitKind::CubicSpline, e.to_string()));
            Vec::new()
        }
    };

    debug!(
        core,
        n = series.len(),
        pieces = piecewise.len(),
        segments = spline.len(),
        "core fitted"
    );

    Ok(CoreFits {
        core,
        n_points: series.len(),
        piecewise,
        global,
        spline,
        skipped,
    })
}

/// Fit every core in parallel; results come back in core order.
pub fn fit_cores(cores: &[Series]) -> Vec<Result<CoreFits, FitError>> {
    cores
        .par_iter()
        .enumerate()
        .map(|(idx, series)| fit_core(idx, series))
        .collect()
}
