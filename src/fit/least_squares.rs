//! Global linear least squares over a whole series.
//!
//! We minimise `Σ (y_i - (c0 + c1·x_i))^2`. The normal equations are
//!
//! ```text
//! [ n     Σx  ] [c0]   [ Σy  ]
//! [ Σx    Σx² ] [c1] = [ Σxy ]
//! ```
//!
//! and are solved two independent ways:
//! - `fit_closed_form`: the 2×2 system written out symbolically
//! - `fit_matrix`: `XᵀX` / `XᵀY` assembled as matrices and passed to the
//!   generic 2×2 solver
//!
//! Both must agree up to rounding; `fit_global` runs both and logs when they
//! don't.

use nalgebra::{Matrix2, Vector2};
use tracing::warn;

use crate::domain::{FitQuality, GlobalFit, LinearFit, Series};
use crate::error::FitError;
use crate::math::{solve_2x2, SINGULAR_DET};

/// Relative tolerance for the closed-form vs matrix cross-check.
pub const PATH_AGREEMENT_TOL: f64 = 1e-9;

/// Sums accumulated over a series for the normal equations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalSums {
    pub n: usize,
    pub sum_x: f64,
    pub sum_y: f64,
    pub sum_xy: f64,
    pub sum_x2: f64,
}

impl NormalSums {
    pub fn accumulate(series: &Series) -> Self {
        let mut sums = NormalSums {
            n: series.len(),
            sum_x: 0.0,
            sum_y: 0.0,
            sum_xy: 0.0,
            sum_x2: 0.0,
        };
        for (x, y) in series.points() {
            sums.sum_x += x;
            sums.sum_y += y;
            sums.sum_xy += x * y;
            sums.sum_x2 += x * x;
        }
        sums
    }

    /// `XᵀX` for the design matrix with rows `[1, x_i]`.
    pub fn xtx(&self) -> Matrix2<f64> {
        Matrix2::new(self.n as f64, self.sum_x, self.sum_x, self.sum_x2)
    }

    /// `XᵀY`.
    pub fn xty(&self) -> Vector2<f64> {
        Vector2::new(self.sum_y, self.sum_xy)
    }
}

/// Solve the normal equations directly.
pub fn fit_closed_form(series: &Series) -> Result<LinearFit, FitError> {
    if series.is_empty() {
        return Err(FitError::EmptySeries);
    }
    let s = NormalSums::accumulate(series);
    let n = s.n as f64;

    let det = n * s.sum_x2 - s.sum_x * s.sum_x;
    if det.abs() < SINGULAR_DET {
        return Err(FitError::SingularSystem { det });
    }

    Ok(LinearFit {
        intercept: (s.sum_y * s.sum_x2 - s.sum_x * s.sum_xy) / det,
        slope: (n * s.sum_xy - s.sum_x * s.sum_y) / det,
    })
}

/// Solve `XᵀX·c = XᵀY` through the explicit 2×2 solver.
pub fn fit_matrix(series: &Series) -> Result<LinearFit, FitError> {
    if series.is_empty() {
        return Err(FitError::EmptySeries);
    }
    let s = NormalSums::accumulate(series);
    let c = solve_2x2(&s.xtx(), &s.xty())?;
    Ok(LinearFit {
        intercept: c[0],
        slope: c[1],
    })
}

/// Residual SSE / RMSE of `fit` over `series`.
pub fn fit_quality(series: &Series, fit: &LinearFit) -> FitQuality {
    let sse: f64 = series
        .points()
        .map(|(x, y)| {
            let r = y - fit.eval(x);
            r * r
        })
        .sum();
    let n = series.len();
    let rmse = if n > 0 { (sse / n as f64).sqrt() } else { 0.0 };
    FitQuality { sse, rmse, n }
}

/// Closed-form fit plus the matrix cross-check and residual diagnostics.
///
/// Fails only if the closed form fails. A matrix-path failure on its own is
/// logged and leaves `matrix` empty.
pub fn fit_global(series: &Series) -> Result<GlobalFit, FitError> {
    let closed_form = fit_closed_form(series)?;
    let (x_start, x_end) = series.time_range().ok_or(FitError::EmptySeries)?;

    let matrix = match fit_matrix(series) {
        Ok(fit) => Some(fit),
        Err(e) => {
            warn!("matrix least-squares path failed while closed form succeeded: {e}");
            None
        }
    };

    let global = GlobalFit {
        x_start,
        x_end,
        closed_form,
        matrix,
        quality: fit_quality(series, &closed_form),
    };

    if let Some(diff) = global.path_disagreement() {
        if diff > PATH_AGREEMENT_TOL {
            warn!(
                "least-squares paths disagree: closed={:?} matrix={:?} (rel diff {diff:e})",
                global.closed_form, global.matrix
            );
        }
    }

    Ok(global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn series(times: &[i64], values: &[f64]) -> Series {
        Series::new(times.to_vec(), values.to_vec()).unwrap()
    }

    fn assert_close(a: f64, b: f64, tol: f64) {
        let scale = a.abs().max(b.abs()).max(1.0);
        assert!((a - b).abs() <= tol * scale, "{a} vs {b}");
    }

    #[test]
    fn three_point_example_on_both_paths() {
        let s = series(&[0, 10, 20], &[50.0, 55.0, 65.0]);
        let closed = fit_closed_form(&s).unwrap();
        let matrix = fit_matrix(&s).unwrap();

        // mean(y) - slope * mean(x) = 170/3 - 7.5
        assert_close(closed.intercept, 295.0 / 6.0, 1e-12);
        assert_close(closed.slope, 0.75, 1e-12);
        assert_close(matrix.intercept, closed.intercept, 1e-9);
        assert_close(matrix.slope, closed.slope, 1e-9);
    }

    #[test]
    fn collinear_data_is_recovered() {
        for &(p, q) in &[(40.0, 0.05), (-3.5, 2.0), (72.25, -0.125)] {
            let times: Vec<i64> = (0..12).map(|i| i * 30).collect();
            let values: Vec<f64> = times.iter().map(|&t| p + q * t as f64).collect();
            let s = series(&times, &values);
            for fit in [fit_closed_form(&s).unwrap(), fit_matrix(&s).unwrap()] {
                assert_close(fit.intercept, p, 1e-9);
                assert_close(fit.slope, q, 1e-9);
            }
        }
    }

    #[test]
    fn paths_agree_on_random_series() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let n = rng.gen_range(2..40);
            let mut t = 0i64;
            let mut times = Vec::with_capacity(n);
            let mut values = Vec::with_capacity(n);
            for _ in 0..n {
                t += rng.gen_range(1..120);
                times.push(t);
                values.push(rng.gen_range(30.0..95.0));
            }
            let s = series(&times, &values);
            let global = fit_global(&s).unwrap();
            let diff = global.path_disagreement().unwrap();
            assert!(diff <= PATH_AGREEMENT_TOL, "diff={diff:e}");
        }
    }

    #[test]
    fn empty_series_is_reported() {
        let s = series(&[], &[]);
        assert_eq!(fit_closed_form(&s), Err(FitError::EmptySeries));
        assert_eq!(fit_matrix(&s), Err(FitError::EmptySeries));
    }

    #[test]
    fn single_point_is_singular() {
        let s = series(&[30], &[61.0]);
        assert!(matches!(fit_closed_form(&s), Err(FitError::SingularSystem { .. })));
        assert!(matches!(fit_matrix(&s), Err(FitError::SingularMatrix { .. })));
        assert!(fit_global(&s).is_err());
    }

    #[test]
    fn quality_is_zero_for_exact_fit() {
        let s = series(&[0, 30, 60], &[50.0, 53.0, 56.0]);
        let global = fit_global(&s).unwrap();
        assert!(global.quality.sse < 1e-18);
        assert_eq!(global.quality.n, 3);
        assert_eq!((global.x_start, global.x_end), (0, 60));
    }
}
