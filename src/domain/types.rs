//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the fitters without any I/O
//! - rendered by the text report and the ASCII plot
//! - exported to JSON

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// One core's temperature series: integer sample times and real readings.
///
/// Times are expected to be strictly increasing. The fitters do not check this
/// (a repeated time divides by zero); callers that cannot guarantee it should
/// run [`Series::check_increasing`] first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    times: Vec<i64>,
    values: Vec<f64>,
}

impl Series {
    pub fn new(times: Vec<i64>, values: Vec<f64>) -> Result<Self, FitError> {
        if times.len() != values.len() {
            return Err(FitError::ShapeMismatch {
                expected: times.len(),
                actual: values.len(),
            });
        }
        Ok(Self { times, values })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[i64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(x, y)` pairs with the time widened to `f64`.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times
            .iter()
            .zip(self.values.iter())
            .map(|(&t, &y)| (t as f64, y))
    }

    /// First and last sample time, if any.
    pub fn time_range(&self) -> Option<(i64, i64)> {
        Some((*self.times.first()?, *self.times.last()?))
    }

    /// Verify that times are strictly increasing.
    pub fn check_increasing(&self) -> Result<(), FitError> {
        for (index, pair) in self.times.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(FitError::DegenerateSegment {
                    index,
                    prev: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(())
    }
}

/// `y = intercept + slope·x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    /// The line through two points. `x1 == x2` divides by zero.
    pub fn through((x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> Self {
        let slope = (y2 - y1) / (x2 - x1);
        Self {
            intercept: y1 - slope * x1,
            slope,
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// A linear fit valid on `[x_start, x_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearPiece {
    pub x_start: i64,
    pub x_end: i64,
    pub fit: LinearFit,
}

/// Residual diagnostics for the global fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// Global least-squares line over a whole series.
///
/// `closed_form` comes from the normal equations solved directly; `matrix` is
/// the same system solved through the explicit 2×2 path and is kept for
/// cross-checking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalFit {
    pub x_start: i64,
    pub x_end: i64,
    pub closed_form: LinearFit,
    pub matrix: Option<LinearFit>,
    pub quality: FitQuality,
}

impl GlobalFit {
    /// Largest relative difference between the two solve paths.
    ///
    /// `None` when the matrix path did not produce a solution.
    pub fn path_disagreement(&self) -> Option<f64> {
        let m = self.matrix?;
        let c = self.closed_form;
        Some(rel_diff(c.intercept, m.intercept).max(rel_diff(c.slope, m.slope)))
    }
}

/// `|a - b| / max(|a|, |b|)`, zero when both are zero.
fn rel_diff(a: f64, b: f64) -> f64 {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 { 0.0 } else { (a - b).abs() / scale }
}

/// One cubic piece of a spline in shifted form:
///
/// `S(x) = a + b(x - x_start) + c(x - x_start)^2 + d(x - x_start)^3`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineSegment {
    pub x_start: i64,
    pub x_end: i64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl SplineSegment {
    pub fn eval(&self, x: f64) -> f64 {
        let dx = x - self.x_start as f64;
        self.a + dx * (self.b + dx * (self.c + dx * self.d))
    }

    pub fn derivative(&self, x: f64) -> f64 {
        let dx = x - self.x_start as f64;
        self.b + dx * (2.0 * self.c + dx * 3.0 * self.d)
    }

    pub fn second_derivative(&self, x: f64) -> f64 {
        let dx = x - self.x_start as f64;
        2.0 * self.c + 6.0 * self.d * dx
    }

    /// Expand around zero: binomial expansion of the `(x - x_start)^k` terms.
    pub fn to_standard(&self) -> StandardCubic {
        let t = self.x_start as f64;
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        StandardCubic {
            x_start: self.x_start,
            x_end: self.x_end,
            coeffs: [
                a - b * t + c * t * t - d * t * t * t,
                b - 2.0 * c * t + 3.0 * d * t * t,
                c - 3.0 * d * t,
                d,
            ],
        }
    }
}

/// The same cubic in powers of `x`: `coeffs[k]` multiplies `x^k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardCubic {
    pub x_start: i64,
    pub x_end: i64,
    pub coeffs: [f64; 4],
}

impl StandardCubic {
    pub fn eval(&self, x: f64) -> f64 {
        let [c0, c1, c2, c3] = self.coeffs;
        c0 + x * (c1 + x * (c2 + x * c3))
    }
}

/// Which fit produced (or failed to produce) a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitKind {
    Interpolation,
    LeastSquares,
    CubicSpline,
}

impl FitKind {
    /// Label used at the end of each report line.
    pub fn label(self) -> &'static str {
        match self {
            FitKind::Interpolation => "interpolation",
            FitKind::LeastSquares => "least-squares",
            FitKind::CubicSpline => "cubic-spline",
        }
    }
}

/// Every fit computed for one core.
#[derive(Debug, Clone, Serialize)]
pub struct CoreFits {
    pub core: usize,
    pub n_points: usize,
    pub piecewise: Vec<LinearPiece>,
    pub global: Option<GlobalFit>,
    pub spline: Vec<SplineSegment>,
    /// Fits that could not be produced, and why (for diagnostics).
    pub skipped: Vec<(FitKind, String)>,
}

/// How spline segments are written in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SplineBasis {
    /// Powers of `x`.
    #[default]
    Standard,
    /// Powers of `(x - x_start)`.
    Shifted,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub step_seconds: i64,
    pub out_dir: PathBuf,
    pub basis: SplineBasis,
    pub export_json: Option<PathBuf>,

    pub plot: bool,
    pub plot_core: usize,
    pub plot_width: usize,
    pub plot_height: usize,

    /// Skip the terminal summary.
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_rejects_length_mismatch() {
        let err = Series::new(vec![0, 30], vec![1.0]).unwrap_err();
        assert_eq!(err, FitError::ShapeMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn check_increasing_reports_first_violation() {
        let s = Series::new(vec![0, 30, 30, 90], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(
            s.check_increasing(),
            Err(FitError::DegenerateSegment { index: 1, prev: 30, next: 30 })
        );
        let ok = Series::new(vec![0, 30, 60], vec![1.0, 2.0, 3.0]).unwrap();
        assert!(ok.check_increasing().is_ok());
    }

    #[test]
    fn standard_form_matches_shifted_form() {
        let seg = SplineSegment {
            x_start: 30,
            x_end: 60,
            a: 55.0,
            b: 0.25,
            c: -0.01,
            d: 0.0002,
        };
        let std = seg.to_standard();
        for x in [30.0, 37.5, 45.0, 59.0, 60.0] {
            let lhs = seg.eval(x);
            let rhs = std.eval(x);
            assert!((lhs - rhs).abs() < 1e-9, "x={x}: shifted={lhs} standard={rhs}");
        }
        assert_eq!(std.coeffs[3], seg.d);
    }

    #[test]
    fn linear_fit_through_reproduces_endpoints() {
        let fit = LinearFit::through((30.0, 61.0), (60.0, 64.0));
        assert!((fit.eval(30.0) - 61.0).abs() < 1e-12);
        assert!((fit.eval(60.0) - 64.0).abs() < 1e-12);
    }

    #[test]
    fn path_disagreement_is_relative_for_small_coefficients() {
        let global = |slope_matrix: f64| GlobalFit {
            x_start: 0,
            x_end: 600,
            closed_form: LinearFit { intercept: 55.0, slope: 0.001 },
            matrix: Some(LinearFit { intercept: 55.0, slope: slope_matrix }),
            quality: FitQuality { sse: 0.0, rmse: 0.0, n: 21 },
        };
        let diff = global(0.0010001).path_disagreement().unwrap();
        assert!((diff - 1e-4 / 1.0001).abs() < 1e-9, "diff={diff:e}");
        assert_eq!(global(0.001).path_disagreement(), Some(0.0));

        let zero = GlobalFit {
            closed_form: LinearFit { intercept: 0.0, slope: 0.0 },
            matrix: Some(LinearFit { intercept: 0.0, slope: 0.0 }),
            ..global(0.0)
        };
        assert_eq!(zero.path_disagreement(), Some(0.0));
    }
}
