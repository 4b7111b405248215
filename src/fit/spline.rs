//! Natural cubic spline interpolation.
//!
//! A natural cubic spline passes through every sample, has continuous first
//! and second derivatives at interior knots, and zero second derivative at
//! both ends.
//!
//! We solve for the second derivatives `M[i]` at each knot (a tridiagonal
//! system), then build each segment on `[t_i, t_{i+1}]` in shifted form:
//!
//! ```text
//! S_i(x) = a + b(x - t_i) + c(x - t_i)^2 + d(x - t_i)^3
//! a = y_i
//! b = (y_{i+1} - y_i)/h - h(2M_i + M_{i+1})/6
//! c = M_i / 2
//! d = (M_{i+1} - M_i) / (6h)
//! ```

use crate::domain::{Series, SplineSegment};
use crate::error::FitError;
use crate::math::TridiagonalSystem;

/// Build the natural-spline system for `M[0..n]`.
///
/// Boundary rows pin `M[0] = M[n-1] = 0`; interior row `i` is
///
/// `h_i·M[i-1] + 2(h_i + h_{i+1})·M[i] + h_{i+1}·M[i+1] = 6(Δ_{i+1} - Δ_i)`
///
/// where `h_i = t[i] - t[i-1]` and `Δ_i` is the slope of that interval.
pub fn natural_spline_system(series: &Series) -> TridiagonalSystem {
    let n = series.len();
    let t = series.times();
    let y = series.values();
    let mut sys = TridiagonalSystem::zeros(n);
    if n == 0 {
        return sys;
    }

    sys.diag[0] = 1.0;
    sys.diag[n - 1] = 1.0;

    for i in 1..n.saturating_sub(1) {
        let h_i = t[i] as f64 - t[i - 1] as f64;
        let h_next = t[i + 1] as f64 - t[i] as f64;

        sys.sub[i] = h_i;
        sys.diag[i] = 2.0 * (h_i + h_next);
        sys.sup[i] = h_next;
        sys.rhs[i] = 6.0 * ((y[i + 1] - y[i]) / h_next - (y[i] - y[i - 1]) / h_i);
    }

    sys
}

/// Second derivatives of the natural spline at every knot.
///
/// - `n < 2`: not computable
/// - `n == 2`: both zero (the spline is the straight line)
/// - `n >= 3`: tridiagonal solve
pub fn second_derivatives(series: &Series) -> Result<Vec<f64>, FitError> {
    match series.len() {
        n if n < 2 => Err(FitError::InsufficientData { required: 2, actual: n }),
        2 => Ok(vec![0.0, 0.0]),
        _ => natural_spline_system(series).solve(),
    }
}

/// Shifted-form segments from knot second derivatives, one `m` per knot.
pub fn spline_segments(series: &Series, m: &[f64]) -> Result<Vec<SplineSegment>, FitError> {
    if m.len() != series.len() {
        return Err(FitError::ShapeMismatch {
            expected: series.len(),
            actual: m.len(),
        });
    }
    let t = series.times();
    let y = series.values();

    let segments = (0..series.len().saturating_sub(1))
        .map(|i| {
            let h = t[i + 1] as f64 - t[i] as f64;
            SplineSegment {
                x_start: t[i],
                x_end: t[i + 1],
                a: y[i],
                b: (y[i + 1] - y[i]) / h - h * (2.0 * m[i] + m[i + 1]) / 6.0,
                c: m[i] / 2.0,
                d: (m[i + 1] - m[i]) / (6.0 * h),
            }
        })
        .collect();
    Ok(segments)
}

/// Fit a natural cubic spline: `n - 1` segments for `n >= 2` samples.
pub fn natural_cubic_spline(series: &Series) -> Result<Vec<SplineSegment>, FitError> {
    let m = second_derivatives(series)?;
    spline_segments(series, &m)
}
