//! Closed-form 2×2 linear solve (Cramer's rule).

use nalgebra::{Matrix2, Vector2};

use crate::error::FitError;

/// Determinants smaller than this (in absolute value) are treated as singular.
pub const SINGULAR_DET: f64 = 1e-10;

/// Solve `a·x = b`.
///
/// Returns `SingularMatrix` when `|det(a)| < SINGULAR_DET`.
pub fn solve_2x2(a: &Matrix2<f64>, b: &Vector2<f64>) -> Result<Vector2<f64>, FitError> {
    let det = a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)];
    if det.abs() < SINGULAR_DET {
        return Err(FitError::SingularMatrix { det });
    }

    let x0 = (b[0] * a[(1, 1)] - a[(0, 1)] * b[1]) / det;
    let x1 = (a[(0, 0)] * b[1] - b[0] * a[(1, 0)]) / det;
    Ok(Vector2::new(x0, x1))
}
