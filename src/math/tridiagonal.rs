//! Tridiagonal linear systems (Thomas algorithm).
//!
//! Row `i` of the system reads:
//!
//! ```text
//! sub[i]·x[i-1] + diag[i]·x[i] + sup[i]·x[i+1] = rhs[i]
//! ```
//!
//! with `sub[0]` and `sup[n-1]` unused.
//!
//! The solver does a single forward sweep and back substitution, O(n), with
//! no pivoting. It is only stable for diagonally dominant systems, which is
//! what the natural cubic spline construction produces. A zero pivot is not
//! detected: the affected entries come out non-finite.

use crate::error::FitError;

/// The four bands of a tridiagonal system, all of length `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    pub sub: Vec<f64>,
    pub diag: Vec<f64>,
    pub sup: Vec<f64>,
    pub rhs: Vec<f64>,
}

impl TridiagonalSystem {
    /// An all-zero system of size `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            sub: vec![0.0; n],
            diag: vec![0.0; n],
            sup: vec![0.0; n],
            rhs: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.diag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Solve the system, consuming it.
    pub fn solve(self) -> Result<Vec<f64>, FitError> {
        solve_tridiagonal(&self.sub, &self.diag, &self.sup, &self.rhs)
    }
}

/// Solve a tridiagonal system with the Thomas algorithm.
///
/// Returns `ShapeMismatch` if the bands differ in length. An empty system has
/// an empty solution.
pub fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, FitError> {
    let n = rhs.len();
    for band in [sub, diag, sup] {
        if band.len() != n {
            return Err(FitError::ShapeMismatch {
                expected: n,
                actual: band.len(),
            });
        }
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    // Forward sweep.
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];
    c_prime[0] = sup[0] / diag[0];
    d_prime[0] = rhs[0] / diag[0];

    for i in 1..n {
        let denom = diag[i] - sub[i] * c_prime[i - 1];
        c_prime[i] = sup[i] / denom;
        d_prime[i] = (rhs[i] - sub[i] * d_prime[i - 1]) / denom;
    }

    // Back substitution.
    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    Ok(x)
}
