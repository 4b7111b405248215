//! Piecewise linear interpolation between consecutive samples.

use crate::domain::{LinearFit, LinearPiece, Series};

/// One line per adjacent pair of samples (`n - 1` pieces, none for `n < 2`).
pub fn piecewise_linear(series: &Series) -> Vec<LinearPiece> {
    let times = series.times();
    let values = series.values();

    (0..series.len().saturating_sub(1))
        .map(|i| {
            let (x1, x2) = (times[i], times[i + 1]);
            LinearPiece {
                x_start: x1,
                x_end: x2,
                fit: LinearFit::through((x1 as f64, values[i]), (x2 as f64, values[i + 1])),
            }
        })
        .collect()
}
