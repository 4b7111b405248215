//! Error types.
//!
//! - `FitError`: failures of the numerical engine (per series, per fit kind)
//! - `AppError`: CLI-level failures carrying a process exit code

/// Errors raised by the fitting engine.
///
/// Zero time deltas and zero Thomas pivots are *not* represented here: the
/// fitters assume strictly increasing times. `DegenerateSegment` is only
/// produced by [`crate::domain::Series::check_increasing`], which callers run
/// to establish that precondition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("Nothing to process: the series is empty")]
    EmptySeries,

    #[error("Length mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Normal equations of the global least-squares fit are (nearly) singular.
    #[error("System is singular or nearly singular (det={det:e})")]
    SingularSystem { det: f64 },

    /// The explicit 2×2 solve hit a (nearly) zero determinant.
    #[error("Matrix is singular (det={det:e})")]
    SingularMatrix { det: f64 },

    #[error("Times must be strictly increasing: t[{index}]={prev} is followed by {next}")]
    DegenerateSegment { index: usize, prev: i64, next: i64 },
}

#[derive(Clone, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let code = match err {
            FitError::EmptySeries | FitError::InsufficientData { .. } => 3,
            FitError::ShapeMismatch { .. } | FitError::DegenerateSegment { .. } => 2,
            FitError::SingularSystem { .. } | FitError::SingularMatrix { .. } => 4,
        };
        AppError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_exit_codes() {
        assert_eq!(AppError::from(FitError::EmptySeries).exit_code(), 3);
        assert_eq!(AppError::from(FitError::SingularSystem { det: 0.0 }).exit_code(), 4);
        let err = AppError::from(FitError::DegenerateSegment { index: 2, prev: 60, next: 60 });
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("t[2]=60"));
    }
}
