//! Curve fitting.
//!
//! Responsibilities:
//!
//! - piecewise linear interpolation between consecutive samples
//! - global linear least squares (closed form + matrix cross-check)
//! - natural cubic spline interpolation
//! - per-core orchestration with failure isolation (parallel over cores)

pub mod engine;
pub mod least_squares;
pub mod piecewise;
pub mod spline;

pub use engine::*;
pub use least_squares::*;
pub use piecewise::*;
pub use spline::*;
