//! Linear-algebra kernels: tridiagonal (Thomas) and 2×2 (Cramer) solves.

pub mod linear2x2;
pub mod tridiagonal;

pub use linear2x2::*;
pub use tridiagonal::*;
