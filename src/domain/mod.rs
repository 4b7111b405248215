//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the input series (`Series`)
//! - fit outputs (`LinearPiece`, `GlobalFit`, `SplineSegment`, `CoreFits`)
//! - run configuration (`RunConfig`, `SplineBasis`)

pub mod types;

pub use types::*;
