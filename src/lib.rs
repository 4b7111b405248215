//! `thermal-curves` library crate.
//!
//! Fits piecewise-linear, least-squares and natural cubic spline curves to
//! per-core CPU temperature logs. The binary (`thermal`) is a thin wrapper
//! around this library so the fitting code is testable without spawning
//! processes.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
