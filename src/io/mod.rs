//! Input/output helpers.
//!
//! - raw temperature log ingest + validation (`ingest`)
//! - per-core text reports (`export`)
//! - whole-run JSON export (`json`)

pub mod export;
pub mod ingest;
pub mod json;

pub use export::*;
pub use ingest::*;
pub use json::*;
