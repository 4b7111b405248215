//! Reporting: per-core text reports and terminal summaries.

pub mod format;

pub use format::*;
