//! Design-space search for MLQ Coil Core.
//!
//! Trace-width sweep optimizer, frequency response, result report.

pub mod report;
pub mod sweep;
