//! Reporting utilities: money/miles formatting, comparison tables and
//! printable reports.

pub mod format;

pub use format::*;
