//! Input/output helpers.
//!
//! - result exports (CSV, text report) (`export`)
//! - run summary JSON read/write (`summary`)

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
