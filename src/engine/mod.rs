//! Mileage calculation engine.
//!
//! Responsibilities:
//!
//! - apply one program's earning rules to a flight (`earn`)
//! - run every selected program and rank the results (`compare`)
//!
//! Nothing here does I/O or keeps state between calls.

pub mod compare;
pub mod earn;

pub use compare::*;
pub use earn::*;
