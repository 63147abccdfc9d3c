//! Numeric utilities: great-circle distance and rounding.

pub mod geo;
pub mod rounding;

pub use geo::*;
pub use rounding::*;
