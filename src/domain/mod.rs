//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - reference data (`Airport`, `LoyaltyProgram`, `EarningRules`)
//! - per-calculation inputs (`FlightRequest`, `EliteTier`)
//! - engine outputs (`EarningResult`, `Comparison`)
//! - the booking-class to cabin mapping (`Cabin`)

pub mod cabin;
pub mod types;

pub use cabin::*;
pub use types::*;
