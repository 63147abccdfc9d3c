//! `miles-compare` library crate.
//!
//! The binary (`miles`) is a thin wrapper around this library so that:
//!
//! - the earning engine is testable without spawning processes
//! - the catalog, engine and store are reusable from other front-ends

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod store;
