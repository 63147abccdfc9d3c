//! Reference data: catalog loading and lookup helpers.

pub mod catalog;
pub mod search;

pub use catalog::*;
pub use search::*;
