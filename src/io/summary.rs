//! Read/write run summary JSON files.
//!
//! A summary is the portable record of one comparison:
//! - the request (airports, booking class, tier, price)
//! - distance, ranked results and exclusions
//! - generation metadata
//!
//! The schema is defined by `domain::RunSummary`.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::{Comparison, FlightRequest, RunSummary};
use crate::error::AppError;

pub const TOOL_NAME: &str = "miles";

pub fn build_summary(request: &FlightRequest, comparison: &Comparison, generated_at: DateTime<Utc>) -> RunSummary {
    RunSummary {
        tool: TOOL_NAME.to_string(),
        generated_at,
        origin: request.origin.clone(),
        destination: request.destination.clone(),
        booking_class: request.booking_class.clone(),
        elite_tier: request.elite_tier,
        ticket_price: request.ticket_price,
        comparison: comparison.clone(),
    }
}

/// Write a summary JSON file.
pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

/// Read a summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<RunSummary, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    let summary: RunSummary =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid summary JSON: {e}")))?;
    Ok(summary)
}
