//! Calculation history, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Comparison, EliteTier, FlightRequest};
use crate::error::AppError;
use crate::store::{KeyValueStore, fresh_id, read_list, write_list};

pub const HISTORY_KEY: &str = "calculationHistory";

/// Oldest entries are dropped past this many.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub booking_class: String,
    pub elite_tier: EliteTier,
    pub distance_nm: u32,
    /// Name of the top-ranked program.
    pub best_program: String,
    pub miles_earned: u32,
    pub estimated_value: f64,
    pub calculated_at: DateTime<Utc>,
}

/// Record the best result of `comparison`.
///
/// Returns `None` without touching the store when nothing was ranked.
pub fn record_history(
    store: &mut dyn KeyValueStore,
    request: &FlightRequest,
    comparison: &Comparison,
    now: DateTime<Utc>,
) -> Result<Option<HistoryEntry>, AppError> {
    let Some(best) = comparison.best() else {
        return Ok(None);
    };

    let mut entries: Vec<HistoryEntry> = read_list(store, HISTORY_KEY)?;
    let entry = HistoryEntry {
        id: fresh_id(now.timestamp_millis(), entries.iter().map(|e| e.id.as_str())),
        origin: request.origin.code.clone(),
        destination: request.destination.code.clone(),
        booking_class: request.booking_class.clone(),
        elite_tier: request.elite_tier,
        distance_nm: comparison.distance_nm,
        best_program: best.program.name.clone(),
        miles_earned: best.miles_earned,
        estimated_value: best.estimated_value,
        calculated_at: now,
    };

    entries.insert(0, entry.clone());
    entries.truncate(HISTORY_LIMIT);
    write_list(store, HISTORY_KEY, &entries)?;
    Ok(Some(entry))
}

pub fn history(store: &dyn KeyValueStore) -> Result<Vec<HistoryEntry>, AppError> {
    read_list(store, HISTORY_KEY)
}

pub fn clear_history(store: &mut dyn KeyValueStore) -> Result<(), AppError> {
    store.remove(HISTORY_KEY)
}
