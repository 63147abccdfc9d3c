//! Catalog search and program selection helpers.
//!
//! Searches are case-insensitive substring matches on a trimmed query and
//! return at most `SEARCH_LIMIT` hits in catalog order.

use crate::domain::{Airline, Airport, Alliance, LoyaltyProgram};

/// Maximum number of search hits returned.
pub const SEARCH_LIMIT: usize = 10;

/// Programs selected when the user does not pick any.
pub const DEFAULT_TOP_PROGRAMS: usize = 10;

/// Search airports by code, name, city or country.
pub fn search_airports<'a>(airports: &'a [Airport], query: &str) -> Vec<&'a Airport> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    airports
        .iter()
        .filter(|a| {
            [&a.code, &a.name, &a.city, &a.country]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .take(SEARCH_LIMIT)
        .collect()
}

/// Search airlines by IATA code or name.
pub fn search_airlines<'a>(airlines: &'a [Airline], query: &str) -> Vec<&'a Airline> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    airlines
        .iter()
        .filter(|a| a.iata.to_lowercase().contains(&needle) || a.name.to_lowercase().contains(&needle))
        .take(SEARCH_LIMIT)
        .collect()
}

/// Search programs by id, name, airline or alliance.
pub fn search_programs<'a>(programs: &'a [LoyaltyProgram], query: &str) -> Vec<&'a LoyaltyProgram> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    programs
        .iter()
        .filter(|p| {
            [p.id.as_str(), p.name.as_str(), p.airline.as_str(), p.alliance.display_name()]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .take(SEARCH_LIMIT)
        .collect()
}

pub fn programs_by_alliance(programs: &[LoyaltyProgram], alliance: Alliance) -> Vec<LoyaltyProgram> {
    programs.iter().filter(|p| p.alliance == alliance).cloned().collect()
}

/// The `n` programs with the highest cents-per-mile value.
///
/// Equal values keep catalog order.
pub fn top_programs(programs: &[LoyaltyProgram], n: usize) -> Vec<LoyaltyProgram> {
    let mut sorted = programs.to_vec();
    sorted.sort_by(|a, b| b.cents_per_mile.total_cmp(&a.cents_per_mile));
    sorted.truncate(n);
    sorted
}
