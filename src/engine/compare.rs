//! Program comparison and ranking.
//!
//! Ranking rules:
//! 1. estimated value, descending
//! 2. miles earned, descending
//! 3. remaining ties keep input order (stable sort)
//!
//! Programs whose rules cannot be applied are excluded and reported next to
//! the ranking instead of failing the whole comparison.

use std::cmp::Ordering;

use log::{debug, warn};

use crate::domain::{Comparison, EarningResult, FlightRequest, LoyaltyProgram, ProgramExclusion};
use crate::engine::earn::earn;

/// Earn miles on `flight` with every program in `programs` and rank the results.
pub fn compare(flight: &FlightRequest, programs: &[LoyaltyProgram]) -> Comparison {
    let distance_nm = flight.distance_nm();
    debug!(
        "Comparing {} program(s) on {}-{} ({distance_nm} nm, class {}, tier {})",
        programs.len(),
        flight.origin.code,
        flight.destination.code,
        flight.booking_class,
        flight.elite_tier.display_name(),
    );

    let mut results = Vec::with_capacity(programs.len());
    let mut excluded = Vec::new();

    for program in programs {
        match earn(flight, distance_nm, program) {
            Ok(result) => results.push(result),
            Err(reason) => {
                warn!("Excluding {}: {reason}", program.id);
                excluded.push(ProgramExclusion {
                    program_id: program.id.clone(),
                    program_name: program.name.clone(),
                    reason,
                });
            }
        }
    }

    rank(&mut results);

    Comparison {
        distance_nm,
        results,
        excluded,
    }
}

/// Sort results best first. `sort_by` is stable, so equal entries keep their order.
pub fn rank(results: &mut [EarningResult]) {
    results.sort_by(ranking_order);
}

/// Ordering used by `rank`: `Less` means `a` ranks above `b`.
///
/// `total_cmp` keeps the order total even if a catalog produces a NaN value.
pub fn ranking_order(a: &EarningResult, b: &EarningResult) -> Ordering {
    b.estimated_value
        .total_cmp(&a.estimated_value)
        .then_with(|| b.miles_earned.cmp(&a.miles_earned))
}
