//! Earning rules for a single program.
//!
//! Two paths, selected by the program's `EarningRules` variant:
//!
//! - **distance**: `max(distance, floor) × class multiplier`, plus the elite
//!   bonus on top of that
//! - **revenue**: `max(price × tier multiplier, floor)`
//!
//! All arithmetic is `f64`; only the final mile totals are rounded (half up).
//! Estimated values stay unrounded.

use std::collections::BTreeMap;

use log::trace;

use crate::domain::{
    EarningBreakdown, EarningResult, EarningRules, EliteTier, FlightRequest, LoyaltyProgram, TierTable,
};
use crate::error::EarnError;
use crate::math::round_miles;

/// Multiplier used for booking classes a program does not list.
pub const DEFAULT_CLASS_MULTIPLIER: f64 = 1.0;

/// Apply `program`'s earning rules to `flight` flown over `distance` nautical miles.
///
/// `distance` is passed in rather than recomputed so a comparison computes it
/// once for all programs.
pub fn earn(
    flight: &FlightRequest,
    distance: u32,
    program: &LoyaltyProgram,
) -> Result<EarningResult, EarnError> {
    let result = match &program.earning {
        EarningRules::Distance {
            booking_classes,
            elite_bonuses,
        } => earn_by_distance(flight, distance, program, booking_classes, elite_bonuses)?,
        EarningRules::Revenue { revenue_multiplier } => {
            earn_by_revenue(flight, distance, program, revenue_multiplier)?
        }
    };

    trace!(
        "{}: {} miles (value {:.4}, rate {})",
        program.id, result.miles_earned, result.estimated_value, result.earning_rate
    );
    Ok(result)
}

/// Look up the multiplier for a booking-class code.
///
/// The code is trimmed and, failing an exact match, retried upper-cased.
/// Unlisted codes earn `DEFAULT_CLASS_MULTIPLIER`.
pub fn class_multiplier(booking_classes: &BTreeMap<String, f64>, code: &str) -> f64 {
    let code = code.trim();
    booking_classes
        .get(code)
        .or_else(|| booking_classes.get(&code.to_ascii_uppercase()))
        .copied()
        .unwrap_or(DEFAULT_CLASS_MULTIPLIER)
}

fn earn_by_distance(
    flight: &FlightRequest,
    distance: u32,
    program: &LoyaltyProgram,
    booking_classes: &BTreeMap<String, f64>,
    elite_bonuses: &TierTable<f64>,
) -> Result<EarningResult, EarnError> {
    let effective_distance = f64::from(distance).max(program.minimum_miles);

    let multiplier = class_multiplier(booking_classes, &flight.booking_class);
    let with_class = effective_distance * multiplier;

    let elite_bonus = with_class * elite_bonuses.get(flight.elite_tier);
    let total = credited_miles(program, with_class + elite_bonus)?;

    Ok(EarningResult {
        program: program.clone(),
        miles_earned: total,
        elite_qualifying_miles: total,
        estimated_value: miles_value(total, program.cents_per_mile),
        earning_rate: multiplier,
        breakdown: EarningBreakdown {
            base_distance: distance,
            multiplier,
            pre_bonus_miles: with_class,
            elite_bonus,
            total_miles: total,
        },
    })
}

fn earn_by_revenue(
    flight: &FlightRequest,
    distance: u32,
    program: &LoyaltyProgram,
    revenue_multiplier: &TierTable<f64>,
) -> Result<EarningResult, EarnError> {
    let price = usable_ticket_price(flight.ticket_price).ok_or_else(|| EarnError::MissingTicketPrice {
        program: program.name.clone(),
    })?;

    let multiplier = revenue_multiplier.get(flight.elite_tier);
    let raw = price * multiplier;
    let total = credited_miles(program, raw.max(program.minimum_miles))?;

    Ok(EarningResult {
        program: program.clone(),
        miles_earned: total,
        elite_qualifying_miles: total,
        estimated_value: miles_value(total, program.cents_per_mile),
        earning_rate: multiplier,
        breakdown: EarningBreakdown {
            base_distance: distance,
            multiplier,
            pre_bonus_miles: raw,
            elite_bonus: 0.0,
            total_miles: total,
        },
    })
}

/// Round the final total, refusing totals that do not fit the miles counter.
fn credited_miles(program: &LoyaltyProgram, miles: f64) -> Result<u32, EarnError> {
    round_miles(miles).ok_or_else(|| EarnError::MilesOverflow {
        program: program.name.clone(),
        miles,
    })
}

/// A price of zero, a negative price, or a non-finite price counts as absent.
fn usable_ticket_price(price: Option<f64>) -> Option<f64> {
    price.filter(|p| p.is_finite() && *p > 0.0)
}

/// Dollar value of `miles` at `cents_per_mile`.
pub fn miles_value(miles: u32, cents_per_mile: f64) -> f64 {
    f64::from(miles) * (cents_per_mile / 100.0)
}

/// Miles `program` would earn at every elite tier, lowest tier first.
///
/// Handy for showing what status is worth on a route.
pub fn earn_by_tier(
    flight: &FlightRequest,
    distance: u32,
    program: &LoyaltyProgram,
) -> Result<[(EliteTier, u32); 5], EarnError> {
    let mut out = [(EliteTier::None, 0); 5];
    for (slot, tier) in out.iter_mut().zip(EliteTier::ALL) {
        let at_tier = FlightRequest {
            elite_tier: tier,
            ..flight.clone()
        };
        *slot = (tier, earn(&at_tier, distance, program)?.miles_earned);
    }
    Ok(out)
}
