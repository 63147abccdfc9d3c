//! Shared domain types.
//!
//! These types are plain values so they can be:
//!
//! - passed through the earning engine without shared state
//! - loaded from JSON catalogs
//! - exported to JSON/CSV and stored in history

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::EarnError;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if latitude is in `[-90, 90]` and longitude in `[-180, 180]`.
    ///
    /// NaN fails both range checks.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Airport reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// Three-letter IATA code.
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl Airport {
    /// Great-circle distance to `other` in whole nautical miles.
    pub fn distance_to(&self, other: &Airport) -> u32 {
        crate::math::distance_nm(self.coordinate, other.coordinate)
    }

    /// `"JFK - John F. Kennedy International, New York"`
    pub fn label(&self) -> String {
        format!("{} - {}, {}", self.code, self.name, self.city)
    }
}

/// Elite status tier. The set is closed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EliteTier {
    None,
    Silver,
    Gold,
    Platinum,
    Top,
}

impl EliteTier {
    /// All tiers, lowest first.
    pub const ALL: [EliteTier; 5] = [
        EliteTier::None,
        EliteTier::Silver,
        EliteTier::Gold,
        EliteTier::Platinum,
        EliteTier::Top,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            EliteTier::None => "none",
            EliteTier::Silver => "silver",
            EliteTier::Gold => "gold",
            EliteTier::Platinum => "platinum",
            EliteTier::Top => "top",
        }
    }
}

/// One value per elite tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierTable<T> {
    pub none: T,
    pub silver: T,
    pub gold: T,
    pub platinum: T,
    pub top: T,
}

impl<T: Copy> TierTable<T> {
    pub fn get(&self, tier: EliteTier) -> T {
        match tier {
            EliteTier::None => self.none,
            EliteTier::Silver => self.silver,
            EliteTier::Gold => self.gold,
            EliteTier::Platinum => self.platinum,
            EliteTier::Top => self.top,
        }
    }

    /// Values in tier order, lowest first.
    pub fn values(&self) -> [T; 5] {
        EliteTier::ALL.map(|tier| self.get(tier))
    }
}

/// Airline alliance a program belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Alliance {
    #[serde(rename = "Star Alliance")]
    #[value(name = "star")]
    StarAlliance,
    #[serde(rename = "SkyTeam")]
    #[value(name = "skyteam")]
    SkyTeam,
    #[serde(rename = "Oneworld")]
    #[value(name = "oneworld")]
    Oneworld,
    #[serde(rename = "None")]
    #[value(name = "none")]
    Unaligned,
}

impl Alliance {
    pub fn display_name(self) -> &'static str {
        match self {
            Alliance::StarAlliance => "Star Alliance",
            Alliance::SkyTeam => "SkyTeam",
            Alliance::Oneworld => "Oneworld",
            Alliance::Unaligned => "None",
        }
    }
}

/// Operating airline reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    /// Two-character IATA designator (`UA`, `9Y`).
    pub iata: String,
    pub name: String,
    pub country: String,
    pub alliance: Alliance,
}

/// How a program turns a flight into miles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EarningRules {
    /// Miles from flown distance, scaled by booking class and elite bonus.
    Distance {
        /// Booking-class code to distance multiplier. Unknown codes earn 1.0.
        booking_classes: BTreeMap<String, f64>,
        /// Bonus rate on top of class-adjusted distance (`0.5` = +50%).
        elite_bonuses: TierTable<f64>,
    },
    /// Miles from ticket price; the tier bonus is folded into the multiplier.
    Revenue { revenue_multiplier: TierTable<f64> },
}

impl EarningRules {
    pub fn is_revenue_based(&self) -> bool {
        matches!(self, EarningRules::Revenue { .. })
    }
}

/// Loyalty program reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyProgram {
    pub id: String,
    pub name: String,
    pub airline: String,
    pub alliance: Alliance,
    pub currency: String,
    /// Estimated value of one mile, in US cents.
    pub cents_per_mile: f64,
    /// Minimum miles credited per flight.
    pub minimum_miles: f64,
    pub earning: EarningRules,
}

/// Inputs for a single calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRequest {
    pub origin: Airport,
    pub destination: Airport,
    pub booking_class: String,
    pub elite_tier: EliteTier,
    pub ticket_price: Option<f64>,
}

impl FlightRequest {
    /// Great-circle distance of the requested route.
    pub fn distance_nm(&self) -> u32 {
        self.origin.distance_to(&self.destination)
    }
}

/// How the miles total was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarningBreakdown {
    /// Route distance (informational for revenue-based programs).
    pub base_distance: u32,
    /// Booking-class multiplier, or revenue multiplier for revenue programs.
    pub multiplier: f64,
    /// Class-adjusted distance, or raw `price × multiplier` before the floor.
    pub pre_bonus_miles: f64,
    pub elite_bonus: f64,
    pub total_miles: u32,
}

/// Earning outcome for one (request, program) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningResult {
    pub program: LoyaltyProgram,
    pub miles_earned: u32,
    pub elite_qualifying_miles: u32,
    /// In US dollars, unrounded.
    pub estimated_value: f64,
    pub earning_rate: f64,
    pub breakdown: EarningBreakdown,
}

/// A program left out of a comparison and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramExclusion {
    pub program_id: String,
    pub program_name: String,
    pub reason: EarnError,
}

/// Ranked comparison output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub distance_nm: u32,
    /// Best first.
    pub results: Vec<EarningResult>,
    pub excluded: Vec<ProgramExclusion>,
}

impl Comparison {
    pub fn best(&self) -> Option<&EarningResult> {
        self.results.first()
    }
}

/// A saved comparison run (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub origin: Airport,
    pub destination: Airport,
    pub booking_class: String,
    pub elite_tier: EliteTier,
    pub ticket_price: Option<f64>,
    pub comparison: Comparison,
}

impl RunSummary {
    /// Rebuild the request the summary was produced from.
    pub fn request(&self) -> FlightRequest {
        FlightRequest {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            booking_class: self.booking_class.clone(),
            elite_tier: self.elite_tier,
            ticket_price: self.ticket_price,
        }
    }
}
