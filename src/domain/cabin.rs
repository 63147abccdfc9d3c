//! Booking-class to cabin mapping.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Cabin {
    First,
    Business,
    PremiumEconomy,
    Economy,
}

const FIRST: &[&str] = &["F", "A", "P"];
const BUSINESS: &[&str] = &["J", "C", "D", "I", "Z", "R"];
const PREMIUM_ECONOMY: &[&str] = &["W", "E"];
const ECONOMY: &[&str] = &[
    "Y", "B", "M", "H", "Q", "V", "K", "L", "S", "T", "N", "O", "G", "U", "X",
];

impl Cabin {
    /// Cabin for a booking-class code. Unlisted codes are treated as economy.
    pub fn of_booking_class(code: &str) -> Cabin {
        let code = code.trim().to_ascii_uppercase();
        if FIRST.contains(&code.as_str()) {
            Cabin::First
        } else if BUSINESS.contains(&code.as_str()) {
            Cabin::Business
        } else if PREMIUM_ECONOMY.contains(&code.as_str()) {
            Cabin::PremiumEconomy
        } else {
            Cabin::Economy
        }
    }

    pub fn booking_classes(self) -> &'static [&'static str] {
        match self {
            Cabin::First => FIRST,
            Cabin::Business => BUSINESS,
            Cabin::PremiumEconomy => PREMIUM_ECONOMY,
            Cabin::Economy => ECONOMY,
        }
    }

    /// Full-fare class picked when only a cabin is given.
    pub fn default_booking_class(self) -> &'static str {
        self.booking_classes()[0]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Cabin::First => "First Class",
            Cabin::Business => "Business Class",
            Cabin::PremiumEconomy => "Premium Economy",
            Cabin::Economy => "Economy",
        }
    }
}
