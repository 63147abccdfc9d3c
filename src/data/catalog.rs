//! Airport and program catalogs.
//!
//! Catalogs are JSON arrays of `Airport` / `LoyaltyProgram`. A small catalog
//! ships inside the binary; `from_paths` loads replacements from disk.
//!
//! Reference data is validated once here so the engine can trust it on every
//! call: airport codes, coordinate ranges, program ids and numeric fields.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;

use crate::domain::{Airline, Airport, EarningRules, EliteTier, FlightRequest, LoyaltyProgram};
use crate::error::AppError;

const BUILTIN_AIRPORTS: &str = include_str!("../../data/airports.json");
const BUILTIN_PROGRAMS: &str = include_str!("../../data/programs.json");
const BUILTIN_AIRLINES: &str = include_str!("../../data/airlines.json");

/// Read-only reference data.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub airports: Vec<Airport>,
    pub programs: Vec<LoyaltyProgram>,
    /// Searchable airline list; not used by the earning engine.
    pub airlines: Vec<Airline>,
}

impl Catalog {
    /// Build a catalog from already-parsed records, validating them.
    pub fn new(airports: Vec<Airport>, programs: Vec<LoyaltyProgram>) -> Result<Self, AppError> {
        let airports = validate_airports(airports)?;
        let programs = validate_programs(programs)?;
        Ok(Self {
            airports,
            programs,
            airlines: Vec::new(),
        })
    }

    /// Attach an airline list, validating it.
    pub fn with_airlines(mut self, airlines: Vec<Airline>) -> Result<Self, AppError> {
        self.airlines = validate_airlines(airlines)?;
        Ok(self)
    }

    /// The catalog bundled with the binary.
    pub fn builtin() -> Result<Self, AppError> {
        let airports = parse_json(BUILTIN_AIRPORTS, "built-in airports")?;
        let programs = parse_json(BUILTIN_PROGRAMS, "built-in programs")?;
        Self::new(airports, programs)?.with_airlines(builtin_airlines()?)
    }

    /// Load airports and programs from JSON files. The airline list stays built-in.
    pub fn from_paths(airports: &Path, programs: &Path) -> Result<Self, AppError> {
        let catalog = Self::new(read_json(airports)?, read_json(programs)?)?.with_airlines(builtin_airlines()?)?;
        info!(
            "Loaded {} airport(s) from {} and {} program(s) from {}",
            catalog.airports.len(),
            airports.display(),
            catalog.programs.len(),
            programs.display()
        );
        Ok(catalog)
    }

    /// Case-insensitive lookup by airport code.
    pub fn airport(&self, code: &str) -> Option<&Airport> {
        let code = code.trim();
        self.airports.iter().find(|a| a.code.eq_ignore_ascii_case(code))
    }

    /// Case-insensitive lookup by program id.
    pub fn program(&self, id: &str) -> Option<&LoyaltyProgram> {
        let id = id.trim();
        self.programs.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    /// Resolve program ids, failing on the first unknown one.
    pub fn programs_by_id<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<LoyaltyProgram>, AppError> {
        ids.iter()
            .map(|id| {
                self.program(id.as_ref())
                    .cloned()
                    .ok_or_else(|| AppError::new(2, format!("Unknown program '{}'.", id.as_ref())))
            })
            .collect()
    }

    /// Build a flight request from airport codes.
    ///
    /// An empty or unknown origin/destination is an invalid request.
    pub fn flight_request(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
        booking_class: &str,
        elite_tier: EliteTier,
        ticket_price: Option<f64>,
    ) -> Result<FlightRequest, AppError> {
        let origin = self.resolve_airport(origin, "origin")?;
        let destination = self.resolve_airport(destination, "destination")?;
        Ok(FlightRequest {
            origin,
            destination,
            booking_class: booking_class.trim().to_ascii_uppercase(),
            elite_tier,
            ticket_price,
        })
    }

    fn resolve_airport(&self, code: Option<&str>, role: &str) -> Result<Airport, AppError> {
        let code = code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::invalid_request(format!("missing {role} airport")))?;
        self.airport(code)
            .cloned()
            .ok_or_else(|| AppError::invalid_request(format!("unknown {role} airport '{code}'")))
    }
}

fn builtin_airlines() -> Result<Vec<Airline>, AppError> {
    parse_json(BUILTIN_AIRLINES, "built-in airlines")
}

fn parse_json<T: DeserializeOwned>(text: &str, what: &str) -> Result<T, AppError> {
    serde_json::from_str(text).map_err(|e| AppError::new(2, format!("Invalid {what} JSON: {e}")))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open catalog '{}': {e}", path.display())))?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid catalog JSON '{}': {e}", path.display())))
}

fn validate_airports(mut airports: Vec<Airport>) -> Result<Vec<Airport>, AppError> {
    let mut seen = HashSet::new();
    for airport in &mut airports {
        airport.code = airport.code.trim().to_ascii_uppercase();
        let code = &airport.code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::new(2, format!("Invalid airport code '{code}' (need 3 letters).")));
        }
        if !seen.insert(code.clone()) {
            return Err(AppError::new(2, format!("Duplicate airport code '{code}'.")));
        }
        if !airport.coordinate.is_valid() {
            return Err(AppError::new(
                2,
                format!(
                    "Airport {code} has out-of-range coordinates ({}, {}).",
                    airport.coordinate.lat, airport.coordinate.lon
                ),
            ));
        }
    }
    Ok(airports)
}

fn validate_airlines(mut airlines: Vec<Airline>) -> Result<Vec<Airline>, AppError> {
    let mut seen = HashSet::new();
    for airline in &mut airlines {
        airline.iata = airline.iata.trim().to_ascii_uppercase();
        let code = &airline.iata;
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::new(2, format!("Invalid airline code '{code}' (need 2 characters).")));
        }
        if !seen.insert(code.clone()) {
            return Err(AppError::new(2, format!("Duplicate airline code '{code}'.")));
        }
    }
    Ok(airlines)
}

fn validate_programs(mut programs: Vec<LoyaltyProgram>) -> Result<Vec<LoyaltyProgram>, AppError> {
    let mut seen = HashSet::new();
    for program in &mut programs {
        program.id = program.id.trim().to_string();
        let id = program.id.clone();
        if id.is_empty() {
            return Err(AppError::new(2, format!("Program '{}' has an empty id.", program.name)));
        }
        if !seen.insert(id.to_ascii_lowercase()) {
            return Err(AppError::new(2, format!("Duplicate program id '{id}'.")));
        }
        check_non_negative(&id, "cents_per_mile", program.cents_per_mile)?;
        check_non_negative(&id, "minimum_miles", program.minimum_miles)?;

        match &mut program.earning {
            EarningRules::Distance {
                booking_classes,
                elite_bonuses,
            } => {
                *booking_classes = normalize_classes(&id, booking_classes)?;
                for value in elite_bonuses.values() {
                    check_non_negative(&id, "elite_bonuses", value)?;
                }
            }
            EarningRules::Revenue { revenue_multiplier } => {
                for value in revenue_multiplier.values() {
                    check_non_negative(&id, "revenue_multiplier", value)?;
                }
            }
        }
    }
    Ok(programs)
}

/// Upper-case booking-class codes so lookups can normalize the request side only.
fn normalize_classes(id: &str, classes: &BTreeMap<String, f64>) -> Result<BTreeMap<String, f64>, AppError> {
    let mut out = BTreeMap::new();
    for (code, &multiplier) in classes {
        check_non_negative(id, "booking_classes", multiplier)?;
        let code = code.trim().to_ascii_uppercase();
        if out.insert(code.clone(), multiplier).is_some() {
            return Err(AppError::new(2, format!("Program {id} lists booking class '{code}' twice.")));
        }
    }
    Ok(out)
}

fn check_non_negative(id: &str, field: &str, value: f64) -> Result<(), AppError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::new(2, format!("Program {id}: {field} must be finite and >= 0 (got {value}).")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{airport, distance_program};

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.airports.len() >= 20);
        assert!(catalog.programs.len() >= 10);
        assert!(catalog.airport("jfk").is_some());
        assert!(catalog.program("UNITED-MILEAGEPLUS").is_some());
    }

    #[test]
    fn builtin_catalog_reproduces_reference_routes() {
        let catalog = Catalog::builtin().unwrap();
        let jfk = catalog.airport("JFK").unwrap();
        let lax = catalog.airport("LAX").unwrap();
        let bos = catalog.airport("BOS").unwrap();
        let lga = catalog.airport("LGA").unwrap();
        assert_eq!(jfk.distance_to(lax), 2146);
        assert_eq!(bos.distance_to(lga), 160);
    }

    #[test]
    fn flight_request_requires_both_airports() {
        let catalog = Catalog::builtin().unwrap();

        let err = catalog
            .flight_request(None, Some("LAX"), "Y", EliteTier::None, None)
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("origin"));

        let err = catalog
            .flight_request(Some("JFK"), Some("  "), "Y", EliteTier::None, None)
            .unwrap_err();
        assert!(err.message().contains("destination"));

        let err = catalog
            .flight_request(Some("XXX"), Some("LAX"), "Y", EliteTier::None, None)
            .unwrap_err();
        assert!(err.message().contains("XXX"));
    }

    #[test]
    fn flight_request_normalizes_class() {
        let catalog = Catalog::builtin().unwrap();
        let req = catalog
            .flight_request(Some("jfk"), Some("lhr"), " j ", EliteTier::Gold, Some(900.0))
            .unwrap();
        assert_eq!(req.origin.code, "JFK");
        assert_eq!(req.booking_class, "J");
        assert_eq!(req.ticket_price, Some(900.0));
    }

    #[test]
    fn rejects_bad_airports() {
        let err = Catalog::new(vec![airport("JFKX", 0.0, 0.0)], vec![]).unwrap_err();
        assert!(err.message().contains("JFKX"));

        let err = Catalog::new(vec![airport("JFK", 0.0, 0.0), airport("jfk", 1.0, 1.0)], vec![]).unwrap_err();
        assert!(err.message().contains("Duplicate"));

        let err = Catalog::new(vec![airport("ABC", 95.0, 0.0)], vec![]).unwrap_err();
        assert!(err.message().contains("out-of-range"));
    }

    #[test]
    fn builtin_airlines_load_with_codes() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.airlines.len() >= 50);
        let ua = catalog.airlines.iter().find(|a| a.iata == "UA").unwrap();
        assert_eq!(ua.name, "United Airlines");
        assert_eq!(ua.alliance, crate::domain::Alliance::StarAlliance);
    }

    #[test]
    fn rejects_bad_airlines() {
        let airline = |iata: &str| Airline {
            iata: iata.to_string(),
            name: format!("{iata} air"),
            country: "Testland".to_string(),
            alliance: crate::domain::Alliance::Unaligned,
        };
        let catalog = Catalog::new(vec![], vec![]).unwrap();

        let err = catalog.clone().with_airlines(vec![airline("UAL")]).unwrap_err();
        assert!(err.message().contains("UAL"));

        let err = catalog.clone().with_airlines(vec![airline("ua"), airline("UA")]).unwrap_err();
        assert!(err.message().contains("Duplicate"));

        let ok = catalog.with_airlines(vec![airline(" 9y ")]).unwrap();
        assert_eq!(ok.airlines[0].iata, "9Y");
    }

    #[test]
    fn rejects_bad_programs() {
        let p = distance_program("p", 0.0, 1.0, &[], [0.0; 5]);
        let err = Catalog::new(vec![], vec![p.clone(), p.clone()]).unwrap_err();
        assert!(err.message().contains("Duplicate"));

        let err = Catalog::new(vec![], vec![distance_program("q", -1.0, 1.0, &[], [0.0; 5])]).unwrap_err();
        assert!(err.message().contains("minimum_miles"));

        let err = Catalog::new(vec![], vec![distance_program("r", 0.0, 1.0, &[("Y", f64::NAN)], [0.0; 5])])
            .unwrap_err();
        assert!(err.message().contains("booking_classes"));
    }

    #[test]
    fn class_codes_are_upper_cased() {
        let catalog = Catalog::new(vec![], vec![distance_program("p", 0.0, 1.0, &[("j", 1.5)], [0.0; 5])]).unwrap();
        match &catalog.programs[0].earning {
            EarningRules::Distance { booking_classes, .. } => {
                assert_eq!(booking_classes.get("J"), Some(&1.5));
            }
            EarningRules::Revenue { .. } => panic!("expected distance rules"),
        }
    }

    #[test]
    fn programs_by_id_reports_unknown() {
        let catalog = Catalog::builtin().unwrap();
        let found = catalog.programs_by_id(&["delta-skymiles", "aeroplan"]).unwrap();
        assert_eq!(found.len(), 2);
        let err = catalog.programs_by_id(&["nope"]).unwrap_err();
        assert!(err.message().contains("nope"));
    }
}
