//! Shared "compare" workflow:
//! request -> program selection -> earning + ranking.
//!
//! The CLI handlers focus on presentation and side effects (exports,
//! history); the computation itself lives here.

use crate::data::{Catalog, programs_by_alliance, top_programs};
use crate::domain::{Alliance, Comparison, EliteTier, FlightRequest, LoyaltyProgram};
use crate::engine::{compare, earn_by_tier};
use crate::error::AppError;

/// Which programs take part in a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramSelection {
    /// Explicit program ids, in the given order.
    Ids(Vec<String>),
    Alliance(Alliance),
    All,
    /// The N programs with the highest cents-per-mile.
    Top(usize),
}

impl ProgramSelection {
    /// Explicit ids win, then alliance, then `all`, then top N.
    pub fn from_filters(ids: Vec<String>, alliance: Option<Alliance>, all: bool, top: usize) -> Self {
        if !ids.is_empty() {
            ProgramSelection::Ids(ids)
        } else if let Some(alliance) = alliance {
            ProgramSelection::Alliance(alliance)
        } else if all {
            ProgramSelection::All
        } else {
            ProgramSelection::Top(top)
        }
    }

    pub fn resolve(&self, catalog: &Catalog) -> Result<Vec<LoyaltyProgram>, AppError> {
        match self {
            ProgramSelection::Ids(ids) => catalog.programs_by_id(ids),
            ProgramSelection::Alliance(alliance) => Ok(programs_by_alliance(&catalog.programs, *alliance)),
            ProgramSelection::All => Ok(catalog.programs.clone()),
            ProgramSelection::Top(n) => Ok(top_programs(&catalog.programs, *n)),
        }
    }

    fn is_single_program(&self) -> bool {
        matches!(self, ProgramSelection::Ids(ids) if ids.len() == 1)
    }
}

/// All computed outputs of a single `miles compare` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub request: FlightRequest,
    pub comparison: Comparison,
}

/// Select programs and compare them for `request`.
///
/// A single explicitly requested program that cannot earn on this flight is
/// an error; otherwise exclusions are reported in the comparison.
pub fn run_compare(
    catalog: &Catalog,
    request: FlightRequest,
    selection: &ProgramSelection,
) -> Result<RunOutput, AppError> {
    let programs = selection.resolve(catalog)?;
    log::debug!(
        "selected {} program(s) for {} -> {}",
        programs.len(),
        request.origin.code,
        request.destination.code
    );

    let comparison = compare(&request, &programs);

    if selection.is_single_program() {
        if let Some(excluded) = comparison.excluded.first() {
            return Err(excluded.reason.clone().into());
        }
    }

    Ok(RunOutput { request, comparison })
}

/// Miles at every elite tier for each ranked program, best program first.
///
/// A program that cannot earn at some tier is left out of the breakdown.
pub fn tier_breakdown(run: &RunOutput) -> Vec<(String, [(EliteTier, u32); 5])> {
    run.comparison
        .results
        .iter()
        .filter_map(|r| match earn_by_tier(&run.request, run.comparison.distance_nm, &r.program) {
            Ok(tiers) => Some((r.program.name.clone(), tiers)),
            Err(reason) => {
                log::warn!("No tier breakdown for {}: {reason}", r.program.id);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EliteTier;

    fn request(catalog: &Catalog, price: Option<f64>) -> FlightRequest {
        catalog
            .flight_request(Some("JFK"), Some("LAX"), "y", EliteTier::Gold, price)
            .unwrap()
    }

    #[test]
    fn filters_apply_in_priority_order() {
        assert_eq!(
            ProgramSelection::from_filters(vec!["a".into()], Some(Alliance::SkyTeam), true, 3),
            ProgramSelection::Ids(vec!["a".into()])
        );
        assert_eq!(
            ProgramSelection::from_filters(vec![], Some(Alliance::SkyTeam), true, 3),
            ProgramSelection::Alliance(Alliance::SkyTeam)
        );
        assert_eq!(ProgramSelection::from_filters(vec![], None, true, 3), ProgramSelection::All);
        assert_eq!(ProgramSelection::from_filters(vec![], None, false, 3), ProgramSelection::Top(3));
    }

    #[test]
    fn all_programs_rank_or_get_excluded() {
        let catalog = Catalog::builtin().unwrap();
        let run = run_compare(&catalog, request(&catalog, None), &ProgramSelection::All).unwrap();

        assert_eq!(run.comparison.distance_nm, 2146);
        assert_eq!(
            run.comparison.results.len() + run.comparison.excluded.len(),
            catalog.programs.len()
        );
        // Revenue programs need a price.
        assert!(run.comparison.excluded.iter().all(|e| {
            catalog
                .program(&e.program_id)
                .is_some_and(|p| p.earning.is_revenue_based())
        }));
    }

    #[test]
    fn single_revenue_program_without_price_is_a_precondition_error() {
        let catalog = Catalog::builtin().unwrap();
        let selection = ProgramSelection::Ids(vec!["delta-skymiles".into()]);

        let err = run_compare(&catalog, request(&catalog, None), &selection).unwrap_err();
        assert_eq!(err.exit_code(), 3);

        let run = run_compare(&catalog, request(&catalog, Some(400.0)), &selection).unwrap();
        assert_eq!(run.comparison.results.len(), 1);
    }

    #[test]
    fn unknown_program_id_is_invalid_input() {
        let catalog = Catalog::builtin().unwrap();
        let selection = ProgramSelection::Ids(vec!["nope".into()]);
        let err = run_compare(&catalog, request(&catalog, None), &selection).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn alliance_selection_only_includes_members() {
        let catalog = Catalog::builtin().unwrap();
        let selection = ProgramSelection::Alliance(Alliance::StarAlliance);
        let run = run_compare(&catalog, request(&catalog, Some(300.0)), &selection).unwrap();
        assert!(!run.comparison.results.is_empty());
        assert!(
            run.comparison
                .results
                .iter()
                .all(|r| r.program.alliance == Alliance::StarAlliance)
        );
    }

    #[test]
    fn tier_breakdown_follows_ranking_and_includes_request_tier() {
        let catalog = Catalog::builtin().unwrap();
        let selection = ProgramSelection::Ids(vec!["delta-skymiles".into(), "united-mileageplus".into()]);
        let run = run_compare(&catalog, request(&catalog, Some(450.0)), &selection).unwrap();

        let rows = tier_breakdown(&run);
        assert_eq!(rows.len(), run.comparison.results.len());
        for ((name, tiers), result) in rows.iter().zip(&run.comparison.results) {
            assert_eq!(name, &result.program.name);
            let gold = tiers.iter().find(|(tier, _)| *tier == EliteTier::Gold).unwrap();
            assert_eq!(gold.1, result.miles_earned);
            assert!(tiers.windows(2).all(|w| w[0].1 <= w[1].1));
        }
    }
}
