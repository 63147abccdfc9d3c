//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - money is rounded to cents only here, at display time

use chrono::{DateTime, Utc};

use crate::domain::{Airline, Airport, Cabin, Comparison, EarningResult, EliteTier, FlightRequest, LoyaltyProgram};
use crate::math::round_half_up;
use crate::store::{HistoryEntry, SavedRoute};

/// `12345` -> `"12,345"`.
pub fn format_miles(miles: u32) -> String {
    group_thousands(&miles.to_string())
}

/// `1234.5` -> `"$1,234.50"`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// `1.5` -> `"150%"`.
pub fn format_percentage(rate: f64) -> String {
    format!("{}%", round_half_up(rate * 100.0))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Route header plus the ranked table and any exclusion warnings.
pub fn format_comparison(request: &FlightRequest, comparison: &Comparison) -> String {
    let mut out = String::new();

    out.push_str("=== miles - Frequent Flyer Earnings ===\n");
    out.push_str(&format_flight_details(request, comparison.distance_nm));
    out.push('\n');

    if comparison.results.is_empty() {
        out.push_str("No programs could be ranked for this flight.\n");
    } else {
        out.push_str(&format_results_table(&comparison.results));
    }

    out.push_str(&format_exclusions(comparison));
    out
}

/// Plain-text report suitable for printing or archiving.
pub fn format_printable_report(
    request: &FlightRequest,
    comparison: &Comparison,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    out.push_str("AIRLINE MILES CALCULATION REPORT\n");
    out.push_str("================================\n\n");

    out.push_str("Flight details\n");
    out.push_str("--------------\n");
    out.push_str(&format_flight_details(request, comparison.distance_nm));
    out.push_str(&format!("Programs compared: {}\n\n", comparison.results.len()));

    if let Some(best) = comparison.best() {
        out.push_str("Best program\n");
        out.push_str("------------\n");
        out.push_str(&format!("{} ({})\n", best.program.name, best.program.airline));
        out.push_str(&format!("Miles earned:    {}\n", format_miles(best.miles_earned)));
        out.push_str(&format!("Estimated value: {}\n", format_currency(best.estimated_value)));
        out.push_str(&format!("Earning rate:    {}\n\n", format_percentage(best.earning_rate)));

        out.push_str("Full comparison\n");
        out.push_str("---------------\n");
        out.push_str(&format_results_table(&comparison.results));
    } else {
        out.push_str("No programs could be ranked for this flight.\n");
    }
    out.push_str(&format_exclusions(comparison));

    out.push('\n');
    out.push_str(&format!("Generated {}\n", generated_at.format("%Y-%m-%d %H:%M UTC")));
    out.push_str("Figures are estimates. Always verify with the airline program.\n");
    out
}

fn format_flight_details(request: &FlightRequest, distance_nm: u32) -> String {
    let mut out = String::new();
    out.push_str(&format!("Origin:        {}\n", request.origin.label()));
    out.push_str(&format!("Destination:   {}\n", request.destination.label()));
    out.push_str(&format!("Distance:      {} nautical miles\n", format_miles(distance_nm)));
    out.push_str(&format!(
        "Booking class: {} ({})\n",
        request.booking_class,
        Cabin::of_booking_class(&request.booking_class).display_name()
    ));
    out.push_str(&format!("Elite status:  {}\n", request.elite_tier.display_name()));
    if let Some(price) = request.ticket_price {
        out.push_str(&format!("Ticket price:  {}\n", format_currency(price)));
    }
    out
}

fn format_results_table(rows: &[EarningResult]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:<28} {:<14} {:>10} {:>11} {:>6} {:>7}\n",
            "rank", "program", "alliance", "miles", "value", "rate", "¢/mile"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<4} {:-<28} {:-<14} {:-<10} {:-<11} {:-<6} {:-<7}\n",
            "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (idx, r) in rows.iter().enumerate() {
        out.push_str(
            format!(
                "{:>4} {:<28} {:<14} {:>10} {:>11} {:>6} {:>7.1}\n",
                idx + 1,
                truncate(&program_label(&r.program), 28),
                r.program.alliance.display_name(),
                format_miles(r.miles_earned),
                format_currency(r.estimated_value),
                format_percentage(r.earning_rate),
                r.program.cents_per_mile,
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Miles at every elite tier, one row per program.
pub fn format_tier_table(rows: &[(String, [(EliteTier, u32); 5])]) -> String {
    let mut out = String::new();
    let mut header = format!("{:<28}", "program");
    for tier in EliteTier::ALL {
        header.push_str(&format!(" {:>10}", tier.display_name()));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&format!("{:-<28}{}\n", "", " ----------".repeat(EliteTier::ALL.len())));

    for (program, tiers) in rows {
        let mut line = format!("{:<28}", truncate(program, 28));
        for (_, miles) in tiers {
            line.push_str(&format!(" {:>10}", format_miles(*miles)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn format_exclusions(comparison: &Comparison) -> String {
    let mut out = String::new();
    for ex in &comparison.excluded {
        out.push_str(&format!("warning: {} excluded: {}\n", ex.program_name, ex.reason));
    }
    out
}

fn program_label(program: &LoyaltyProgram) -> String {
    format!("{} {}", program.airline, program.name)
}

/// One line per airport: code, name, city, country.
pub fn format_airports(airports: &[&Airport]) -> String {
    let mut out = String::new();
    for a in airports {
        out.push_str(&format!("{:<4} {:<40} {}, {}\n", a.code, truncate(&a.name, 40), a.city, a.country));
    }
    out
}

/// One line per airline: code, name, alliance, country.
pub fn format_airlines(airlines: &[&Airline]) -> String {
    let mut out = String::new();
    for a in airlines {
        out.push_str(
            format!("{:<3} {:<30} {:<14} {}\n", a.iata, truncate(&a.name, 30), a.alliance.display_name(), a.country)
                .trim_end(),
        );
        out.push('\n');
    }
    out
}

pub fn format_programs(programs: &[&LoyaltyProgram]) -> String {
    let mut out = String::new();
    for p in programs {
        let kind = if p.earning.is_revenue_based() { "revenue" } else { "distance" };
        out.push_str(
            format!(
                "{:<26} {:<30} {:<14} {:<9} {:>4.1}¢\n",
                truncate(&p.id, 26),
                truncate(&program_label(p), 30),
                p.alliance.display_name(),
                kind,
                p.cents_per_mile
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

pub fn format_routes(routes: &[SavedRoute]) -> String {
    if routes.is_empty() {
        return "No saved routes.\n".to_string();
    }
    let mut out = String::new();
    for r in routes {
        out.push_str(&format!(
            "{:<14} {:<20} {}-{} class {} tier {} (saved {})\n",
            r.id,
            truncate(&r.name, 20),
            r.origin,
            r.destination,
            r.booking_class,
            r.elite_tier.display_name(),
            r.saved_at.format("%Y-%m-%d")
        ));
    }
    out
}

pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No calculations recorded.\n".to_string();
    }
    let mut out = String::new();
    for e in entries {
        out.push_str(&format!(
            "{} {}-{} {} {:<8} {:>7} nm  best: {} ({} miles, {})\n",
            e.calculated_at.format("%Y-%m-%d %H:%M"),
            e.origin,
            e.destination,
            e.booking_class,
            e.elite_tier.display_name(),
            format_miles(e.distance_nm),
            e.best_program,
            format_miles(e.miles_earned),
            format_currency(e.estimated_value)
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EliteTier;
    use crate::engine::compare;
    use crate::engine::test_support::{airport, distance_program, flight, revenue_program};
    use chrono::TimeZone;

    #[test]
    fn miles_get_thousands_separators() {
        assert_eq!(format_miles(0), "0");
        assert_eq!(format_miles(999), "999");
        assert_eq!(format_miles(1000), "1,000");
        assert_eq!(format_miles(1234567), "1,234,567");
    }

    #[test]
    fn currency_has_two_decimals() {
        assert_eq!(format_currency(27.898), "$27.90");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-12.0), "-$12.00");
    }

    #[test]
    fn percentage_is_whole() {
        assert_eq!(format_percentage(1.5), "150%");
        assert_eq!(format_percentage(0.25), "25%");
        assert_eq!(format_percentage(8.0), "800%");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("MileagePlus", 20), "MileagePlus");
        assert_eq!(truncate("abcdefgh", 5), "abcd.");
    }

    #[test]
    fn comparison_lists_ranked_programs_and_warnings() {
        let req = flight(
            airport("JFK", 40.6413, -73.7781),
            airport("LAX", 33.9425, -118.4081),
            "J",
            EliteTier::None,
        );
        let programs = vec![
            distance_program("united", 0.0, 1.3, &[("J", 1.5)], [0.0; 5]),
            revenue_program("delta", 0.0, 1.2, [5.0; 5]),
        ];
        let text = format_comparison(&req, &compare(&req, &programs));

        assert!(text.contains("Distance:      2,146 nautical miles"));
        assert!(text.contains("Booking class: J (Business Class)"));
        assert!(text.contains("3,219"));
        assert!(text.contains("150%"));
        assert!(text.contains("warning: delta miles excluded"));
    }

    #[test]
    fn tier_table_has_one_column_per_tier() {
        let rows = vec![(
            "MileagePlus".to_string(),
            [
                (EliteTier::None, 2146),
                (EliteTier::Silver, 2683),
                (EliteTier::Gold, 3219),
                (EliteTier::Platinum, 3756),
                (EliteTier::Top, 4292),
            ],
        )];
        let text = format_tier_table(&rows);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("program"));
        assert!(lines[0].ends_with("top"));
        assert!(lines[2].starts_with("MileagePlus"));
        assert!(lines[2].ends_with("2,146      2,683      3,219      3,756      4,292"));
    }

    #[test]
    fn airline_lines_show_code_and_alliance() {
        let airline = Airline {
            iata: "TK".to_string(),
            name: "Turkish Airlines".to_string(),
            country: "Turkey".to_string(),
            alliance: crate::domain::Alliance::StarAlliance,
        };
        let text = format_airlines(&[&airline]);
        assert_eq!(
            text,
            format!("TK  {:<30} {:<14} Turkey\n", "Turkish Airlines", "Star Alliance")
        );
    }

    #[test]
    fn empty_comparison_says_so() {
        let req = flight(airport("AAA", 0.0, 0.0), airport("BBB", 0.0, 1.0), "Y", EliteTier::None);
        let text = format_comparison(&req, &compare(&req, &[]));
        assert!(text.contains("No programs could be ranked"));
    }

    #[test]
    fn printable_report_names_best_program() {
        let mut req = flight(
            airport("JFK", 40.6413, -73.7781),
            airport("LAX", 33.9425, -118.4081),
            "Y",
            EliteTier::None,
        );
        req.ticket_price = Some(600.0);
        let programs = vec![
            distance_program("united", 0.0, 1.3, &[], [0.0; 5]),
            revenue_program("delta", 0.0, 1.2, [5.0; 5]),
        ];
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        let text = format_printable_report(&req, &compare(&req, &programs), at);

        assert!(text.contains("Best program\n------------\ndelta miles (delta air)"));
        assert!(text.contains("Estimated value: $36.00"));
        assert!(text.contains("Ticket price:  $600.00"));
        assert!(text.contains("Generated 2025-06-01 09:30 UTC"));
    }
}
