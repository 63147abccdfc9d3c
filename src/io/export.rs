//! Export ranked results to CSV and plain-text reports.
//!
//! The CSV is meant to be easy to consume in spreadsheets: a short
//! "Flight Details" block, then one row per ranked program.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::{Comparison, FlightRequest};
use crate::error::AppError;
use crate::report::format_percentage;

const RESULT_HEADER: [&str; 9] = [
    "Rank",
    "Program",
    "Airline",
    "Alliance",
    "Miles Earned",
    "Estimated Value (USD)",
    "Earning Rate",
    "Cents Per Mile",
    "Currency",
];

/// `airline-miles-JFK-LAX.csv`
pub fn default_csv_name(request: &FlightRequest) -> String {
    format!("airline-miles-{}-{}.csv", request.origin.code, request.destination.code)
}

/// The requested export path, or `default_csv_name` in the working directory.
pub fn csv_export_path(requested: Option<&Path>, request: &FlightRequest) -> PathBuf {
    requested
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_csv_name(request)))
}

/// Write the comparison to a CSV file.
pub fn write_results_csv(path: &Path, request: &FlightRequest, comparison: &Comparison) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, request, comparison)
}

/// Write the comparison as CSV to any writer.
pub fn write_results<W: Write>(writer: W, request: &FlightRequest, comparison: &Comparison) -> Result<(), AppError> {
    let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    let err = |e: csv::Error| AppError::new(2, format!("Failed to write export CSV: {e}"));

    let origin = request.origin.label();
    let destination = request.destination.label();
    let distance = format!("{} nautical miles", comparison.distance_nm);
    let metadata: Vec<Vec<&str>> = vec![
        vec!["Flight Details"],
        vec!["Origin", origin.as_str()],
        vec!["Destination", destination.as_str()],
        vec!["Distance", distance.as_str()],
        vec!["Booking Class", request.booking_class.as_str()],
        vec!["Elite Status", request.elite_tier.display_name()],
        vec![""],
        vec!["Results"],
    ];
    for row in metadata {
        csv.write_record(row).map_err(err)?;
    }

    csv.write_record(RESULT_HEADER).map_err(err)?;
    for (idx, r) in comparison.results.iter().enumerate() {
        csv.write_record([
            (idx + 1).to_string(),
            r.program.name.clone(),
            r.program.airline.clone(),
            r.program.alliance.display_name().to_string(),
            r.miles_earned.to_string(),
            format!("{:.2}", r.estimated_value),
            format_percentage(r.earning_rate),
            format!("{:.1}", r.program.cents_per_mile),
            r.program.currency.clone(),
        ])
        .map_err(err)?;
    }

    csv.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write a pre-formatted text report.
pub fn write_text_report(path: &Path, text: &str) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report '{}': {e}", path.display())))?;
    file.write_all(text.as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write report '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EliteTier;
    use crate::engine::compare;
    use crate::engine::test_support::{airport, distance_program, flight};

    #[test]
    fn csv_has_metadata_then_ranked_rows() {
        let req = flight(
            airport("JFK", 40.6413, -73.7781),
            airport("LAX", 33.9425, -118.4081),
            "Y",
            EliteTier::Gold,
        );
        let programs = vec![
            distance_program("cheap", 0.0, 1.0, &[], [0.0, 0.25, 0.5, 0.75, 1.0]),
            distance_program("rich", 0.0, 1.3, &[], [0.0, 0.25, 0.5, 0.75, 1.0]),
        ];
        let comparison = compare(&req, &programs);

        let mut buf = Vec::new();
        write_results(&mut buf, &req, &comparison).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Flight Details");
        assert_eq!(lines[1], "Origin,\"JFK - JFK International, JFK City\"");
        assert_eq!(lines[3], "Distance,2146 nautical miles");
        assert_eq!(lines[5], "Elite Status,gold");
        assert_eq!(lines[7], "Results");
        assert_eq!(lines[8], RESULT_HEADER.join(","));
        // 2146 * 1.5 = 3219 miles
        assert_eq!(lines[9], "1,rich miles,rich air,Star Alliance,3219,41.85,100%,1.3,miles");
        assert_eq!(lines[10], "2,cheap miles,cheap air,Star Alliance,3219,32.19,100%,1.0,miles");
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn default_name_uses_codes() {
        let req = flight(airport("BOS", 0.0, 0.0), airport("LGA", 0.0, 1.0), "Y", EliteTier::None);
        assert_eq!(default_csv_name(&req), "airline-miles-BOS-LGA.csv");
        assert_eq!(csv_export_path(None, &req), PathBuf::from("airline-miles-BOS-LGA.csv"));
        assert_eq!(
            csv_export_path(Some(Path::new("out/run.csv")), &req),
            PathBuf::from("out/run.csv")
        );
    }
}
