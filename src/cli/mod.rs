//! Command-line parsing for the mileage comparison tool.
//!
//! Parsing only; dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::DEFAULT_TOP_PROGRAMS;
use crate::domain::{Alliance, Cabin, EliteTier};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "miles", version, about = "Frequent-flyer mileage earnings comparison")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank loyalty programs by the value a flight would earn.
    Compare(CompareArgs),
    /// Print the great-circle distance between two airports.
    Distance(RouteArgs),
    /// Search airports by code, name, city or country.
    Airports {
        query: String,
    },
    /// Search airlines by IATA code or name.
    Airlines {
        query: String,
    },
    /// List loyalty programs, optionally filtered.
    Programs {
        query: Option<String>,
    },
    /// Manage saved routes.
    #[command(subcommand)]
    Routes(RoutesCommand),
    /// Show (or clear) recent calculations.
    History {
        #[arg(long)]
        clear: bool,
    },
    /// Re-render a summary written by `miles compare --export-json`.
    Show {
        #[arg(value_name = "JSON")]
        path: PathBuf,
    },
}

/// Origin/destination pair.
#[derive(Debug, Args, Clone)]
pub struct RouteArgs {
    /// Origin airport code (e.g. JFK).
    #[arg(long)]
    pub from: String,

    /// Destination airport code (e.g. LAX).
    #[arg(long)]
    pub to: String,
}

/// Booking class selection: an explicit code, or a cabin's default code.
#[derive(Debug, Args, Clone)]
pub struct FareArgs {
    /// Booking class code (Y, J, F, ...).
    #[arg(long = "class", conflicts_with = "cabin")]
    pub booking_class: Option<String>,

    /// Cabin; uses the cabin's full-fare booking class.
    #[arg(long, value_enum)]
    pub cabin: Option<Cabin>,

    /// Elite status tier.
    #[arg(long, value_enum, default_value_t = EliteTier::None)]
    pub tier: EliteTier,
}

impl FareArgs {
    /// Resolved booking class code. Defaults to economy.
    pub fn booking_class(&self) -> String {
        match (&self.booking_class, self.cabin) {
            (Some(code), _) => code.clone(),
            (None, Some(cabin)) => cabin.default_booking_class().to_string(),
            (None, None) => Cabin::Economy.default_booking_class().to_string(),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub route: RouteArgs,

    #[command(flatten)]
    pub fare: FareArgs,

    /// Ticket price in USD (needed by revenue-based programs).
    #[arg(long)]
    pub price: Option<f64>,

    /// Compare only these program ids (repeatable).
    #[arg(long = "program", value_name = "ID")]
    pub programs: Vec<String>,

    /// Compare programs of one alliance.
    #[arg(long, value_enum)]
    pub alliance: Option<Alliance>,

    /// Compare every program in the catalog.
    #[arg(long)]
    pub all: bool,

    /// Without other filters, compare the N most valuable programs.
    #[arg(long, default_value_t = DEFAULT_TOP_PROGRAMS)]
    pub top: usize,

    /// Export ranked results to CSV (default name: airline-miles-FROM-TO.csv).
    #[arg(long, value_name = "CSV", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// Show the miles each program would earn at every elite tier.
    #[arg(long)]
    pub by_tier: bool,

    /// Export a JSON summary (re-render with `miles show`).
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Write a printable text report.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Record the best result in the calculation history.
    #[arg(long)]
    pub save_history: bool,
}

#[derive(Debug, Subcommand)]
pub enum RoutesCommand {
    /// List saved routes.
    List,
    /// Save a route.
    Save {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        route: RouteArgs,

        #[command(flatten)]
        fare: FareArgs,
    },
    /// Delete a saved route by id.
    Delete { id: String },
}
