//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - sets up logging and configuration
//! - parses CLI arguments
//! - runs comparisons and catalog queries
//! - prints reports and writes optional exports
//! - manages saved routes and history

use chrono::Utc;
use clap::Parser;

use crate::cli::{Command, CompareArgs, RouteArgs, RoutesCommand};
use crate::config::{Config, LOG_ENV};
use crate::data::{Catalog, search_airlines, search_airports, search_programs};
use crate::domain::EliteTier;
use crate::error::AppError;
use crate::store::{FileStore, NewRoute};

pub mod pipeline;

use pipeline::ProgramSelection;

/// Entry point for the `miles` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let cli = crate::cli::Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Compare(args) => handle_compare(&config, args),
        Command::Distance(args) => handle_distance(&config, &args),
        Command::Airports { query } => handle_airports(&config, &query),
        Command::Airlines { query } => handle_airlines(&config, &query),
        Command::Programs { query } => handle_programs(&config, query.as_deref()),
        Command::Routes(cmd) => handle_routes(&config, cmd),
        Command::History { clear } => handle_history(&config, clear),
        Command::Show { path } => {
            let summary = crate::io::read_summary_json(&path)?;
            println!("{}", crate::report::format_comparison(&summary.request(), &summary.comparison));
            Ok(())
        }
    }
}

fn init_logging() {
    let env = env_logger::Env::new().filter_or(LOG_ENV, "warn");
    // A second init (tests, embedding) is harmless.
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

fn handle_compare(config: &Config, args: CompareArgs) -> Result<(), AppError> {
    let catalog = config.load_catalog()?;
    let request = catalog.flight_request(
        Some(&args.route.from),
        Some(&args.route.to),
        &args.fare.booking_class(),
        args.fare.tier,
        args.price,
    )?;
    let selection = ProgramSelection::from_filters(args.programs, args.alliance, args.all, args.top);
    let run = pipeline::run_compare(&catalog, request, &selection)?;

    println!("{}", crate::report::format_comparison(&run.request, &run.comparison));
    if args.by_tier && !run.comparison.results.is_empty() {
        println!("Miles by elite tier");
        println!("{}", crate::report::format_tier_table(&pipeline::tier_breakdown(&run)));
    }

    let now = Utc::now();
    if let Some(requested) = &args.export {
        let path = crate::io::csv_export_path(requested.as_deref(), &run.request);
        crate::io::write_results_csv(&path, &run.request, &run.comparison)?;
        eprintln!("Wrote {}", path.display());
    }
    if let Some(path) = &args.export_json {
        let summary = crate::io::build_summary(&run.request, &run.comparison, now);
        crate::io::write_summary_json(path, &summary)?;
        eprintln!("Wrote {}", path.display());
    }
    if let Some(path) = &args.report {
        let text = crate::report::format_printable_report(&run.request, &run.comparison, now);
        crate::io::write_text_report(path, &text)?;
        eprintln!("Wrote {}", path.display());
    }
    if args.save_history {
        let mut store = FileStore::new(&config.store_path);
        match crate::store::record_history(&mut store, &run.request, &run.comparison, now)? {
            Some(_) => log::info!("recorded calculation in {}", store.path().display()),
            None => eprintln!("Nothing ranked; history not updated."),
        }
    }

    Ok(())
}

fn handle_distance(config: &Config, args: &RouteArgs) -> Result<(), AppError> {
    let catalog = config.load_catalog()?;
    let request = catalog.flight_request(Some(&args.from), Some(&args.to), "Y", EliteTier::None, None)?;
    println!(
        "{} -> {}: {} nautical miles",
        request.origin.label(),
        request.destination.label(),
        crate::report::format_miles(request.distance_nm())
    );
    Ok(())
}

fn handle_airports(config: &Config, query: &str) -> Result<(), AppError> {
    let catalog = config.load_catalog()?;
    let found = search_airports(&catalog.airports, query);
    if found.is_empty() {
        println!("No airports match '{query}'.");
    } else {
        print!("{}", crate::report::format_airports(&found));
    }
    Ok(())
}

fn handle_airlines(config: &Config, query: &str) -> Result<(), AppError> {
    let catalog = config.load_catalog()?;
    let found = search_airlines(&catalog.airlines, query);
    if found.is_empty() {
        println!("No airlines match '{query}'.");
    } else {
        print!("{}", crate::report::format_airlines(&found));
    }
    Ok(())
}

fn handle_programs(config: &Config, query: Option<&str>) -> Result<(), AppError> {
    let catalog = config.load_catalog()?;
    let found: Vec<_> = match query {
        Some(q) => search_programs(&catalog.programs, q),
        None => catalog.programs.iter().collect(),
    };
    if found.is_empty() {
        println!("No programs match '{}'.", query.unwrap_or_default());
    } else {
        print!("{}", crate::report::format_programs(&found));
    }
    Ok(())
}

fn handle_routes(config: &Config, cmd: RoutesCommand) -> Result<(), AppError> {
    let mut store = FileStore::new(&config.store_path);
    match cmd {
        RoutesCommand::List => {
            let routes = crate::store::saved_routes(&store)?;
            print!("{}", crate::report::format_routes(&routes));
        }
        RoutesCommand::Save { name, route, fare } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::invalid_request("route name must not be empty"));
            }
            validate_route(&config.load_catalog()?, &route)?;
            let saved = crate::store::save_route(
                &mut store,
                NewRoute {
                    name,
                    origin: route.from,
                    destination: route.to,
                    booking_class: fare.booking_class(),
                    elite_tier: fare.tier,
                },
                Utc::now(),
            )?;
            println!("Saved route {} ({}).", saved.id, saved.name);
        }
        RoutesCommand::Delete { id } => {
            if crate::store::delete_route(&mut store, &id)? {
                println!("Deleted route {id}.");
            } else {
                return Err(AppError::new(2, format!("No saved route with id '{id}'.")));
            }
        }
    }
    Ok(())
}

/// Saved routes must refer to known airports.
fn validate_route(catalog: &Catalog, route: &RouteArgs) -> Result<(), AppError> {
    catalog
        .flight_request(Some(&route.from), Some(&route.to), "Y", EliteTier::None, None)
        .map(|_| ())
}

fn handle_history(config: &Config, clear: bool) -> Result<(), AppError> {
    let mut store = FileStore::new(&config.store_path);
    if clear {
        crate::store::clear_history(&mut store)?;
        println!("History cleared.");
        return Ok(());
    }
    let entries = crate::store::history(&store)?;
    print!("{}", crate::report::format_history(&entries));
    Ok(())
}
