//! Environment configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file:
//!
//! - `MILES_AIRPORTS` / `MILES_PROGRAMS`: catalog JSON files (both or neither)
//! - `MILES_STORE`: file backing saved routes and history
//!
//! The log filter (`MILES_LOG`) is read by `app::run` directly.

use std::path::PathBuf;

use crate::data::Catalog;
use crate::error::AppError;

pub const DEFAULT_STORE_PATH: &str = "miles-store.json";
pub const LOG_ENV: &str = "MILES_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `(airports, programs)` override for the built-in catalog.
    pub catalog_paths: Option<(PathBuf, PathBuf)>,
    pub store_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let catalog_paths = match (var("MILES_AIRPORTS"), var("MILES_PROGRAMS")) {
            (Some(airports), Some(programs)) => Some((PathBuf::from(airports), PathBuf::from(programs))),
            (None, None) => None,
            (Some(_), None) => {
                return Err(AppError::new(2, "MILES_AIRPORTS is set but MILES_PROGRAMS is not."));
            }
            (None, Some(_)) => {
                return Err(AppError::new(2, "MILES_PROGRAMS is set but MILES_AIRPORTS is not."));
            }
        };

        let store_path = var("MILES_STORE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        Ok(Self {
            catalog_paths,
            store_path,
        })
    }

    /// The configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog, AppError> {
        match &self.catalog_paths {
            Some((airports, programs)) => Catalog::from_paths(airports, programs),
            None => Catalog::builtin(),
        }
    }
}
