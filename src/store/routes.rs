//! Saved routes: named (origin, destination, class, tier) shortcuts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::EliteTier;
use crate::error::AppError;
use crate::store::{KeyValueStore, fresh_id, read_list, write_list};

pub const ROUTES_KEY: &str = "savedRoutes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoute {
    pub id: String,
    pub name: String,
    /// Origin airport code.
    pub origin: String,
    /// Destination airport code.
    pub destination: String,
    pub booking_class: String,
    pub elite_tier: EliteTier,
    pub saved_at: DateTime<Utc>,
}

/// Route fields supplied by the caller; id and timestamp are assigned on save.
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub booking_class: String,
    pub elite_tier: EliteTier,
}

/// Append a route and return it with its assigned id.
pub fn save_route(store: &mut dyn KeyValueStore, route: NewRoute, now: DateTime<Utc>) -> Result<SavedRoute, AppError> {
    let mut routes: Vec<SavedRoute> = read_list(store, ROUTES_KEY)?;
    let id = fresh_id(now.timestamp_millis(), routes.iter().map(|r| r.id.as_str()));
    let saved = SavedRoute {
        id,
        name: route.name,
        origin: route.origin.to_ascii_uppercase(),
        destination: route.destination.to_ascii_uppercase(),
        booking_class: route.booking_class.to_ascii_uppercase(),
        elite_tier: route.elite_tier,
        saved_at: now,
    };
    routes.push(saved.clone());
    write_list(store, ROUTES_KEY, &routes)?;
    Ok(saved)
}

/// Saved routes, oldest first.
pub fn saved_routes(store: &dyn KeyValueStore) -> Result<Vec<SavedRoute>, AppError> {
    read_list(store, ROUTES_KEY)
}

/// Delete a route by id. Returns `false` if no route had that id.
pub fn delete_route(store: &mut dyn KeyValueStore, id: &str) -> Result<bool, AppError> {
    let mut routes: Vec<SavedRoute> = read_list(store, ROUTES_KEY)?;
    let before = routes.len();
    routes.retain(|r| r.id != id);
    if routes.len() == before {
        return Ok(false);
    }
    write_list(store, ROUTES_KEY, &routes)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn new_route(name: &str) -> NewRoute {
        NewRoute {
            name: name.to_string(),
            origin: "jfk".to_string(),
            destination: "lhr".to_string(),
            booking_class: "j".to_string(),
            elite_tier: EliteTier::Gold,
        }
    }

    #[test]
    fn save_list_delete() {
        let mut store = MemoryStore::new();
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

        let first = save_route(&mut store, new_route("work"), now).unwrap();
        let second = save_route(&mut store, new_route("home"), now).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.origin, "JFK");
        assert_eq!(first.booking_class, "J");

        let routes = saved_routes(&store).unwrap();
        assert_eq!(routes, vec![first.clone(), second.clone()]);

        assert!(delete_route(&mut store, &first.id).unwrap());
        assert!(!delete_route(&mut store, &first.id).unwrap());
        assert_eq!(saved_routes(&store).unwrap(), vec![second]);
    }

    #[test]
    fn empty_store_has_no_routes() {
        let store = MemoryStore::new();
        assert!(saved_routes(&store).unwrap().is_empty());
    }
}
