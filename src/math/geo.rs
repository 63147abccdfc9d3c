//! Great-circle distance (haversine).
//!
//! ```text
//! a = sin²(Δlat/2) + cos(lat1) · cos(lat2) · sin²(Δlon/2)
//! c = 2 · atan2(√a, √(1 - a))
//! d = R · c
//! ```
//!
//! Numerical notes:
//! - For coincident or antipodal points `a` can drift just outside `[0, 1]`,
//!   which would make one of the square roots NaN. `a` is clamped first.
//! - A NaN `a` (NaN coordinates) is treated as `0` so callers get a finite
//!   result instead of a panic further down.

use crate::domain::Coordinate;
use crate::math::round_half_up;

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Distance between two coordinates in whole nautical miles.
pub fn distance_nm(origin: Coordinate, destination: Coordinate) -> u32 {
    let raw = distance_nm_exact(origin, destination);
    round_half_up(raw) as u32
}

/// Unrounded haversine distance in nautical miles.
pub fn distance_nm_exact(origin: Coordinate, destination: Coordinate) -> f64 {
    let lat1 = origin.lat.to_radians();
    let lat2 = destination.lat.to_radians();
    let d_lat = (destination.lat - origin.lat).to_radians();
    let d_lon = (destination.lon - origin.lon).to_radians();

    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();
    let a = half_lat * half_lat + lat1.cos() * lat2.cos() * half_lon * half_lon;
    let a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_NM * c
}
