//! Rounding helpers.
//!
//! Mile totals and distances round half up (towards +∞ on exact `.5`), which
//! differs from `f64::round` on negative halves and from banker's rounding on
//! positive ones.

/// Round to the nearest integer, ties towards positive infinity.
///
/// NaN and infinities are returned unchanged.
pub fn round_half_up(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Round a non-negative mile amount to a whole number of miles.
///
/// Negative and NaN amounts become `0`. Returns `None` when the rounded
/// amount does not fit in a `u32`.
pub fn round_miles(x: f64) -> Option<u32> {
    let rounded = round_half_up(x);
    if rounded.is_nan() || rounded <= 0.0 {
        Some(0)
    } else if rounded > f64::from(u32::MAX) {
        None
    } else {
        Some(rounded as u32)
    }
}
