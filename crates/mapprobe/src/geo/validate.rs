//! Range validation, containment and normalization.

use super::Bounds;

/// Whether `lat` is in `[-90, 90]` and `lng` in `[-180, 180]`, inclusive.
#[must_use]
pub fn validate_coordinates(lat: f64, lng: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

/// Whether the point lies within `bounds`, edges included.
///
/// The bounds themselves are not validated; an inverted box contains nothing.
#[must_use]
pub fn is_point_in_bounds(lat: f64, lng: f64, bounds: &Bounds) -> bool {
    lat >= bounds.south && lat <= bounds.north && lng >= bounds.west && lng <= bounds.east
}

/// Whether `bounds` is a non-empty, non-inverted box of valid corners.
#[must_use]
pub fn validate_bounds(bounds: &Bounds) -> bool {
    bounds.north > bounds.south
        && bounds.east > bounds.west
        && validate_coordinates(bounds.north, bounds.east)
        && validate_coordinates(bounds.south, bounds.west)
}

/// Fold a longitude into `[-180, 180]` by whole turns.
///
/// Values already in range (including exactly ±180) are returned unchanged.
/// Non-finite input is returned as is.
#[must_use]
pub fn normalize_longitude(lng: f64) -> f64 {
    if !lng.is_finite() {
        return lng;
    }
    if lng > 180.0 {
        lng - 360.0 * ((lng - 180.0) / 360.0).ceil()
    } else if lng < -180.0 {
        lng + 360.0 * ((-180.0 - lng) / 360.0).ceil()
    } else {
        lng
    }
}

/// Clamp a latitude into `[-90, 90]`.
#[must_use]
pub fn normalize_latitude(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}
