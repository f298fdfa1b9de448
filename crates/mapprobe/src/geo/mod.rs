//! Geodesy for map assertions
//!
//! Pure, deterministic geographic math used to validate and reason about the
//! coordinates a live map reports: great-circle distance, bearing, midpoint,
//! destination projection, spherical polygon area, normalization and DMS
//! notation.
//!
//! Every function takes and returns degrees (distances in kilometres) and
//! never fails for finite input. Range problems are reported by the
//! validators as `false`, never as errors.
//!
//! ```
//! use mapprobe::geo::{calculate_distance, validate_coordinates};
//!
//! assert!(validate_coordinates(37.7749, -122.4194));
//! let km = calculate_distance(37.7749, -122.4194, 40.7128, -74.0060);
//! assert!(km > 4100.0 && km < 4200.0);
//! ```

mod dms;
mod sphere;
mod validate;

pub use dms::{format_coordinates, from_dms, to_dms, to_dms_parts, Dms, Hemisphere};
pub use sphere::{
    calculate_bearing, calculate_destination, calculate_distance, calculate_midpoint,
    calculate_polygon_area,
};
pub use validate::{
    is_point_in_bounds, normalize_latitude, normalize_longitude, validate_bounds,
    validate_coordinates,
};

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default number of decimals used when formatting coordinates
pub const DEFAULT_PRECISION: usize = 4;

/// Most decimals ever printed; an f64 carries no more than 17 significant digits
pub const MAX_PRECISION: usize = 17;

/// A latitude/longitude pair in degrees, optionally named.
///
/// The type does not enforce the valid range; use [`Coordinate::is_valid`]
/// or [`validate_coordinates`] to check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    #[serde(alias = "latitude")]
    pub lat: f64,
    /// Longitude in degrees
    #[serde(alias = "lon", alias = "longitude")]
    pub lng: f64,
    /// Optional label (e.g. a city or marker name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Coordinate {
    /// Create an unnamed coordinate
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            name: None,
        }
    }

    /// Create a named coordinate
    #[must_use]
    pub fn named(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: Some(name.into()),
        }
    }

    /// Whether latitude and longitude are within range
    #[must_use]
    pub fn is_valid(&self) -> bool {
        validate_coordinates(self.lat, self.lng)
    }

    /// Great-circle distance to `other` in kilometres
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        calculate_distance(self.lat, self.lng, other.lat, other.lng)
    }

    /// Initial bearing towards `other` in degrees, `[0, 360)`
    #[must_use]
    pub fn bearing_to(&self, other: &Self) -> f64 {
        calculate_bearing(self.lat, self.lng, other.lat, other.lng)
    }

    /// Great-circle midpoint between `self` and `other`
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        calculate_midpoint(self.lat, self.lng, other.lat, other.lng)
    }

    /// Point reached by travelling `distance_km` on `bearing_deg`
    #[must_use]
    pub fn destination(&self, bearing_deg: f64, distance_km: f64) -> Self {
        calculate_destination(self.lat, self.lng, bearing_deg, distance_km)
    }

    /// Copy with latitude clamped and longitude folded into range
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            lat: normalize_latitude(self.lat),
            lng: normalize_longitude(self.lng),
            name: self.name.clone(),
        }
    }

    /// Fixed-point `"lat, lng"` representation
    #[must_use]
    pub fn format(&self, precision: usize) -> String {
        format_coordinates(self.lat, self.lng, precision)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({})", self.format(DEFAULT_PRECISION)),
            None => f.write_str(&self.format(DEFAULT_PRECISION)),
        }
    }
}

/// A latitude/longitude bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Northern edge (latitude)
    pub north: f64,
    /// Southern edge (latitude)
    pub south: f64,
    /// Eastern edge (longitude)
    pub east: f64,
    /// Western edge (longitude)
    pub west: f64,
}

impl Bounds {
    /// Create bounds from its four edges
    #[must_use]
    pub const fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Create bounds from south-west and north-east corners (Leaflet order)
    #[must_use]
    pub const fn from_corners(south_west: &Coordinate, north_east: &Coordinate) -> Self {
        Self {
            north: north_east.lat,
            south: south_west.lat,
            east: north_east.lng,
            west: south_west.lng,
        }
    }

    /// Whether the point lies inside or on the edge of the box
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        is_point_in_bounds(lat, lng, self)
    }

    /// Whether the box is well-formed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        validate_bounds(self)
    }

    /// Arithmetic center of the box
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod coordinate_tests {
        use super::*;

        #[test]
        fn test_named_coordinate_display() {
            let sf = Coordinate::named(37.7749, -122.4194, "San Francisco");
            assert_eq!(sf.to_string(), "San Francisco (37.7749, -122.4194)");
        }

        #[test]
        fn test_unnamed_coordinate_display() {
            assert_eq!(Coordinate::new(1.5, -2.25).to_string(), "1.5000, -2.2500");
        }

        #[test]
        fn test_methods_delegate_to_free_functions() {
            let a = Coordinate::new(51.5074, -0.1278);
            let b = Coordinate::new(48.8566, 2.3522);
            assert_eq!(
                a.distance_to(&b),
                calculate_distance(a.lat, a.lng, b.lat, b.lng)
            );
            assert_eq!(a.bearing_to(&b), calculate_bearing(a.lat, a.lng, b.lat, b.lng));
        }

        #[test]
        fn test_normalized_keeps_name() {
            let c = Coordinate::named(95.0, 200.0, "off map").normalized();
            assert_eq!(c.lat, 90.0);
            assert_eq!(c.lng, -160.0);
            assert_eq!(c.name.as_deref(), Some("off map"));
        }

        #[test]
        fn test_deserialize_aliases() {
            let c: Coordinate = serde_json::from_str(r#"{"latitude": 1.0, "lon": 2.0}"#).unwrap();
            assert_eq!(c, Coordinate::new(1.0, 2.0));
        }

        #[test]
        fn test_serialize_skips_missing_name() {
            let json = serde_json::to_string(&Coordinate::new(1.0, 2.0)).unwrap();
            assert!(!json.contains("name"));
        }
    }

    mod bounds_tests {
        use super::*;

        #[test]
        fn test_from_corners() {
            let sw = Coordinate::new(37.70, -122.52);
            let ne = Coordinate::new(37.83, -122.35);
            let bounds = Bounds::from_corners(&sw, &ne);
            assert_eq!(bounds, Bounds::new(37.83, 37.70, -122.35, -122.52));
            assert!(bounds.is_valid());
        }

        #[test]
        fn test_center_and_contains() {
            let bounds = Bounds::new(10.0, -10.0, 20.0, -20.0);
            let center = bounds.center();
            assert_eq!((center.lat, center.lng), (0.0, 0.0));
            assert!(bounds.contains(center.lat, center.lng));
            assert!(!bounds.contains(11.0, 0.0));
        }
    }
}
