//! Spherical-earth computations (R = 6371 km).

use super::validate::normalize_longitude;
use super::{Coordinate, EARTH_RADIUS_KM};

/// Below this magnitude the averaged direction vector of two points is
/// treated as zero (the points are antipodal).
const ANTIPODAL_EPSILON: f64 = 1e-12;

/// Haversine great-circle distance in kilometres.
///
/// Symmetric in its two points and exactly zero for identical points.
#[must_use]
pub fn calculate_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Initial great-circle bearing from point 1 to point 2, in `[0, 360)`.
#[must_use]
pub fn calculate_bearing(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    let bearing = (y.atan2(x).to_degrees() + 360.0) % 360.0;
    // -0.0 and values that round up to exactly 360 both belong at 0.
    if bearing >= 360.0 || bearing == 0.0 {
        0.0
    } else {
        bearing
    }
}

/// Midpoint of the great-circle segment between two points.
///
/// Averages the two unit vectors and converts the result back to
/// latitude/longitude. For antipodal points every great circle through them
/// is equally short; the midpoint returned is then the one on the meridian
/// through point 1, a quarter circumference north of it.
#[must_use]
pub fn calculate_midpoint(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Coordinate {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let lambda1 = lng1.to_radians();
    let lambda2 = lng2.to_radians();

    let x = phi1.cos() * lambda1.cos() + phi2.cos() * lambda2.cos();
    let y = phi1.cos() * lambda1.sin() + phi2.cos() * lambda2.sin();
    let z = phi1.sin() + phi2.sin();

    if (x * x + y * y + z * z).sqrt() < ANTIPODAL_EPSILON {
        let quarter_circumference = std::f64::consts::FRAC_PI_2 * EARTH_RADIUS_KM;
        return calculate_destination(lat1, lng1, 0.0, quarter_circumference);
    }

    let lat = z.atan2(x.hypot(y));
    let lng = y.atan2(x);
    Coordinate::new(lat.to_degrees(), lng.to_degrees())
}

/// Point reached from `(lat, lng)` by travelling `distance_km` along the
/// great circle with initial bearing `bearing_deg`.
///
/// Inverse of [`calculate_distance`] and [`calculate_bearing`]: projecting
/// from A by `(bearing(A, B), distance(A, B))` lands on B.
#[must_use]
pub fn calculate_destination(lat: f64, lng: f64, bearing_deg: f64, distance_km: f64) -> Coordinate {
    let phi1 = lat.to_radians();
    let lambda1 = lng.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let sin_phi2 =
        (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).clamp(-1.0, 1.0);
    let phi2 = sin_phi2.asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

    Coordinate::new(phi2.to_degrees(), normalize_longitude(lambda2.to_degrees()))
}

/// Area in square kilometres of the spherical polygon through `coordinates`.
///
/// The ring is closed implicitly (last vertex joins the first). Fewer than
/// three vertices enclose nothing and yield 0.
#[must_use]
pub fn calculate_polygon_area(coordinates: &[Coordinate]) -> f64 {
    if coordinates.len() < 3 {
        return 0.0;
    }

    let sum: f64 = coordinates
        .iter()
        .zip(coordinates.iter().cycle().skip(1))
        .map(|(p1, p2)| {
            (p2.lng - p1.lng).to_radians()
                * (2.0 + p1.lat.to_radians().sin() + p2.lat.to_radians().sin())
        })
        .sum();

    (sum * EARTH_RADIUS_KM * EARTH_RADIUS_KM / 2.0).abs()
}
