//! Coordinate and bounds validation commands

use crate::commands::{BoundsArgs, PointArgs};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Report;
use mapprobe::geo::{is_point_in_bounds, validate_bounds, validate_coordinates, Bounds};
use serde_json::json;

/// Reasons a latitude/longitude pair is out of range
#[must_use]
pub fn coordinate_problems(lat: f64, lng: f64) -> Vec<String> {
    let mut problems = Vec::new();
    if !(-90.0..=90.0).contains(&lat) {
        problems.push(format!("latitude {lat} outside [-90, 90]"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        problems.push(format!("longitude {lng} outside [-180, 180]"));
    }
    problems
}

/// Execute the validate command
pub fn execute_validate(args: &PointArgs, config: &CliConfig) -> CliResult<Report> {
    let point = &args.point;
    let valid = validate_coordinates(point.lat, point.lng);
    let problems = coordinate_problems(point.lat, point.lng);

    let mut text = point.format(config.precision());
    if !problems.is_empty() {
        text = format!("{text} ({})", problems.join("; "));
    }
    Ok(Report::verdict(
        valid,
        text,
        json!({ "lat": point.lat, "lng": point.lng, "valid": valid, "problems": problems }),
    ))
}

/// Execute the bounds command
pub fn execute_bounds(args: &BoundsArgs, config: &CliConfig) -> CliResult<Report> {
    let bounds = Bounds::new(args.north, args.south, args.east, args.west);
    let valid = validate_bounds(&bounds);
    let contains = args
        .point
        .as_ref()
        .map(|point| is_point_in_bounds(point.lat, point.lng, &bounds));
    let precision = config.precision();

    let mut text = format!(
        "N {:.precision$} S {:.precision$} E {:.precision$} W {:.precision$}",
        bounds.north, bounds.south, bounds.east, bounds.west
    );
    if valid {
        text.push_str(&format!(", center {}", bounds.center().format(precision)));
    } else {
        text.push_str(" (edges inverted, empty or out of range)");
    }
    if let (Some(point), Some(inside)) = (&args.point, contains) {
        let relation = if inside { "inside" } else { "outside" };
        text.push_str(&format!(", {} {relation}", point.format(precision)));
    }

    Ok(Report::verdict(
        valid && contains.unwrap_or(true),
        text,
        json!({
            "bounds": bounds,
            "valid": valid,
            "center": valid.then(|| bounds.center()),
            "contains_point": contains,
        }),
    ))
}
