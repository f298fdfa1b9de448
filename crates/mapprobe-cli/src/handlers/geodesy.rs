//! Distance, bearing, midpoint, destination and area commands

use crate::commands::{AreaArgs, DestinationArgs, PairArgs, PointList};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Report;
use mapprobe::geo::{
    calculate_bearing, calculate_destination, calculate_distance, calculate_midpoint,
    calculate_polygon_area, Coordinate,
};
use mapprobe::instrument::instrument;
use mapprobe::logging::default_logger;
use serde_json::json;
use std::fmt::Debug;

/// Run `op` once, logging the call at debug level
fn traced<A: Debug, R: Debug>(name: &str, args: A, op: impl Fn(A) -> R) -> R {
    instrument(name, default_logger(), op)(args)
}

/// Execute the distance command
pub fn execute_distance(args: &PairArgs, config: &CliConfig) -> CliResult<Report> {
    let (from, to) = (&args.from, &args.to);
    let km = traced(
        "calculate_distance",
        (from.lat, from.lng, to.lat, to.lng),
        |(a, b, c, d)| calculate_distance(a, b, c, d),
    );
    let precision = config.precision();
    Ok(Report::new(
        format!("{km:.precision$} km"),
        json!({ "from": from, "to": to, "distance_km": km }),
    ))
}

/// Execute the bearing command
pub fn execute_bearing(args: &PairArgs, config: &CliConfig) -> CliResult<Report> {
    let (from, to) = (&args.from, &args.to);
    let bearing = traced(
        "calculate_bearing",
        (from.lat, from.lng, to.lat, to.lng),
        |(a, b, c, d)| calculate_bearing(a, b, c, d),
    );
    let precision = config.precision();
    Ok(Report::new(
        format!("{bearing:.precision$}°"),
        json!({ "from": from, "to": to, "bearing_deg": bearing }),
    ))
}

/// Execute the midpoint command
pub fn execute_midpoint(args: &PairArgs, config: &CliConfig) -> CliResult<Report> {
    let (from, to) = (&args.from, &args.to);
    let midpoint = traced(
        "calculate_midpoint",
        (from.lat, from.lng, to.lat, to.lng),
        |(a, b, c, d)| calculate_midpoint(a, b, c, d),
    );
    Ok(Report::new(
        midpoint.format(config.precision()),
        json!({ "from": from, "to": to, "midpoint": midpoint }),
    ))
}

/// Execute the destination command
pub fn execute_destination(args: &DestinationArgs, config: &CliConfig) -> CliResult<Report> {
    if !args.distance.is_finite() || args.distance < 0.0 {
        return Err(CliError::invalid_argument(format!(
            "distance must be a non-negative number of kilometres, got {}",
            args.distance
        )));
    }
    let start = &args.start;
    let destination = traced(
        "calculate_destination",
        (start.lat, start.lng, args.bearing, args.distance),
        |(a, b, c, d)| calculate_destination(a, b, c, d),
    );
    Ok(Report::new(
        destination.format(config.precision()),
        json!({
            "start": start,
            "bearing_deg": args.bearing,
            "distance_km": args.distance,
            "destination": destination,
        }),
    ))
}

/// Vertices from `--points` or the JSON file named by `--file`
pub fn load_vertices(args: &AreaArgs) -> CliResult<Vec<Coordinate>> {
    match (&args.points, &args.file) {
        (Some(PointList(points)), _) => Ok(points.clone()),
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        (None, None) => Err(CliError::invalid_argument(
            "either --file or --points is required",
        )),
    }
}

/// Execute the area command
pub fn execute_area(args: &AreaArgs, config: &CliConfig) -> CliResult<Report> {
    let vertices = load_vertices(args)?;
    if vertices.len() < 3 {
        tracing::warn!(
            vertices = vertices.len(),
            "fewer than three vertices enclose no area"
        );
    }
    let area = traced("calculate_polygon_area", vertices.as_slice(), calculate_polygon_area);
    let precision = config.precision();
    Ok(Report::new(
        format!("{area:.precision$} km²"),
        json!({ "vertices": vertices.len(), "area_km2": area }),
    ))
}
