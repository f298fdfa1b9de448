//! CLI command definitions using clap

use crate::output::OutputFormat;
use clap::{builder::RangedU64ValueParser, Args, Parser, Subcommand};
use mapprobe::{Coordinate, MAX_PRECISION};
use std::path::PathBuf;

/// Mapprobe: geodesy checks for Leaflet map testing
#[derive(Parser, Debug)]
#[command(name = "mapprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Configuration file (.yaml, .yml or .json)
    #[arg(long, env = "MAPPROBE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Great-circle distance between two points in kilometres
    Distance(PairArgs),

    /// Initial bearing from the first point to the second
    Bearing(PairArgs),

    /// Great-circle midpoint of two points
    Midpoint(PairArgs),

    /// Point reached from a start along a bearing for a distance
    Destination(DestinationArgs),

    /// Area of a polygon in square kilometres
    Area(AreaArgs),

    /// Convert decimal degrees to degrees-minutes-seconds
    Dms(DmsArgs),

    /// Convert degrees-minutes-seconds to decimal degrees
    FromDms(FromDmsArgs),

    /// Fold a longitude into [-180, 180] or clamp a latitude into [-90, 90]
    Normalize(NormalizeArgs),

    /// Check that a coordinate is in range (exit code 2 if not)
    Validate(PointArgs),

    /// Check a bounding box, optionally containing a point (exit code 2 if not)
    Bounds(BoundsArgs),

    /// Format a coordinate as fixed-point or DMS text
    Format(FormatArgs),

    /// Show the effective configuration
    Config,
}

/// Two points, each as `lat,lng`
#[derive(Args, Debug)]
pub struct PairArgs {
    /// First point (lat,lng)
    #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub from: Coordinate,

    /// Second point (lat,lng)
    #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub to: Coordinate,
}

/// A single point as `lat,lng`
#[derive(Args, Debug)]
pub struct PointArgs {
    /// Point (lat,lng)
    #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub point: Coordinate,
}

/// Arguments for the destination command
#[derive(Args, Debug)]
pub struct DestinationArgs {
    /// Start point (lat,lng)
    #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub start: Coordinate,

    /// Initial bearing in degrees clockwise from north
    #[arg(short, long, allow_negative_numbers = true)]
    pub bearing: f64,

    /// Distance in kilometres
    #[arg(short, long)]
    pub distance: f64,
}

/// Arguments for the area command
#[derive(Args, Debug)]
pub struct AreaArgs {
    /// JSON file holding an array of {"lat": .., "lng": ..} objects
    #[arg(long, conflicts_with = "points", required_unless_present = "points")]
    pub file: Option<PathBuf>,

    /// Inline vertices: "lat,lng;lat,lng;..."
    #[arg(long, value_parser = parse_points, allow_hyphen_values = true)]
    pub points: Option<PointList>,
}

/// Polygon vertices given inline on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct PointList(pub Vec<Coordinate>);

/// Arguments for the dms command
#[derive(Args, Debug)]
pub struct DmsArgs {
    /// Decimal degrees
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    /// Treat the value as a longitude (E/W instead of N/S)
    #[arg(long)]
    pub longitude: bool,
}

/// Arguments for the from-dms command
#[derive(Args, Debug)]
pub struct FromDmsArgs {
    /// DMS text such as 37°46'29.64"N
    pub value: String,
}

/// Arguments for the normalize command
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Angle in degrees
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    /// Clamp as a latitude instead of folding as a longitude
    #[arg(long)]
    pub latitude: bool,
}

/// Arguments for the bounds command
#[derive(Args, Debug)]
pub struct BoundsArgs {
    /// Northern edge
    #[arg(long, allow_negative_numbers = true)]
    pub north: f64,

    /// Southern edge
    #[arg(long, allow_negative_numbers = true)]
    pub south: f64,

    /// Eastern edge
    #[arg(long, allow_negative_numbers = true)]
    pub east: f64,

    /// Western edge
    #[arg(long, allow_negative_numbers = true)]
    pub west: f64,

    /// Point that must lie inside the box (lat,lng)
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub point: Option<Coordinate>,
}

/// Arguments for the format command
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Point (lat,lng)
    #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub point: Coordinate,

    /// Decimals (defaults to the configured precision)
    #[arg(
        short,
        long,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_PRECISION as u64)
    )]
    pub precision: Option<usize>,

    /// Use degrees-minutes-seconds notation
    #[arg(long)]
    pub dms: bool,
}

/// Parse `lat,lng` into a coordinate
pub fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'lat,lng', got '{s}'"))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad latitude '{}': {e}", lat.trim()))?;
    let lng = lng
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad longitude '{}': {e}", lng.trim()))?;
    Ok(Coordinate::new(lat, lng))
}

/// Parse `lat,lng;lat,lng;...` into a list of coordinates
pub fn parse_points(s: &str) -> Result<PointList, String> {
    s.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_coordinate)
        .collect::<Result<Vec<_>, _>>()
        .map(PointList)
}
