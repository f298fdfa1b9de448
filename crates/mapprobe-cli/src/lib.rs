//! Mapprobe CLI Library
//!
//! Command-line front-end for the mapprobe geodesy functions: parse
//! coordinates, run a calculation or check, render text or JSON.

#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{
    parse_coordinate, parse_points, AreaArgs, BoundsArgs, Cli, Commands, DestinationArgs, DmsArgs,
    FormatArgs, FromDmsArgs, NormalizeArgs, PairArgs, PointArgs, PointList,
};
pub use config::{CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Report};
