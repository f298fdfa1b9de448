//! Command handlers - extracted from main.rs for testability
//!
//! Each handler turns parsed arguments into a [`Report`]; printing and exit
//! codes are left to the binary.

pub mod checks;
pub mod config;
pub mod geodesy;
pub mod notation;

pub use checks::{coordinate_problems, execute_bounds, execute_validate};
pub use config::execute_config;
pub use geodesy::{
    execute_area, execute_bearing, execute_destination, execute_distance, execute_midpoint,
    load_vertices,
};
pub use notation::{execute_dms, execute_format, execute_from_dms, execute_normalize};

use crate::commands::Commands;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Report;

/// Dispatch a parsed subcommand to its handler
pub fn execute(command: &Commands, config: &CliConfig) -> CliResult<Report> {
    match command {
        Commands::Distance(args) => execute_distance(args, config),
        Commands::Bearing(args) => execute_bearing(args, config),
        Commands::Midpoint(args) => execute_midpoint(args, config),
        Commands::Destination(args) => execute_destination(args, config),
        Commands::Area(args) => execute_area(args, config),
        Commands::Dms(args) => execute_dms(args),
        Commands::FromDms(args) => execute_from_dms(args, config),
        Commands::Normalize(args) => execute_normalize(args),
        Commands::Validate(args) => execute_validate(args, config),
        Commands::Bounds(args) => execute_bounds(args, config),
        Commands::Format(args) => execute_format(args, config),
        Commands::Config => execute_config(config),
    }
}
