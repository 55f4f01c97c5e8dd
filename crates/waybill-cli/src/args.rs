use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{DriverCommands, FuelCommands, TollCommands, TripCommands, TruckCommands};

/// Bookkeeping for a truck fleet: trucks, drivers, trips and trip expenses
///
/// Trips move from planned to in progress to completed (or cancelled).
/// Starting a trip puts its truck on the road; finishing or cancelling it
/// brings the truck back. Tolls and fuel can only be recorded while a trip
/// is in progress. Run without a subcommand to see the trips on the road.
#[derive(Parser)]
#[command(version, about, name = "waybill")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waybill/waybill.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available command groups
#[derive(Subcommand)]
pub enum Commands {
    /// Manage trucks
    #[command(alias = "tk")]
    Truck {
        #[command(subcommand)]
        command: TruckCommands,
    },
    /// Manage drivers
    #[command(alias = "d")]
    Driver {
        #[command(subcommand)]
        command: DriverCommands,
    },
    /// Plan and run trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Record tolls paid on a trip
    Toll {
        #[command(subcommand)]
        command: TollCommands,
    },
    /// Record refuelling stops on a trip
    #[command(alias = "f")]
    Fuel {
        #[command(subcommand)]
        command: FuelCommands,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["waybill", "trip", "list", "--json", "--no-color"])
            .expect("Global flags are accepted anywhere");
        assert!(args.json);
        assert!(args.no_color);
        assert!(matches!(args.command, Some(Commands::Trip { .. })));
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let args = Args::try_parse_from(["waybill"]).unwrap();
        assert!(args.command.is_none());
    }
}
