//! Waybill CLI Application
//!
//! Command-line interface for the waybill fleet bookkeeping tool.

mod args;
mod cli;
mod commands;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use commands::Cli;
use log::info;
use renderer::TerminalRenderer;
use waybill_core::{params::ListTrips, ErrorKind, FleetBuilder, FleetError};
use Commands::*;

/// Process exit code for a failed command, derived from the fleet error kind.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<FleetError>().map(FleetError::kind) {
        Some(ErrorKind::NotFound) => 3,
        Some(ErrorKind::InvalidOperation) => 4,
        _ => 1,
    }
}

async fn run(args: Args) -> Result<()> {
    let Args {
        database_file,
        no_color,
        json,
        command,
    } = args;

    let fleet = FleetBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize fleet")?;

    info!("Waybill started on {}", fleet.database_path().display());

    let cli = Cli::new(fleet, TerminalRenderer::new(!no_color), json);

    match command {
        Some(Truck { command }) => cli.handle_truck_command(command).await,
        Some(Driver { command }) => cli.handle_driver_command(command).await,
        Some(Trip { command }) => cli.handle_trip_command(command).await,
        Some(Toll { command }) => cli.handle_toll_command(command).await,
        Some(Fuel { command }) => cli.handle_fuel_command(command).await,
        None => {
            cli.list_trips(&ListTrips {
                in_progress: true,
                ..Default::default()
            })
            .await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
