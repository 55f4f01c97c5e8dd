//! Command handlers bridging parsed arguments to the fleet.
//!
//! Each handler converts its clap arguments into core parameters, calls the
//! [`Fleet`] and prints the outcome either as rendered markdown or, with
//! `--json`, as pretty-printed JSON of the affected records.

use std::fmt::Display;

use anyhow::Result;
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use waybill_core::{
    params::{Id, ListDrivers, ListTrips, ListTrucks},
    CreateResult, DeleteResult, Drivers, Fleet, FuelRecords, Tolls, Trip, TripStatus, Trips,
    Trucks, UpdateResult,
};

use crate::{
    cli::{DriverCommands, FuelCommands, TollCommands, TripCommands, TruckCommands},
    renderer::TerminalRenderer,
};

/// Dispatches CLI commands against a fleet.
pub struct Cli {
    fleet: Fleet,
    renderer: TerminalRenderer,
    json: bool,
}

/// Describes what a lifecycle transition changed, for the update summary.
fn transition_changes(before: TripStatus, trip: &Trip) -> Vec<String> {
    let mut changes = vec![format!("Status: {} → {}", before, trip.status)];
    match (before, trip.status) {
        (TripStatus::Planned, TripStatus::InProgress) => {
            changes.push(format!("Truck {}: on_trip", trip.truck_id));
        }
        (TripStatus::InProgress, TripStatus::Completed | TripStatus::Cancelled) => {
            changes.push(format!("Truck {}: available", trip.truck_id));
        }
        _ => {}
    }
    changes
}

fn listing(title: &str, body: impl Display) -> String {
    format!("# {title}\n\n{body}")
}

/// Footer total of a listing; overflow is shown rather than panicking.
fn total(values: impl IntoIterator<Item = Decimal>) -> String {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .map_or_else(|| "out of range".to_string(), |sum| sum.to_string())
}

impl Cli {
    pub fn new(fleet: Fleet, renderer: TerminalRenderer, json: bool) -> Self {
        Self {
            fleet,
            renderer,
            json,
        }
    }

    /// Prints either the markdown view or the JSON form of `data`.
    fn emit<D: Serialize + ?Sized>(&self, markdown: impl Display, data: &D) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(data)?);
            Ok(())
        } else {
            self.renderer.render(&markdown.to_string())
        }
    }

    pub async fn handle_truck_command(&self, command: TruckCommands) -> Result<()> {
        match command {
            TruckCommands::Create(args) => {
                let truck = self.fleet.create_truck(&args.into()).await?;
                self.emit(CreateResult::new(truck.clone()), &truck)
            }
            TruckCommands::List(args) => {
                let params: ListTrucks = args.into();
                debug!("list_trucks: {params:?}");
                let trucks = self.fleet.list_trucks(&params).await?;
                let title = if params.available {
                    "Available Trucks"
                } else {
                    "Trucks"
                };
                self.emit(listing(title, Trucks(trucks.clone())), &trucks)
            }
            TruckCommands::Show(args) => {
                let truck = self.fleet.get_truck(&args.into()).await?;
                self.emit(&truck, &truck)
            }
            TruckCommands::Update(args) => {
                let truck = self.fleet.update_truck(&args.into()).await?;
                self.emit(UpdateResult::new(truck.clone()), &truck)
            }
            TruckCommands::Delete(args) => {
                let truck = self.fleet.delete_truck(&args.into()).await?;
                self.emit(DeleteResult::new(truck.clone()), &truck)
            }
        }
    }

    pub async fn handle_driver_command(&self, command: DriverCommands) -> Result<()> {
        match command {
            DriverCommands::Create(args) => {
                let driver = self.fleet.create_driver(&args.into()).await?;
                self.emit(CreateResult::new(driver.clone()), &driver)
            }
            DriverCommands::List(args) => {
                let params: ListDrivers = args.into();
                debug!("list_drivers: {params:?}");
                let drivers = self.fleet.list_drivers(&params).await?;
                let title = if params.valid_license {
                    "Drivers With Valid License"
                } else {
                    "Drivers"
                };
                self.emit(listing(title, Drivers(drivers.clone())), &drivers)
            }
            DriverCommands::Show(args) => {
                let driver = self.fleet.get_driver(&args.into()).await?;
                self.emit(&driver, &driver)
            }
            DriverCommands::Update(args) => {
                let driver = self.fleet.update_driver(&args.into()).await?;
                self.emit(UpdateResult::new(driver.clone()), &driver)
            }
            DriverCommands::Delete(args) => {
                let driver = self.fleet.delete_driver(&args.into()).await?;
                self.emit(DeleteResult::new(driver.clone()), &driver)
            }
        }
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        match command {
            TripCommands::Create(args) => {
                let trip = self.fleet.create_trip(&args.into()).await?;
                self.emit(CreateResult::new(trip.clone()), &trip)
            }
            TripCommands::List(args) => self.list_trips(&args.into()).await,
            TripCommands::Show(args) => {
                let details = self.fleet.get_trip_details(&args.into()).await?;
                self.emit(&details, &details)
            }
            TripCommands::Update(args) => {
                let trip = self.fleet.update_trip(&args.into()).await?;
                self.emit(UpdateResult::new(trip.clone()), &trip)
            }
            TripCommands::Start(args) => {
                let trip = self.fleet.start_trip(&args.into()).await?;
                let changes = transition_changes(TripStatus::Planned, &trip);
                self.emit(UpdateResult::with_changes(trip.clone(), changes), &trip)
            }
            TripCommands::Finish(args) => {
                let trip = self.fleet.finish_trip(&args.into()).await?;
                let changes = transition_changes(TripStatus::InProgress, &trip);
                self.emit(UpdateResult::with_changes(trip.clone(), changes), &trip)
            }
            TripCommands::Cancel(args) => {
                let params: Id = args.into();
                let before = self.fleet.get_trip(&params).await?.status;
                let trip = self.fleet.cancel_trip(&params).await?;
                let changes = transition_changes(before, &trip);
                self.emit(UpdateResult::with_changes(trip.clone(), changes), &trip)
            }
            TripCommands::Delete(args) => {
                let trip = self.fleet.delete_trip(&args.into()).await?;
                self.emit(DeleteResult::new(trip.clone()), &trip)
            }
            TripCommands::Expenses(args) => {
                let expenses = self.fleet.trip_expenses(&args.into()).await?;
                let data = serde_json::json!({
                    "trip_id": expenses.trip_id,
                    "distance_km": expenses.distance_km,
                    "toll_total": expenses.toll_total,
                    "fuel_total": expenses.fuel_total,
                    "fuel_liters": expenses.fuel_liters,
                    "grand_total": expenses.grand_total(),
                    "cost_per_km": expenses.cost_per_km(),
                });
                self.emit(&expenses, &data)
            }
        }
    }

    pub async fn handle_toll_command(&self, command: TollCommands) -> Result<()> {
        match command {
            TollCommands::Add(args) => {
                let toll = self.fleet.create_toll(&args.into()).await?;
                self.emit(CreateResult::new(toll.clone()), &toll)
            }
            TollCommands::List(args) => {
                let (title, tolls) = match args.trip_id {
                    Some(id) => (
                        format!("Tolls for Trip {id}"),
                        self.fleet.list_trip_tolls(&Id { id }).await?,
                    ),
                    None => ("Tolls".to_string(), self.fleet.list_tolls().await?),
                };
                let markdown = format!(
                    "{}\n**Total:** {}\n",
                    listing(&title, Tolls(tolls.clone())),
                    total(tolls.iter().map(|toll| toll.amount))
                );
                self.emit(markdown, &tolls)
            }
            TollCommands::Show(args) => {
                let toll = self.fleet.get_toll(&args.into()).await?;
                self.emit(&toll, &toll)
            }
            TollCommands::Update(args) => {
                let toll = self.fleet.update_toll(&args.into()).await?;
                self.emit(UpdateResult::new(toll.clone()), &toll)
            }
            TollCommands::Delete(args) => {
                let toll = self.fleet.delete_toll(&args.into()).await?;
                self.emit(DeleteResult::new(toll.clone()), &toll)
            }
        }
    }

    pub async fn handle_fuel_command(&self, command: FuelCommands) -> Result<()> {
        match command {
            FuelCommands::Add(args) => {
                let record = self.fleet.create_fuel(&args.into()).await?;
                self.emit(CreateResult::new(record.clone()), &record)
            }
            FuelCommands::List(args) => {
                let (title, records) = match args.trip_id {
                    Some(id) => (
                        format!("Fuel for Trip {id}"),
                        self.fleet.list_trip_fuel(&Id { id }).await?,
                    ),
                    None => ("Fuel".to_string(), self.fleet.list_fuel().await?),
                };
                let markdown = format!(
                    "{}\n**Total:** {} ({} L)\n",
                    listing(&title, FuelRecords(records.clone())),
                    total(records.iter().map(|record| record.amount)),
                    total(records.iter().map(|record| record.liters))
                );
                self.emit(markdown, &records)
            }
            FuelCommands::Show(args) => {
                let record = self.fleet.get_fuel(&args.into()).await?;
                self.emit(&record, &record)
            }
            FuelCommands::Update(args) => {
                let record = self.fleet.update_fuel(&args.into()).await?;
                self.emit(UpdateResult::new(record.clone()), &record)
            }
            FuelCommands::Delete(args) => {
                let record = self.fleet.delete_fuel(&args.into()).await?;
                self.emit(DeleteResult::new(record.clone()), &record)
            }
        }
    }

    /// Lists trips; the default view when no command is given.
    pub async fn list_trips(&self, params: &ListTrips) -> Result<()> {
        debug!("list_trips: {params:?}");
        let trips = self.fleet.list_trips(params).await?;
        let title = if params.in_progress {
            "Trips In Progress"
        } else {
            "Trips"
        };
        self.emit(listing(title, Trips(trips.clone())), &trips)
    }
}
