//! Command-line argument definitions using clap.
//!
//! Each command has its own clap `Args` struct and a `From` conversion into
//! the matching core parameter type, so clap attributes never leak into
//! `waybill_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Fleet
//! ```
//!
//! Dates are ISO `YYYY-MM-DD`, timestamps RFC 3339 and money or liters plain
//! decimals; clap parses them through each type's `FromStr`.

use std::fmt;

use clap::{Args, Subcommand, ValueEnum};
use jiff::{civil::Date, Timestamp};
use rust_decimal::Decimal;
use waybill_core::{params::*, TruckStatus};

/// Identifies a single record
#[derive(Args)]
pub struct IdArgs {
    #[arg(help = "Unique identifier of the record")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

// ============================================================================
// Trucks
// ============================================================================

/// Register a truck
///
/// New trucks start available. The plate must not belong to another truck.
#[derive(Args)]
pub struct CreateTruckArgs {
    /// License plate, unique across the fleet
    pub plate: String,
    #[arg(short, long, help = "Make and model, e.g. 'Volvo FH 540'")]
    pub model: String,
    #[arg(long = "manufactured", help = "Manufacture date (YYYY-MM-DD)")]
    pub manufactured_on: Date,
}

impl From<CreateTruckArgs> for CreateTruck {
    fn from(val: CreateTruckArgs) -> Self {
        CreateTruck {
            model: val.model,
            plate: val.plate,
            manufactured_on: val.manufactured_on,
        }
    }
}

/// Update a truck's details or maintenance status
///
/// Status may be toggled between available and in-maintenance. A truck on a
/// trip only becomes available again by finishing or cancelling the trip.
#[derive(Args)]
pub struct UpdateTruckArgs {
    #[arg(help = "Unique identifier of the truck to update")]
    pub id: u64,
    #[arg(short, long, help = "Updated make and model")]
    pub model: Option<String>,
    #[arg(short, long, help = "Updated license plate")]
    pub plate: Option<String>,
    #[arg(long = "manufactured", help = "Updated manufacture date (YYYY-MM-DD)")]
    pub manufactured_on: Option<Date>,
    #[arg(short, long, help = "New availability status")]
    pub status: Option<TruckStatusArg>,
}

impl From<UpdateTruckArgs> for UpdateTruck {
    fn from(val: UpdateTruckArgs) -> Self {
        UpdateTruck {
            id: val.id,
            model: val.model,
            plate: val.plate,
            manufactured_on: val.manufactured_on,
            status: val.status.map(Into::into),
        }
    }
}

/// List trucks
#[derive(Args)]
pub struct ListTrucksArgs {
    #[arg(long, help = "Only trucks that can take a new trip")]
    pub available: bool,
}

impl From<ListTrucksArgs> for ListTrucks {
    fn from(val: ListTrucksArgs) -> Self {
        ListTrucks {
            available: val.available,
        }
    }
}

#[derive(Subcommand)]
pub enum TruckCommands {
    /// Register a truck
    #[command(aliases = ["c", "add"])]
    Create(CreateTruckArgs),
    /// List trucks
    #[command(aliases = ["l", "ls"])]
    List(ListTrucksArgs),
    /// Show a truck
    #[command(alias = "s")]
    Show(IdArgs),
    /// Update a truck
    #[command(alias = "u")]
    Update(UpdateTruckArgs),
    /// Delete a truck that no trip references
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

/// Truck statuses that can be set directly
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TruckStatusArg {
    /// Ready for a new trip
    Available,
    /// Out of service
    Maintenance,
}

impl From<TruckStatusArg> for TruckStatus {
    fn from(val: TruckStatusArg) -> Self {
        match val {
            TruckStatusArg::Available => TruckStatus::Available,
            TruckStatusArg::Maintenance => TruckStatus::InMaintenance,
        }
    }
}

impl fmt::Display for TruckStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TruckStatus::from(*self).as_str())
    }
}

// ============================================================================
// Drivers
// ============================================================================

/// Register a driver
#[derive(Args)]
pub struct CreateDriverArgs {
    /// Full name
    pub name: String,
    #[arg(short, long = "license", help = "License number, unique across drivers")]
    pub license_number: String,
    #[arg(short = 'e', long = "expires", help = "Last valid day of the license (YYYY-MM-DD)")]
    pub license_expires_on: Date,
}

impl From<CreateDriverArgs> for CreateDriver {
    fn from(val: CreateDriverArgs) -> Self {
        CreateDriver {
            name: val.name,
            license_number: val.license_number,
            license_expires_on: val.license_expires_on,
        }
    }
}

/// Update a driver's details or license
#[derive(Args)]
pub struct UpdateDriverArgs {
    #[arg(help = "Unique identifier of the driver to update")]
    pub id: u64,
    #[arg(short, long, help = "Updated full name")]
    pub name: Option<String>,
    #[arg(short, long = "license", help = "Updated license number")]
    pub license_number: Option<String>,
    #[arg(short = 'e', long = "expires", help = "Updated license expiry (YYYY-MM-DD)")]
    pub license_expires_on: Option<Date>,
}

impl From<UpdateDriverArgs> for UpdateDriver {
    fn from(val: UpdateDriverArgs) -> Self {
        UpdateDriver {
            id: val.id,
            name: val.name,
            license_number: val.license_number,
            license_expires_on: val.license_expires_on,
        }
    }
}

/// List drivers
#[derive(Args)]
pub struct ListDriversArgs {
    #[arg(long, help = "Only drivers whose license is valid today")]
    pub valid: bool,
}

impl From<ListDriversArgs> for ListDrivers {
    fn from(val: ListDriversArgs) -> Self {
        ListDrivers {
            valid_license: val.valid,
        }
    }
}

#[derive(Subcommand)]
pub enum DriverCommands {
    /// Register a driver
    #[command(aliases = ["c", "add"])]
    Create(CreateDriverArgs),
    /// List drivers
    #[command(aliases = ["l", "ls"])]
    List(ListDriversArgs),
    /// Show a driver
    #[command(alias = "s")]
    Show(IdArgs),
    /// Update a driver
    #[command(alias = "u")]
    Update(UpdateDriverArgs),
    /// Delete a driver that no trip references
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

// ============================================================================
// Trips
// ============================================================================

/// Plan a trip
///
/// The truck must be available. A driver is optional at this point but is
/// required to start the trip; if given, their license must be valid.
#[derive(Args)]
pub struct CreateTripArgs {
    #[arg(help = "Truck that will run the trip")]
    pub truck_id: u64,
    /// Departure point
    pub origin: String,
    /// Arrival point
    pub destination: String,
    #[arg(short = 'k', long = "distance", help = "Planned distance in km")]
    pub distance_km: u32,
    #[arg(short, long = "driver", help = "Driver assigned to the trip")]
    pub driver_id: Option<u64>,
    #[arg(long = "start", help = "Scheduled start (RFC 3339); defaults to now")]
    pub start_time: Option<Timestamp>,
}

impl From<CreateTripArgs> for CreateTrip {
    fn from(val: CreateTripArgs) -> Self {
        CreateTrip {
            truck_id: val.truck_id,
            driver_id: val.driver_id,
            origin: val.origin,
            destination: val.destination,
            distance_km: val.distance_km,
            start_time: val.start_time,
        }
    }
}

/// Edit a planned trip
#[derive(Args)]
pub struct UpdateTripArgs {
    #[arg(help = "Unique identifier of the trip to update")]
    pub id: u64,
    #[arg(short, long = "truck", help = "Replacement truck")]
    pub truck_id: Option<u64>,
    #[arg(short, long = "driver", help = "Replacement driver")]
    pub driver_id: Option<u64>,
    #[arg(long, conflicts_with = "driver_id", help = "Unassign the driver")]
    pub no_driver: bool,
    #[arg(short, long, help = "Updated departure point")]
    pub origin: Option<String>,
    #[arg(long, help = "Updated arrival point")]
    pub destination: Option<String>,
    #[arg(short = 'k', long = "distance", help = "Updated distance in km")]
    pub distance_km: Option<u32>,
    #[arg(long = "start", help = "Updated scheduled start (RFC 3339)")]
    pub start_time: Option<Timestamp>,
}

impl From<UpdateTripArgs> for UpdateTrip {
    fn from(val: UpdateTripArgs) -> Self {
        let driver_id = if val.no_driver {
            Some(None)
        } else {
            val.driver_id.map(Some)
        };
        UpdateTrip {
            id: val.id,
            truck_id: val.truck_id,
            driver_id,
            origin: val.origin,
            destination: val.destination,
            distance_km: val.distance_km,
            start_time: val.start_time,
        }
    }
}

/// List trips, newest start first
#[derive(Args)]
pub struct ListTripsArgs {
    #[arg(long, help = "Only trips currently on the road")]
    pub in_progress: bool,
    #[arg(short, long = "truck", help = "Only trips of this truck")]
    pub truck_id: Option<u64>,
    #[arg(short, long = "driver", help = "Only trips of this driver")]
    pub driver_id: Option<u64>,
}

impl From<ListTripsArgs> for ListTrips {
    fn from(val: ListTripsArgs) -> Self {
        ListTrips {
            in_progress: val.in_progress,
            truck_id: val.truck_id,
            driver_id: val.driver_id,
        }
    }
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Plan a trip
    #[command(aliases = ["c", "plan"])]
    Create(CreateTripArgs),
    /// List trips
    #[command(aliases = ["l", "ls"])]
    List(ListTripsArgs),
    /// Show a trip with its truck, driver and expenses
    #[command(alias = "s")]
    Show(IdArgs),
    /// Edit a planned trip
    #[command(alias = "u")]
    Update(UpdateTripArgs),
    /// Start a planned trip; its truck goes on the road
    Start(IdArgs),
    /// Finish a trip in progress; its truck becomes available
    #[command(alias = "done")]
    Finish(IdArgs),
    /// Cancel a planned or in-progress trip
    Cancel(IdArgs),
    /// Delete a planned or cancelled trip and its expenses
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
    /// Summarise a trip's toll and fuel spending
    #[command(alias = "x")]
    Expenses(IdArgs),
}

// ============================================================================
// Ledgers
// ============================================================================

/// List ledger records, optionally for one trip
#[derive(Args)]
pub struct ListLedgerArgs {
    #[arg(short, long = "trip", help = "Only records of this trip")]
    pub trip_id: Option<u64>,
}

/// Record a toll on a trip in progress
#[derive(Args)]
pub struct CreateTollArgs {
    #[arg(help = "Trip the toll was paid on")]
    pub trip_id: u64,
    #[arg(help = "Amount paid")]
    pub amount: Decimal,
    /// Toll plaza or road
    pub location: String,
    #[arg(long = "at", help = "When it was paid (RFC 3339); defaults to now")]
    pub paid_at: Option<Timestamp>,
}

impl From<CreateTollArgs> for CreateToll {
    fn from(val: CreateTollArgs) -> Self {
        CreateToll {
            trip_id: val.trip_id,
            amount: val.amount,
            location: val.location,
            paid_at: val.paid_at,
        }
    }
}

/// Amend a toll while its trip is in progress
#[derive(Args)]
pub struct UpdateTollArgs {
    #[arg(help = "Unique identifier of the toll to update")]
    pub id: u64,
    #[arg(short, long, help = "Corrected amount")]
    pub amount: Option<Decimal>,
    #[arg(short, long, help = "Corrected location")]
    pub location: Option<String>,
    #[arg(long = "at", help = "Corrected payment time (RFC 3339)")]
    pub paid_at: Option<Timestamp>,
}

impl From<UpdateTollArgs> for UpdateToll {
    fn from(val: UpdateTollArgs) -> Self {
        UpdateToll {
            id: val.id,
            amount: val.amount,
            location: val.location,
            paid_at: val.paid_at,
        }
    }
}

#[derive(Subcommand)]
pub enum TollCommands {
    /// Record a toll
    #[command(aliases = ["a", "create"])]
    Add(CreateTollArgs),
    /// List tolls
    #[command(aliases = ["l", "ls"])]
    List(ListLedgerArgs),
    /// Show a toll
    #[command(alias = "s")]
    Show(IdArgs),
    /// Amend a toll
    #[command(alias = "u")]
    Update(UpdateTollArgs),
    /// Remove a toll
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

/// Record a refuelling stop on a trip in progress
#[derive(Args)]
pub struct CreateFuelArgs {
    #[arg(help = "Trip the truck was refuelled on")]
    pub trip_id: u64,
    #[arg(help = "Volume pumped in liters")]
    pub liters: Decimal,
    #[arg(help = "Amount paid")]
    pub amount: Decimal,
    /// Station or town
    pub location: String,
    #[arg(long = "at", help = "When the truck was refuelled (RFC 3339); defaults to now")]
    pub fueled_at: Option<Timestamp>,
}

impl From<CreateFuelArgs> for CreateFuel {
    fn from(val: CreateFuelArgs) -> Self {
        CreateFuel {
            trip_id: val.trip_id,
            liters: val.liters,
            amount: val.amount,
            location: val.location,
            fueled_at: val.fueled_at,
        }
    }
}

/// Amend a fuel record while its trip is in progress
#[derive(Args)]
pub struct UpdateFuelArgs {
    #[arg(help = "Unique identifier of the fuel record to update")]
    pub id: u64,
    #[arg(short = 'L', long, help = "Corrected volume in liters")]
    pub liters: Option<Decimal>,
    #[arg(short, long, help = "Corrected amount")]
    pub amount: Option<Decimal>,
    #[arg(short, long, help = "Corrected location")]
    pub location: Option<String>,
    #[arg(long = "at", help = "Corrected refuelling time (RFC 3339)")]
    pub fueled_at: Option<Timestamp>,
}

impl From<UpdateFuelArgs> for UpdateFuel {
    fn from(val: UpdateFuelArgs) -> Self {
        UpdateFuel {
            id: val.id,
            liters: val.liters,
            amount: val.amount,
            location: val.location,
            fueled_at: val.fueled_at,
        }
    }
}

#[derive(Subcommand)]
pub enum FuelCommands {
    /// Record a refuelling stop
    #[command(aliases = ["a", "create"])]
    Add(CreateFuelArgs),
    /// List fuel records
    #[command(aliases = ["l", "ls"])]
    List(ListLedgerArgs),
    /// Show a fuel record
    #[command(alias = "s")]
    Show(IdArgs),
    /// Amend a fuel record
    #[command(alias = "u")]
    Update(UpdateFuelArgs),
    /// Remove a fuel record
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}
