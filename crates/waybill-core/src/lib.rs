//! Core library for the Waybill fleet bookkeeping application.
//!
//! This crate manages trucks, drivers, trips and the toll and fuel ledgers
//! attached to trips. Its centre is the trip lifecycle: a trip's status
//! decides whether its truck is bound, whether its driver's license is
//! checked and whether expenses may be recorded against it.
//!
//! # Layers
//!
//! - [`models`]: plain data types and status enums
//! - [`lifecycle`]: the transition table and the guards that accompany it
//! - [`params`]: interface-agnostic request parameters with validation
//! - [`db`]: SQLite persistence; every write is one immediate transaction
//! - [`fleet`]: async facade used by interfaces
//! - [`display`]: markdown rendering of records and operation results
//! - [`error`]: [`FleetError`] and its coarse [`ErrorKind`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use waybill_core::{
//!     params::{CreateDriver, CreateTrip, CreateTruck, Id},
//!     FleetBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fleet = FleetBuilder::new()
//!     .with_database_path(Some("fleet.db"))
//!     .build()
//!     .await?;
//!
//! let truck = fleet
//!     .create_truck(&CreateTruck {
//!         model: "Scania R450".to_string(),
//!         plate: "BRA2E19".to_string(),
//!         manufactured_on: date(2020, 5, 4),
//!     })
//!     .await?;
//! let driver = fleet
//!     .create_driver(&CreateDriver {
//!         name: "Ana Souza".to_string(),
//!         license_number: "SP-000111".to_string(),
//!         license_expires_on: date(2030, 1, 31),
//!     })
//!     .await?;
//!
//! let trip = fleet
//!     .create_trip(&CreateTrip {
//!         truck_id: truck.id,
//!         driver_id: Some(driver.id),
//!         origin: "Santos".to_string(),
//!         destination: "Campinas".to_string(),
//!         distance_km: 160,
//!         start_time: None,
//!     })
//!     .await?;
//!
//! let trip = fleet.start_trip(&Id { id: trip.id }).await?;
//! println!("{trip}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod fleet;
pub mod lifecycle;
pub mod models;
pub mod params;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Drivers, FuelRecords, LocalDateTime, Tolls, Trips, Trucks,
    UpdateResult,
};
pub use error::{ErrorKind, FleetError, Result};
pub use fleet::{Fleet, FleetBuilder};
pub use lifecycle::TripAction;
pub use models::{
    Driver, FuelRecord, TollRecord, Trip, TripDetails, TripExpenses, TripStatus, Truck,
    TruckStatus,
};
