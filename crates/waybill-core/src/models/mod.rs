//! Data models for trucks, drivers, trips and their expense ledgers.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so that presentation stays out of the data
//! definitions.
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use waybill_core::models::{Trip, TripStatus};
//!
//! let trip = Trip {
//!     id: 1,
//!     truck_id: 7,
//!     driver_id: None,
//!     origin: "Santos".to_string(),
//!     destination: "Campinas".to_string(),
//!     distance_km: 160,
//!     start_time: Timestamp::now(),
//!     end_time: None,
//!     status: TripStatus::Planned,
//! };
//! println!("{}", trip); // Markdown header with route and status
//! ```

pub mod driver;
pub mod expense;
pub mod status;
pub mod trip;
pub mod truck;


pub use driver::Driver;
pub use expense::{FuelRecord, TollRecord};
pub use status::{TripStatus, TruckStatus};
pub use trip::{Trip, TripDetails, TripExpenses};
pub use truck::Truck;
