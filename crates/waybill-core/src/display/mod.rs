//! Markdown display wrappers for fleet records and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! This module adds the context-specific wrappers around them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │   Collections   │    │    Markdown     │
//! │ (Truck, Trip,   │───▶│ & Result Types  │───▶│     Output      │
//! │  TollRecord..)  │    │                 │    │   (terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: list wrappers rendered as tables (`Trucks`, `Trips`, ...)
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`datetime`]: timestamp and duration formatting
//! - [`models`]: `Display` for the domain models
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use waybill_core::{
//!     display::{CreateResult, UpdateResult},
//!     models::{Trip, TripStatus},
//! };
//!
//! let trip = Trip {
//!     id: 1,
//!     truck_id: 4,
//!     driver_id: Some(2),
//!     origin: "Porto Alegre".to_string(),
//!     destination: "Florianópolis".to_string(),
//!     distance_km: 476,
//!     start_time: Timestamp::now(),
//!     end_time: None,
//!     status: TripStatus::InProgress,
//! };
//!
//! let created = CreateResult::new(trip.clone()).to_string();
//! assert!(created.contains("Created trip with ID: 1"));
//!
//! let started = UpdateResult::with_changes(trip, vec!["Status: planned → in_progress".to_string()]);
//! assert!(started.to_string().contains("Changes made:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Drivers, FuelRecords, Tolls, Trips, Trucks};
pub use datetime::{Elapsed, LocalDateTime};
pub use results::{CreateResult, DeleteResult, Resource, UpdateResult};
