//! Async facade over the fleet database.
//!
//! [`Fleet`] is what interfaces talk to. Each call opens its own
//! [`Database`] connection on a blocking thread, so a `Fleet` is cheap to
//! clone and share across tasks. Concurrent writers are serialized by
//! SQLite's write lock; the busy timeout decides how long one waits for
//! another.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Interfaces    │    │      Fleet      │    │    Database     │
//! │     (CLI)       │───▶│ (spawn_blocking │───▶│ (one immediate  │
//! │                 │    │  per operation) │    │  transaction)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use waybill_core::{params::{CreateTrip, CreateTruck, Id}, FleetBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fleet = FleetBuilder::new()
//!     .with_database_path(Some("fleet.db"))
//!     .build()
//!     .await?;
//!
//! let truck = fleet
//!     .create_truck(&CreateTruck {
//!         model: "Volvo FH 540".to_string(),
//!         plate: "ABC1D23".to_string(),
//!         manufactured_on: date(2021, 3, 1),
//!     })
//!     .await?;
//!
//! let trip = fleet
//!     .create_trip(&CreateTrip {
//!         truck_id: truck.id,
//!         driver_id: None,
//!         origin: "Campinas".to_string(),
//!         destination: "Curitiba".to_string(),
//!         distance_km: 510,
//!         start_time: None,
//!     })
//!     .await?;
//!
//! // Without a driver the trip cannot leave the yard
//! assert!(fleet.start_trip(&Id { id: trip.id }).await.is_err());
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, time::Duration};

use log::debug;
use tokio::task;

use crate::{
    db::Database,
    error::{ErrorKind, FleetError, Result},
};

pub mod builder;
pub mod driver_ops;
pub mod ledger_ops;
pub mod trip_ops;
pub mod truck_ops;


pub use builder::FleetBuilder;

/// Main fleet interface for managing trucks, drivers, trips and expenses.
#[derive(Debug, Clone)]
pub struct Fleet {
    pub(crate) db_path: PathBuf,
    pub(crate) busy_timeout: Duration,
}

impl Fleet {
    pub(crate) fn new(db_path: PathBuf, busy_timeout: Duration) -> Self {
        Self {
            db_path,
            busy_timeout,
        }
    }

    /// Path of the SQLite file backing this fleet.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    ///
    /// Rejections (not found, guard failures) are logged at debug level under
    /// `name`; the caller decides how loudly to report them.
    pub(crate) async fn with_database<T, F>(&self, name: &'static str, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let busy_timeout = self.busy_timeout;

        let result = task::spawn_blocking(move || {
            let mut db = Database::open(&db_path, busy_timeout)?;
            op(&mut db)
        })
        .await
        .map_err(|e| FleetError::Configuration {
            message: format!("Task join error: {e}"),
        })?;

        if let Err(ref e) = result {
            if e.kind() != ErrorKind::Failure {
                debug!("{name} rejected: {e}");
            }
        }

        result
    }
}
