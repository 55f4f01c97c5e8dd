//! Parameter structures for fleet operations.
//!
//! These structures are shared by every interface (the CLI today) and carry
//! no framework-specific derives beyond serde. Interface layers define their
//! own argument types and convert into these with `From`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │     Fleet       │
//! │  (clap derives) │───▶│ (validate())    │───▶│  (transactions) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every create/update parameter has a `validate()` method. The database
//! layer calls it before opening a transaction, so malformed input never
//! takes the write lock.

use jiff::{civil::Date, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{FleetError, Result},
    models::TruckStatus,
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FleetError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}

fn require_optional_text(field: &str, value: Option<&String>) -> Result<()> {
    value.map_or(Ok(()), |v| require_text(field, v))
}

/// Largest amount a single toll or fuel record may carry.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest volume a single fuel record may carry, in liters.
pub const MAX_LITERS: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

fn require_at_most(field: &str, value: Decimal, max: Decimal) -> Result<()> {
    if value > max {
        return Err(FleetError::invalid_input(field).with_reason(format!("must not exceed {max}")));
    }
    Ok(())
}

fn require_amount(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(FleetError::invalid_input(field).with_reason("must not be negative"));
    }
    require_at_most(field, value, MAX_AMOUNT)
}

fn require_liters(field: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(FleetError::invalid_input(field).with_reason("must be greater than zero"));
    }
    require_at_most(field, value, MAX_LITERS)
}

/// Parameters for registering a truck. New trucks start available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTruck {
    pub model: String,
    pub plate: String,
    pub manufactured_on: Date,
}

impl CreateTruck {
    pub fn validate(&self) -> Result<()> {
        require_text("model", &self.model)?;
        require_text("plate", &self.plate)
    }
}

/// Partial update of a truck. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTruck {
    pub id: u64,
    pub model: Option<String>,
    pub plate: Option<String>,
    pub manufactured_on: Option<Date>,
    pub status: Option<TruckStatus>,
}

impl UpdateTruck {
    pub fn validate(&self) -> Result<()> {
        require_optional_text("model", self.model.as_ref())?;
        require_optional_text("plate", self.plate.as_ref())
    }
}

/// Parameters for listing trucks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTrucks {
    /// Only trucks that can take a new trip
    #[serde(default)]
    pub available: bool,
}

/// Parameters for registering a driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDriver {
    pub name: String,
    pub license_number: String,
    pub license_expires_on: Date,
}

impl CreateDriver {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("license_number", &self.license_number)
    }
}

/// Partial update of a driver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDriver {
    pub id: u64,
    pub name: Option<String>,
    pub license_number: Option<String>,
    pub license_expires_on: Option<Date>,
}

impl UpdateDriver {
    pub fn validate(&self) -> Result<()> {
        require_optional_text("name", self.name.as_ref())?;
        require_optional_text("license_number", self.license_number.as_ref())
    }
}

/// Parameters for listing drivers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDrivers {
    /// Only drivers whose license has not expired
    #[serde(default)]
    pub valid_license: bool,
}

/// Parameters for planning a trip.
///
/// There is no status field: new trips are always planned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrip {
    pub truck_id: u64,
    pub driver_id: Option<u64>,
    pub origin: String,
    pub destination: String,
    pub distance_km: u32,
    /// Scheduled start; defaults to now
    pub start_time: Option<Timestamp>,
}

impl CreateTrip {
    pub fn validate(&self) -> Result<()> {
        require_text("origin", &self.origin)?;
        require_text("destination", &self.destination)
    }
}

/// Partial update of a planned trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTrip {
    pub id: u64,
    pub truck_id: Option<u64>,
    /// `Some(None)` unassigns the driver
    #[serde(default)]
    pub driver_id: Option<Option<u64>>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub distance_km: Option<u32>,
    pub start_time: Option<Timestamp>,
}

impl UpdateTrip {
    pub fn validate(&self) -> Result<()> {
        require_optional_text("origin", self.origin.as_ref())?;
        require_optional_text("destination", self.destination.as_ref())
    }
}

/// Filters for listing trips. Filters combine with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTrips {
    /// Only trips currently on the road
    #[serde(default)]
    pub in_progress: bool,
    pub truck_id: Option<u64>,
    pub driver_id: Option<u64>,
}

/// Parameters for recording a toll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateToll {
    pub trip_id: u64,
    pub amount: Decimal,
    pub location: String,
    /// Defaults to now
    pub paid_at: Option<Timestamp>,
}

impl CreateToll {
    pub fn validate(&self) -> Result<()> {
        require_amount("amount", self.amount)?;
        require_text("location", &self.location)
    }
}

/// Partial update of a toll. The owning trip cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateToll {
    pub id: u64,
    pub amount: Option<Decimal>,
    pub location: Option<String>,
    pub paid_at: Option<Timestamp>,
}

impl UpdateToll {
    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            require_amount("amount", amount)?;
        }
        require_optional_text("location", self.location.as_ref())
    }
}

/// Parameters for recording a refuelling stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFuel {
    pub trip_id: u64,
    pub liters: Decimal,
    pub amount: Decimal,
    pub location: String,
    /// Defaults to now
    pub fueled_at: Option<Timestamp>,
}

impl CreateFuel {
    pub fn validate(&self) -> Result<()> {
        require_liters("liters", self.liters)?;
        require_amount("amount", self.amount)?;
        require_text("location", &self.location)
    }
}

/// Partial update of a fuel record. The owning trip cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFuel {
    pub id: u64,
    pub liters: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub location: Option<String>,
    pub fueled_at: Option<Timestamp>,
}

impl UpdateFuel {
    pub fn validate(&self) -> Result<()> {
        if let Some(liters) = self.liters {
            require_liters("liters", liters)?;
        }
        if let Some(amount) = self.amount {
            require_amount("amount", amount)?;
        }
        require_optional_text("location", self.location.as_ref())
    }
}
