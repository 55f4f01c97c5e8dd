//! Trip model definition and the composite views built around it.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Driver, FuelRecord, TollRecord, TripStatus, Truck};

/// A haulage assignment binding one truck and optionally one driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: u64,

    /// Truck carrying out the trip
    pub truck_id: u64,

    /// Assigned driver; a trip cannot start without one
    pub driver_id: Option<u64>,

    /// Where the trip departs from
    pub origin: String,

    /// Where the trip ends
    pub destination: String,

    /// Planned distance in kilometres
    pub distance_km: u32,

    /// Scheduled start while planned, actual start once started (UTC)
    pub start_time: Timestamp,

    /// Set when the trip completes or is cancelled (UTC)
    pub end_time: Option<Timestamp>,

    /// Lifecycle status
    #[serde(default)]
    pub status: TripStatus,
}

/// A trip together with everything it references and owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripDetails {
    pub trip: Trip,
    pub truck: Truck,
    pub driver: Option<Driver>,
    pub tolls: Vec<TollRecord>,
    pub fuel: Vec<FuelRecord>,
}

/// Expense totals for a single trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripExpenses {
    pub trip_id: u64,
    pub distance_km: u32,
    pub toll_total: Decimal,
    pub fuel_total: Decimal,
    pub fuel_liters: Decimal,
}

impl TripExpenses {
    /// Sum of toll and fuel spending, `None` if it leaves the `Decimal` range.
    pub fn grand_total(&self) -> Option<Decimal> {
        self.toll_total.checked_add(self.fuel_total)
    }

    /// Spending per planned kilometre, rounded to cents.
    pub fn cost_per_km(&self) -> Option<Decimal> {
        if self.distance_km == 0 {
            return None;
        }
        Some((self.grand_total()? / Decimal::from(self.distance_km)).round_dp(2))
    }
}
