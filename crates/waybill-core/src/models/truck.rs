//! Truck model definition.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::TruckStatus;

/// A truck registered in the fleet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Truck {
    /// Unique identifier for the truck
    pub id: u64,

    /// Make and model description
    pub model: String,

    /// License plate, unique across the fleet
    pub plate: String,

    /// Date the truck was manufactured
    pub manufactured_on: Date,

    /// Current availability
    #[serde(default)]
    pub status: TruckStatus,
}

impl Truck {
    /// Whether the truck can be bound to a new trip.
    pub fn is_available(&self) -> bool {
        self.status == TruckStatus::Available
    }
}
