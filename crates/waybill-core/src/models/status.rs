//! Status enumerations for trucks and trips.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Availability of a truck.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TruckStatus {
    /// Truck can be assigned to a new trip
    #[default]
    Available,

    /// Truck is bound to a trip that has started
    OnTrip,

    /// Truck is out of service
    InMaintenance,
}

impl FromStr for TruckStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(TruckStatus::Available),
            "on_trip" | "ontrip" => Ok(TruckStatus::OnTrip),
            "in_maintenance" | "inmaintenance" | "maintenance" => Ok(TruckStatus::InMaintenance),
            _ => Err(format!("Invalid truck status: {s}")),
        }
    }
}

impl TruckStatus {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TruckStatus::Available => "available",
            TruckStatus::OnTrip => "on_trip",
            TruckStatus::InMaintenance => "in_maintenance",
        }
    }

    /// Human-readable label with icon.
    pub fn with_icon(&self) -> &'static str {
        match self {
            TruckStatus::Available => "○ Available",
            TruckStatus::OnTrip => "➤ On Trip",
            TruckStatus::InMaintenance => "✗ In Maintenance",
        }
    }
}

/// Lifecycle status of a trip.
///
/// `Completed` and `Cancelled` are terminal. The permitted edges between these
/// states live in [`crate::lifecycle`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    /// Trip is scheduled but not binding yet
    #[default]
    Planned,

    /// Trip has started; the truck is on the road
    InProgress,

    /// Trip finished normally
    Completed,

    /// Trip was called off
    Cancelled,
}

impl FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(TripStatus::Planned),
            "in_progress" | "inprogress" => Ok(TripStatus::InProgress),
            "completed" => Ok(TripStatus::Completed),
            "cancelled" | "canceled" => Ok(TripStatus::Cancelled),
            _ => Err(format!("Invalid trip status: {s}")),
        }
    }
}

impl TripStatus {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Planned => "planned",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the trip admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Cancelled)
    }

    /// Human-readable label with icon.
    ///
    /// ```rust
    /// use waybill_core::models::TripStatus;
    ///
    /// assert_eq!(TripStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(TripStatus::Completed.with_icon(), "✓ Completed");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TripStatus::Planned => "○ Planned",
            TripStatus::InProgress => "➤ In Progress",
            TripStatus::Completed => "✓ Completed",
            TripStatus::Cancelled => "✗ Cancelled",
        }
    }
}
