//! Trip lifecycle state machine.
//!
//! ```text
//!              start               finish
//!   Planned ──────────▶ InProgress ──────────▶ Completed
//!      │                    │
//!      │ cancel             │ cancel
//!      ▼                    ▼
//!   Cancelled ◀─────────────┘
//! ```
//!
//! [`permits`] is the single table of which [`TripAction`] each
//! [`TripStatus`] allows. Everything that reads or writes trip status goes
//! through it, either via [`authorize`] for actions that leave the status
//! unchanged or [`transition`] for actions that move the trip. The guards on
//! trucks and drivers that accompany a transition live here too so the
//! database layer only has to sequence reads and writes.

use std::fmt;

use jiff::{civil::Date, Zoned};

use crate::{
    error::{FleetError, Result},
    models::{Driver, Trip, TripStatus, Truck, TruckStatus},
};

/// Something a caller wants to do to a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripAction {
    /// Change route, distance, truck, driver or scheduled start
    Edit,
    Start,
    Finish,
    Cancel,
    Delete,
    /// Create, modify or remove a toll or fuel record
    RecordExpense,
}

impl TripAction {
    fn verb(&self) -> &'static str {
        match self {
            TripAction::Edit => "edit",
            TripAction::Start => "start",
            TripAction::Finish => "finish",
            TripAction::Cancel => "cancel",
            TripAction::Delete => "delete",
            TripAction::RecordExpense => "record expenses on",
        }
    }
}

impl fmt::Display for TripAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Whether a trip in `status` admits `action`.
pub fn permits(status: TripStatus, action: TripAction) -> bool {
    use TripAction::*;
    use TripStatus::*;

    matches!(
        (status, action),
        (Planned, Edit | Start | Cancel | Delete)
            | (InProgress, Finish | Cancel | RecordExpense)
            | (Cancelled, Delete)
    )
}

/// A permitted status change and the truck status that must accompany it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: TripStatus,
    pub to: TripStatus,
    /// New status for the trip's truck, if the transition moves it
    pub truck_status: Option<TruckStatus>,
}

/// Rejects `action` unless the trip's current status permits it.
pub fn authorize(trip: &Trip, action: TripAction) -> Result<()> {
    if permits(trip.status, action) {
        Ok(())
    } else {
        Err(FleetError::invalid_operation(format!(
            "cannot {} trip {}: trip is {}",
            action,
            trip.id,
            trip.status.as_str()
        )))
    }
}

/// Resolves the status change for a moving action.
///
/// Returns `InvalidOperation` when the edge is not in the table, and also for
/// actions that never move a trip.
pub fn transition(trip: &Trip, action: TripAction) -> Result<Transition> {
    authorize(trip, action)?;

    let (to, truck_status) = match action {
        TripAction::Start => (TripStatus::InProgress, Some(TruckStatus::OnTrip)),
        TripAction::Finish => (TripStatus::Completed, Some(TruckStatus::Available)),
        TripAction::Cancel => {
            // A planned trip never marked its truck as on trip.
            let release = (trip.status == TripStatus::InProgress).then_some(TruckStatus::Available);
            (TripStatus::Cancelled, release)
        }
        TripAction::Edit | TripAction::Delete | TripAction::RecordExpense => {
            return Err(FleetError::invalid_operation(format!(
                "{action} does not change trip status"
            )));
        }
    };

    Ok(Transition {
        from: trip.status,
        to,
        truck_status,
    })
}

/// Returns the assigned driver or rejects the start.
pub fn require_driver(trip: &Trip) -> Result<u64> {
    match trip.driver_id {
        Some(driver_id) => Ok(driver_id),
        None => Err(FleetError::invalid_operation(format!(
            "trip {} has no driver assigned",
            trip.id
        ))),
    }
}

/// Rejects binding a truck that is not available.
pub fn ensure_truck_available(truck: &Truck) -> Result<()> {
    if truck.is_available() {
        Ok(())
    } else {
        Err(FleetError::invalid_operation(format!(
            "truck {} ({}) is not available: {}",
            truck.id,
            truck.plate,
            truck.status.as_str()
        )))
    }
}

/// Rejects a driver whose license expired before `today`.
pub fn ensure_license_valid(driver: &Driver, today: Date) -> Result<()> {
    if driver.has_valid_license(today) {
        Ok(())
    } else {
        Err(FleetError::invalid_operation(format!(
            "license of driver {} expired on {}",
            driver.id, driver.license_expires_on
        )))
    }
}

/// Direct truck edits may toggle availability and maintenance, but `OnTrip`
/// belongs to the lifecycle.
pub fn ensure_direct_status_edit(truck: &Truck, requested: TruckStatus) -> Result<()> {
    if requested == truck.status {
        return Ok(());
    }
    if truck.status == TruckStatus::OnTrip || requested == TruckStatus::OnTrip {
        return Err(FleetError::invalid_operation(format!(
            "truck {} status can only move to or from on_trip through a trip",
            truck.id
        )));
    }
    Ok(())
}

/// Current civil date in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::error::ErrorKind;

    const ALL_STATUSES: [TripStatus; 4] = [
        TripStatus::Planned,
        TripStatus::InProgress,
        TripStatus::Completed,
        TripStatus::Cancelled,
    ];

    fn trip(status: TripStatus, driver_id: Option<u64>) -> Trip {
        Trip {
            id: 9,
            truck_id: 1,
            driver_id,
            origin: "Santos".to_string(),
            destination: "Campinas".to_string(),
            distance_km: 160,
            start_time: Timestamp::from_second(1_700_000_000).unwrap(),
            end_time: None,
            status,
        }
    }

    fn truck(status: TruckStatus) -> Truck {
        Truck {
            id: 1,
            model: "Volvo FH 540".to_string(),
            plate: "ABC1D23".to_string(),
            manufactured_on: date(2021, 3, 1),
            status,
        }
    }

    #[test]
    fn test_start_only_from_planned() {
        for status in ALL_STATUSES {
            let result = transition(&trip(status, Some(2)), TripAction::Start);
            if status == TripStatus::Planned {
                let t = result.expect("planned trips can start");
                assert_eq!(t.to, TripStatus::InProgress);
                assert_eq!(t.truck_status, Some(TruckStatus::OnTrip));
            } else {
                assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidOperation);
            }
        }
    }

    #[test]
    fn test_finish_only_from_in_progress() {
        for status in ALL_STATUSES {
            let result = transition(&trip(status, Some(2)), TripAction::Finish);
            if status == TripStatus::InProgress {
                let t = result.expect("in-progress trips can finish");
                assert_eq!(t.to, TripStatus::Completed);
                assert_eq!(t.truck_status, Some(TruckStatus::Available));
            } else {
                assert!(result.is_err());
            }
        }
    }

    #[test]
    fn test_cancel_releases_truck_only_when_in_progress() {
        let planned = transition(&trip(TripStatus::Planned, None), TripAction::Cancel).unwrap();
        assert_eq!(planned.to, TripStatus::Cancelled);
        assert_eq!(planned.truck_status, None);

        let running = transition(&trip(TripStatus::InProgress, Some(2)), TripAction::Cancel).unwrap();
        assert_eq!(running.to, TripStatus::Cancelled);
        assert_eq!(running.truck_status, Some(TruckStatus::Available));
    }

    #[test]
    fn test_terminal_states_cannot_be_cancelled() {
        for status in [TripStatus::Completed, TripStatus::Cancelled] {
            let err = transition(&trip(status, Some(2)), TripAction::Cancel).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        }
    }

    #[test]
    fn test_terminal_states_admit_no_transition() {
        for status in [TripStatus::Completed, TripStatus::Cancelled] {
            assert!(status.is_terminal());
            for action in [TripAction::Start, TripAction::Finish, TripAction::Cancel] {
                assert!(!permits(status, action), "{status:?} should reject {action}");
            }
        }
    }

    #[test]
    fn test_edit_and_delete_permissions() {
        assert!(permits(TripStatus::Planned, TripAction::Edit));
        assert!(!permits(TripStatus::InProgress, TripAction::Edit));
        assert!(!permits(TripStatus::Cancelled, TripAction::Edit));

        assert!(permits(TripStatus::Planned, TripAction::Delete));
        assert!(permits(TripStatus::Cancelled, TripAction::Delete));
        assert!(!permits(TripStatus::InProgress, TripAction::Delete));
        assert!(!permits(TripStatus::Completed, TripAction::Delete));
    }

    #[test]
    fn test_expenses_only_while_in_progress() {
        for status in ALL_STATUSES {
            let allowed = authorize(&trip(status, Some(2)), TripAction::RecordExpense).is_ok();
            assert_eq!(allowed, status == TripStatus::InProgress);
        }
    }

    #[test]
    fn test_non_moving_action_is_not_a_transition() {
        let err = transition(&trip(TripStatus::Planned, None), TripAction::Edit).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_require_driver() {
        assert_eq!(require_driver(&trip(TripStatus::Planned, Some(4))).unwrap(), 4);
        let err = require_driver(&trip(TripStatus::Planned, None)).unwrap_err();
        assert!(err.to_string().contains("no driver"));
    }

    #[test]
    fn test_truck_availability_guard() {
        assert!(ensure_truck_available(&truck(TruckStatus::Available)).is_ok());
        assert!(ensure_truck_available(&truck(TruckStatus::OnTrip)).is_err());
        assert!(ensure_truck_available(&truck(TruckStatus::InMaintenance)).is_err());
    }

    #[test]
    fn test_license_valid_through_expiry_day() {
        let driver = Driver {
            id: 3,
            name: "Ana Souza".to_string(),
            license_number: "12345678900".to_string(),
            license_expires_on: date(2025, 6, 30),
        };
        assert!(ensure_license_valid(&driver, date(2025, 6, 29)).is_ok());
        assert!(ensure_license_valid(&driver, date(2025, 6, 30)).is_ok());
        assert!(ensure_license_valid(&driver, date(2025, 7, 1)).is_err());
    }

    #[test]
    fn test_direct_status_edit_cannot_touch_on_trip() {
        let available = truck(TruckStatus::Available);
        assert!(ensure_direct_status_edit(&available, TruckStatus::InMaintenance).is_ok());
        assert!(ensure_direct_status_edit(&available, TruckStatus::OnTrip).is_err());

        let on_trip = truck(TruckStatus::OnTrip);
        assert!(ensure_direct_status_edit(&on_trip, TruckStatus::OnTrip).is_ok());
        assert!(ensure_direct_status_edit(&on_trip, TruckStatus::Available).is_err());
    }
}
