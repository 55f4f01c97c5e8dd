//! Trip queries and lifecycle transactions.
//!
//! Every lifecycle operation follows the same shape: open an immediate
//! transaction, load the trip, resolve the transition, run the guards, then
//! write the truck and the trip. A guard that fails returns early and the
//! dropped transaction rolls back, so nothing is ever half applied.

use jiff::Timestamp;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};

use super::{
    convert::{id, id_opt, parsed, parsed_opt},
    driver_queries::{fetch_driver, load_driver},
    fuel_queries::{fetch_fuel_for_trip, sum_fuel_for_trip},
    toll_queries::{fetch_tolls_for_trip, sum_tolls_for_trip},
    truck_queries::{fetch_truck, load_truck, write_truck_status},
};
use crate::{
    error::{DatabaseResultExt, FleetError, Result},
    lifecycle::{self, Transition, TripAction},
    models::{Trip, TripDetails, TripExpenses, TripStatus},
    params::{CreateTrip, ListTrips, UpdateTrip},
};

const TRIP_COLUMNS: &str =
    "id, truck_id, driver_id, origin, destination, distance_km, start_time, end_time, status";
const INSERT_TRIP_SQL: &str = "INSERT INTO trips \
     (truck_id, driver_id, origin, destination, distance_km, start_time, end_time, status) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7)";
const UPDATE_TRIP_SQL: &str = "UPDATE trips SET truck_id = ?1, driver_id = ?2, origin = ?3, \
     destination = ?4, distance_km = ?5, start_time = ?6, end_time = ?7, status = ?8 \
     WHERE id = ?9";
const DELETE_TRIP_TOLLS_SQL: &str = "DELETE FROM tolls WHERE trip_id = ?1";
const DELETE_TRIP_FUEL_SQL: &str = "DELETE FROM fuel_records WHERE trip_id = ?1";
const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1";

fn build_trip_from_row(row: &Row<'_>) -> rusqlite::Result<Trip> {
    Ok(Trip {
        id: id(row, 0)?,
        truck_id: id(row, 1)?,
        driver_id: id_opt(row, 2)?,
        origin: row.get(3)?,
        destination: row.get(4)?,
        distance_km: row.get(5)?,
        start_time: parsed(row, 6)?,
        end_time: parsed_opt(row, 7)?,
        status: parsed(row, 8)?,
    })
}

/// Newest start first; ties fall back to the newer id.
fn sort_newest_first(trips: &mut [Trip]) {
    trips.sort_by(|a, b| {
        b.start_time
            .cmp(&a.start_time)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Fetches a trip by id.
pub(crate) fn fetch_trip(conn: &Connection, trip_id: u64) -> Result<Option<Trip>> {
    conn.query_row(
        &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"),
        params![trip_id as i64],
        build_trip_from_row,
    )
    .optional()
    .db_context("Failed to query trip")
}

/// Fetches a trip by id, failing with `TripNotFound` if absent.
pub(crate) fn load_trip(conn: &Connection, trip_id: u64) -> Result<Trip> {
    fetch_trip(conn, trip_id)?.ok_or(FleetError::TripNotFound { id: trip_id })
}

/// Resolves the owning trip of a ledger record and rejects the write unless
/// that trip is in progress.
pub(crate) fn authorize_ledger_write(conn: &Connection, trip_id: u64) -> Result<()> {
    let trip = load_trip(conn, trip_id)?;
    lifecycle::authorize(&trip, TripAction::RecordExpense)
}

fn write_trip(conn: &Connection, trip: &Trip) -> Result<()> {
    conn.execute(
        UPDATE_TRIP_SQL,
        params![
            trip.truck_id as i64,
            trip.driver_id.map(|d| d as i64),
            trip.origin,
            trip.destination,
            trip.distance_km,
            trip.start_time.to_string(),
            trip.end_time.map(|t| t.to_string()),
            trip.status.as_str(),
            trip.id as i64
        ],
    )
    .db_context("Failed to update trip")?;
    Ok(())
}

/// Writes the truck side effect and the new trip status, then commits.
fn commit_transition(tx: Transaction<'_>, mut trip: Trip, transition: Transition) -> Result<Trip> {
    if let Some(truck_status) = transition.truck_status {
        write_truck_status(&tx, trip.truck_id, truck_status)?;
    }

    trip.status = transition.to;
    write_trip(&tx, &trip)?;

    tx.commit().db_context("Failed to commit transaction")?;

    info!(
        "trip {}: {} -> {}",
        trip.id,
        transition.from.as_str(),
        transition.to.as_str()
    );
    if let Some(truck_status) = transition.truck_status {
        info!("truck {}: now {}", trip.truck_id, truck_status.as_str());
    }

    Ok(trip)
}

impl super::Database {
    /// Plans a new trip.
    ///
    /// The truck must exist and be available; a driver, if given, must exist
    /// and hold a valid license today. Any of these failing, a missing
    /// reference included, is an `InvalidOperation`. The truck is not
    /// reserved until the trip starts.
    pub fn create_trip(&mut self, params: &CreateTrip) -> Result<Trip> {
        params.validate()?;

        let tx = self.write_transaction()?;

        let truck = fetch_truck(&tx, params.truck_id)?.ok_or_else(|| {
            FleetError::invalid_operation(format!("truck {} does not exist", params.truck_id))
        })?;
        lifecycle::ensure_truck_available(&truck)?;

        if let Some(driver_id) = params.driver_id {
            let driver = fetch_driver(&tx, driver_id)?.ok_or_else(|| {
                FleetError::invalid_operation(format!("driver {driver_id} does not exist"))
            })?;
            lifecycle::ensure_license_valid(&driver, lifecycle::today())?;
        }

        let start_time = params.start_time.unwrap_or_else(Timestamp::now);

        tx.execute(
            INSERT_TRIP_SQL,
            params![
                params.truck_id as i64,
                params.driver_id.map(|d| d as i64),
                params.origin,
                params.destination,
                params.distance_km,
                start_time.to_string(),
                TripStatus::Planned.as_str()
            ],
        )
        .db_context("Failed to insert trip")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("trip {id}: planned for truck {}", params.truck_id);

        Ok(Trip {
            id,
            truck_id: params.truck_id,
            driver_id: params.driver_id,
            origin: params.origin.clone(),
            destination: params.destination.clone(),
            distance_km: params.distance_km,
            start_time,
            end_time: None,
            status: TripStatus::Planned,
        })
    }

    /// Retrieves a trip by its ID.
    pub fn get_trip(&self, trip_id: u64) -> Result<Option<Trip>> {
        fetch_trip(&self.connection, trip_id)
    }

    /// Lists trips matching every filter that is set, newest start first.
    pub fn list_trips(&self, filter: &ListTrips) -> Result<Vec<Trip>> {
        let mut query = format!("SELECT {TRIP_COLUMNS} FROM trips");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if filter.in_progress {
            conditions.push("status = ?");
            params_vec.push(Box::new(TripStatus::InProgress.as_str()));
        }
        if let Some(truck_id) = filter.truck_id {
            conditions.push("truck_id = ?");
            params_vec.push(Box::new(truck_id as i64));
        }
        if let Some(driver_id) = filter.driver_id {
            conditions.push("driver_id = ?");
            params_vec.push(Box::new(driver_id as i64));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut trips = stmt
            .query_map(&params_refs[..], build_trip_from_row)
            .db_context("Failed to query trips")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch trips")?;

        // Offsets and fractional seconds make RFC 3339 text unsafe to sort in SQL
        sort_newest_first(&mut trips);

        Ok(trips)
    }

    /// Loads a trip with its truck, driver and ledger records.
    pub fn get_trip_details(&self, trip_id: u64) -> Result<Option<TripDetails>> {
        let Some(trip) = fetch_trip(&self.connection, trip_id)? else {
            return Ok(None);
        };

        let truck = load_truck(&self.connection, trip.truck_id)?;
        let driver = match trip.driver_id {
            Some(driver_id) => fetch_driver(&self.connection, driver_id)?,
            None => None,
        };
        let tolls = fetch_tolls_for_trip(&self.connection, trip.id)?;
        let fuel = fetch_fuel_for_trip(&self.connection, trip.id)?;

        Ok(Some(TripDetails {
            trip,
            truck,
            driver,
            tolls,
            fuel,
        }))
    }

    /// Sums a trip's toll and fuel ledgers.
    pub fn trip_expenses(&self, trip_id: u64) -> Result<TripExpenses> {
        let trip = load_trip(&self.connection, trip_id)?;
        let toll_total = sum_tolls_for_trip(&self.connection, trip.id)?;
        let (fuel_liters, fuel_total) = sum_fuel_for_trip(&self.connection, trip.id)?;

        Ok(TripExpenses {
            trip_id: trip.id,
            distance_km: trip.distance_km,
            toll_total,
            fuel_total,
            fuel_liters,
        })
    }

    /// Edits a planned trip.
    ///
    /// A replacement truck or driver only has to exist here; availability and
    /// license validity are checked again when the trip starts.
    pub fn update_trip(&mut self, params: &UpdateTrip) -> Result<Trip> {
        params.validate()?;

        let tx = self.write_transaction()?;

        let mut trip = load_trip(&tx, params.id)?;
        lifecycle::authorize(&trip, TripAction::Edit)?;

        if let Some(truck_id) = params.truck_id {
            load_truck(&tx, truck_id)?;
            trip.truck_id = truck_id;
        }
        if let Some(driver_id) = params.driver_id {
            if let Some(driver_id) = driver_id {
                load_driver(&tx, driver_id)?;
            }
            trip.driver_id = driver_id;
        }
        if let Some(ref origin) = params.origin {
            trip.origin = origin.clone();
        }
        if let Some(ref destination) = params.destination {
            trip.destination = destination.clone();
        }
        if let Some(distance_km) = params.distance_km {
            trip.distance_km = distance_km;
        }
        if let Some(start_time) = params.start_time {
            trip.start_time = start_time;
        }

        write_trip(&tx, &trip)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(trip)
    }

    /// Starts a planned trip: the truck goes on trip and the start time is
    /// reset to now.
    pub fn start_trip(&mut self, trip_id: u64) -> Result<Trip> {
        let tx = self.write_transaction()?;

        let mut trip = load_trip(&tx, trip_id)?;
        let transition = lifecycle::transition(&trip, TripAction::Start)?;
        let driver_id = lifecycle::require_driver(&trip)?;

        let truck = load_truck(&tx, trip.truck_id)?;
        lifecycle::ensure_truck_available(&truck)?;

        let driver = load_driver(&tx, driver_id)?;
        lifecycle::ensure_license_valid(&driver, lifecycle::today())?;

        trip.start_time = Timestamp::now();

        commit_transition(tx, trip, transition)
    }

    /// Completes a trip in progress and releases its truck.
    pub fn finish_trip(&mut self, trip_id: u64) -> Result<Trip> {
        let tx = self.write_transaction()?;

        let mut trip = load_trip(&tx, trip_id)?;
        let transition = lifecycle::transition(&trip, TripAction::Finish)?;

        trip.end_time = Some(Timestamp::now());

        commit_transition(tx, trip, transition)
    }

    /// Cancels a planned or in-progress trip. Only an in-progress trip had
    /// its truck marked on trip, so only then is the truck released.
    pub fn cancel_trip(&mut self, trip_id: u64) -> Result<Trip> {
        let tx = self.write_transaction()?;

        let mut trip = load_trip(&tx, trip_id)?;
        let transition = lifecycle::transition(&trip, TripAction::Cancel)?;

        trip.end_time = Some(Timestamp::now());

        commit_transition(tx, trip, transition)
    }

    /// Deletes a planned or cancelled trip together with its ledger records.
    pub fn delete_trip(&mut self, trip_id: u64) -> Result<Trip> {
        let tx = self.write_transaction()?;

        let trip = load_trip(&tx, trip_id)?;
        lifecycle::authorize(&trip, TripAction::Delete)?;

        tx.execute(DELETE_TRIP_TOLLS_SQL, params![trip_id as i64])
            .db_context("Failed to delete trip tolls")?;
        tx.execute(DELETE_TRIP_FUEL_SQL, params![trip_id as i64])
            .db_context("Failed to delete trip fuel records")?;
        tx.execute(DELETE_TRIP_SQL, params![trip_id as i64])
            .db_context("Failed to delete trip")?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("trip {trip_id}: deleted");

        Ok(trip)
    }
}
