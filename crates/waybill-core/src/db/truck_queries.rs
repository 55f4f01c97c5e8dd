//! Truck registry queries.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::convert::{id, parsed};
use crate::{
    error::{DatabaseResultExt, FleetError, Result},
    lifecycle,
    models::{Truck, TruckStatus},
    params::{CreateTruck, UpdateTruck},
};

const TRUCK_COLUMNS: &str = "id, model, plate, manufactured_on, status";
const INSERT_TRUCK_SQL: &str =
    "INSERT INTO trucks (model, plate, manufactured_on, status) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_TRUCK_SQL: &str =
    "UPDATE trucks SET model = ?1, plate = ?2, manufactured_on = ?3, status = ?4 WHERE id = ?5";
const UPDATE_TRUCK_STATUS_SQL: &str = "UPDATE trucks SET status = ?1 WHERE id = ?2";
const SELECT_PLATE_HOLDER_SQL: &str = "SELECT id FROM trucks WHERE plate = ?1";
const COUNT_TRUCK_TRIPS_SQL: &str = "SELECT COUNT(*) FROM trips WHERE truck_id = ?1";
const DELETE_TRUCK_SQL: &str = "DELETE FROM trucks WHERE id = ?1";

fn build_truck_from_row(row: &Row<'_>) -> rusqlite::Result<Truck> {
    Ok(Truck {
        id: id(row, 0)?,
        model: row.get(1)?,
        plate: row.get(2)?,
        manufactured_on: parsed(row, 3)?,
        status: parsed(row, 4)?,
    })
}

/// Fetches a truck by id.
pub(crate) fn fetch_truck(conn: &Connection, truck_id: u64) -> Result<Option<Truck>> {
    conn.query_row(
        &format!("SELECT {TRUCK_COLUMNS} FROM trucks WHERE id = ?1"),
        params![truck_id as i64],
        build_truck_from_row,
    )
    .optional()
    .db_context("Failed to query truck")
}

/// Fetches a truck by id, failing with `TruckNotFound` if absent.
pub(crate) fn load_truck(conn: &Connection, truck_id: u64) -> Result<Truck> {
    fetch_truck(conn, truck_id)?.ok_or(FleetError::TruckNotFound { id: truck_id })
}

/// Sets a truck's status without any guard; callers have already decided.
pub(crate) fn write_truck_status(conn: &Connection, truck_id: u64, status: TruckStatus) -> Result<()> {
    conn.execute(UPDATE_TRUCK_STATUS_SQL, params![status.as_str(), truck_id as i64])
        .db_context("Failed to update truck status")?;
    Ok(())
}

/// Rejects `plate` if a truck other than `exclude` already holds it.
fn ensure_plate_free(conn: &Connection, plate: &str, exclude: Option<u64>) -> Result<()> {
    let holder: Option<i64> = conn
        .query_row(SELECT_PLATE_HOLDER_SQL, params![plate], |row| row.get(0))
        .optional()
        .db_context("Failed to check plate uniqueness")?;

    match holder {
        Some(holder) if Some(holder as u64) != exclude => Err(FleetError::DuplicateKey {
            field: "plate",
            value: plate.to_string(),
        }),
        _ => Ok(()),
    }
}

impl super::Database {
    /// Registers a new truck. Trucks start out available.
    pub fn create_truck(&mut self, params: &CreateTruck) -> Result<Truck> {
        params.validate()?;

        let tx = self.write_transaction()?;

        ensure_plate_free(&tx, &params.plate, None)?;

        tx.execute(
            INSERT_TRUCK_SQL,
            params![
                params.model,
                params.plate,
                params.manufactured_on.to_string(),
                TruckStatus::Available.as_str()
            ],
        )
        .db_context("Failed to insert truck")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Truck {
            id,
            model: params.model.clone(),
            plate: params.plate.clone(),
            manufactured_on: params.manufactured_on,
            status: TruckStatus::Available,
        })
    }

    /// Retrieves a truck by its ID.
    pub fn get_truck(&self, truck_id: u64) -> Result<Option<Truck>> {
        fetch_truck(&self.connection, truck_id)
    }

    /// Lists trucks ordered by id, optionally only the available ones.
    pub fn list_trucks(&self, only_available: bool) -> Result<Vec<Truck>> {
        let mut query = format!("SELECT {TRUCK_COLUMNS} FROM trucks");
        if only_available {
            query.push_str(" WHERE status = ?1");
        }
        query.push_str(" ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let rows = if only_available {
            stmt.query_map(params![TruckStatus::Available.as_str()], build_truck_from_row)
        } else {
            stmt.query_map([], build_truck_from_row)
        }
        .db_context("Failed to query trucks")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch trucks")
    }

    /// Applies a partial update to a truck.
    ///
    /// The plate must stay unique (a truck may keep its own plate). Status
    /// may be toggled between available and maintenance; `on_trip` is only
    /// reachable through a trip.
    pub fn update_truck(&mut self, params: &UpdateTruck) -> Result<Truck> {
        params.validate()?;

        let tx = self.write_transaction()?;

        let mut truck = load_truck(&tx, params.id)?;

        if let Some(ref plate) = params.plate {
            ensure_plate_free(&tx, plate, Some(truck.id))?;
            truck.plate = plate.clone();
        }
        if let Some(status) = params.status {
            lifecycle::ensure_direct_status_edit(&truck, status)?;
            truck.status = status;
        }
        if let Some(ref model) = params.model {
            truck.model = model.clone();
        }
        if let Some(date) = params.manufactured_on {
            truck.manufactured_on = date;
        }

        tx.execute(
            UPDATE_TRUCK_SQL,
            params![
                truck.model,
                truck.plate,
                truck.manufactured_on.to_string(),
                truck.status.as_str(),
                truck.id as i64
            ],
        )
        .db_context("Failed to update truck")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(truck)
    }

    /// Deletes a truck. Trucks referenced by any trip are kept.
    pub fn delete_truck(&mut self, truck_id: u64) -> Result<Truck> {
        let tx = self.write_transaction()?;

        let truck = load_truck(&tx, truck_id)?;

        let trips: i64 = tx
            .query_row(COUNT_TRUCK_TRIPS_SQL, params![truck_id as i64], |row| row.get(0))
            .db_context("Failed to count truck trips")?;
        if trips > 0 {
            return Err(FleetError::invalid_operation(format!(
                "truck {truck_id} is referenced by {trips} trip(s)"
            )));
        }

        tx.execute(DELETE_TRUCK_SQL, params![truck_id as i64])
            .db_context("Failed to delete truck")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(truck)
    }
}
