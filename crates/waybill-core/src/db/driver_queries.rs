//! Driver registry queries.

use jiff::civil::Date;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::convert::{id, parsed};
use crate::{
    error::{DatabaseResultExt, FleetError, Result},
    models::Driver,
    params::{CreateDriver, UpdateDriver},
};

const DRIVER_COLUMNS: &str = "id, name, license_number, license_expires_on";
const INSERT_DRIVER_SQL: &str =
    "INSERT INTO drivers (name, license_number, license_expires_on) VALUES (?1, ?2, ?3)";
const UPDATE_DRIVER_SQL: &str =
    "UPDATE drivers SET name = ?1, license_number = ?2, license_expires_on = ?3 WHERE id = ?4";
const SELECT_LICENSE_HOLDER_SQL: &str = "SELECT id FROM drivers WHERE license_number = ?1";
const COUNT_DRIVER_TRIPS_SQL: &str = "SELECT COUNT(*) FROM trips WHERE driver_id = ?1";
const DELETE_DRIVER_SQL: &str = "DELETE FROM drivers WHERE id = ?1";

fn build_driver_from_row(row: &Row<'_>) -> rusqlite::Result<Driver> {
    Ok(Driver {
        id: id(row, 0)?,
        name: row.get(1)?,
        license_number: row.get(2)?,
        license_expires_on: parsed(row, 3)?,
    })
}

/// Fetches a driver by id.
pub(crate) fn fetch_driver(conn: &Connection, driver_id: u64) -> Result<Option<Driver>> {
    conn.query_row(
        &format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = ?1"),
        params![driver_id as i64],
        build_driver_from_row,
    )
    .optional()
    .db_context("Failed to query driver")
}

/// Fetches a driver by id, failing with `DriverNotFound` if absent.
pub(crate) fn load_driver(conn: &Connection, driver_id: u64) -> Result<Driver> {
    fetch_driver(conn, driver_id)?.ok_or(FleetError::DriverNotFound { id: driver_id })
}

fn ensure_license_free(conn: &Connection, license: &str, exclude: Option<u64>) -> Result<()> {
    let holder: Option<i64> = conn
        .query_row(SELECT_LICENSE_HOLDER_SQL, params![license], |row| row.get(0))
        .optional()
        .db_context("Failed to check license uniqueness")?;

    match holder {
        Some(holder) if Some(holder as u64) != exclude => Err(FleetError::DuplicateKey {
            field: "license number",
            value: license.to_string(),
        }),
        _ => Ok(()),
    }
}

impl super::Database {
    /// Registers a new driver.
    pub fn create_driver(&mut self, params: &CreateDriver) -> Result<Driver> {
        params.validate()?;

        let tx = self.write_transaction()?;

        ensure_license_free(&tx, &params.license_number, None)?;

        tx.execute(
            INSERT_DRIVER_SQL,
            params![
                params.name,
                params.license_number,
                params.license_expires_on.to_string()
            ],
        )
        .db_context("Failed to insert driver")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Driver {
            id,
            name: params.name.clone(),
            license_number: params.license_number.clone(),
            license_expires_on: params.license_expires_on,
        })
    }

    /// Retrieves a driver by its ID.
    pub fn get_driver(&self, driver_id: u64) -> Result<Option<Driver>> {
        fetch_driver(&self.connection, driver_id)
    }

    /// Lists drivers ordered by id.
    ///
    /// With `valid_on` set, only drivers whose license is still valid on that
    /// date (inclusive) are returned. Expiry is compared as a parsed `Date`,
    /// not as stored text.
    pub fn list_drivers(&self, valid_on: Option<Date>) -> Result<Vec<Driver>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {DRIVER_COLUMNS} FROM drivers ORDER BY id"))
            .db_context("Failed to prepare query")?;

        let drivers = stmt
            .query_map([], build_driver_from_row)
            .db_context("Failed to query drivers")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch drivers")?;

        Ok(match valid_on {
            Some(date) => drivers
                .into_iter()
                .filter(|driver| driver.has_valid_license(date))
                .collect(),
            None => drivers,
        })
    }

    /// Applies a partial update to a driver, keeping license numbers unique.
    pub fn update_driver(&mut self, params: &UpdateDriver) -> Result<Driver> {
        params.validate()?;

        let tx = self.write_transaction()?;

        let mut driver = load_driver(&tx, params.id)?;

        if let Some(ref license) = params.license_number {
            ensure_license_free(&tx, license, Some(driver.id))?;
            driver.license_number = license.clone();
        }
        if let Some(ref name) = params.name {
            driver.name = name.clone();
        }
        if let Some(expiry) = params.license_expires_on {
            driver.license_expires_on = expiry;
        }

        tx.execute(
            UPDATE_DRIVER_SQL,
            params![
                driver.name,
                driver.license_number,
                driver.license_expires_on.to_string(),
                driver.id as i64
            ],
        )
        .db_context("Failed to update driver")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(driver)
    }

    /// Deletes a driver. Drivers referenced by any trip are kept.
    pub fn delete_driver(&mut self, driver_id: u64) -> Result<Driver> {
        let tx = self.write_transaction()?;

        let driver = load_driver(&tx, driver_id)?;

        let trips: i64 = tx
            .query_row(COUNT_DRIVER_TRIPS_SQL, params![driver_id as i64], |row| row.get(0))
            .db_context("Failed to count driver trips")?;
        if trips > 0 {
            return Err(FleetError::invalid_operation(format!(
                "driver {driver_id} is referenced by {trips} trip(s)"
            )));
        }

        tx.execute(DELETE_DRIVER_SQL, params![driver_id as i64])
            .db_context("Failed to delete driver")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(driver)
    }
}
