//! Fuel ledger queries. Same trip gating as the toll ledger.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{
    convert::{id, parsed},
    trip_queries::authorize_ledger_write,
};
use crate::{
    error::{DatabaseResultExt, FleetError, Result},
    models::FuelRecord,
    params::{CreateFuel, UpdateFuel},
};

const FUEL_COLUMNS: &str = "id, trip_id, liters, amount, location, fueled_at";
const INSERT_FUEL_SQL: &str = "INSERT INTO fuel_records (trip_id, liters, amount, location, fueled_at) \
     VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_FUEL_SQL: &str = "UPDATE fuel_records SET liters = ?1, amount = ?2, location = ?3, \
     fueled_at = ?4 WHERE id = ?5";
const DELETE_FUEL_SQL: &str = "DELETE FROM fuel_records WHERE id = ?1";

fn build_fuel_from_row(row: &Row<'_>) -> rusqlite::Result<FuelRecord> {
    Ok(FuelRecord {
        id: id(row, 0)?,
        trip_id: id(row, 1)?,
        liters: parsed(row, 2)?,
        amount: parsed(row, 3)?,
        location: row.get(4)?,
        fueled_at: parsed(row, 5)?,
    })
}

fn sort_by_fueled_at(records: &mut [FuelRecord]) {
    records.sort_by(|a, b| a.fueled_at.cmp(&b.fueled_at).then_with(|| a.id.cmp(&b.id)));
}

fn fetch_fuel(conn: &Connection, fuel_id: u64) -> Result<Option<FuelRecord>> {
    conn.query_row(
        &format!("SELECT {FUEL_COLUMNS} FROM fuel_records WHERE id = ?1"),
        params![fuel_id as i64],
        build_fuel_from_row,
    )
    .optional()
    .db_context("Failed to query fuel record")
}

fn load_fuel(conn: &Connection, fuel_id: u64) -> Result<FuelRecord> {
    fetch_fuel(conn, fuel_id)?.ok_or(FleetError::FuelNotFound { id: fuel_id })
}

/// Fuel records of one trip, oldest first.
pub(crate) fn fetch_fuel_for_trip(conn: &Connection, trip_id: u64) -> Result<Vec<FuelRecord>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {FUEL_COLUMNS} FROM fuel_records WHERE trip_id = ?1"
        ))
        .db_context("Failed to prepare query")?;

    let mut records = stmt
        .query_map(params![trip_id as i64], build_fuel_from_row)
        .db_context("Failed to query fuel records")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to fetch fuel records")?;

    sort_by_fueled_at(&mut records);
    Ok(records)
}

/// Total `(liters, amount)` of one trip.
pub(crate) fn sum_fuel_for_trip(conn: &Connection, trip_id: u64) -> Result<(Decimal, Decimal)> {
    fetch_fuel_for_trip(conn, trip_id)?
        .iter()
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(liters, amount), record| {
            Some((
                liters.checked_add(record.liters)?,
                amount.checked_add(record.amount)?,
            ))
        })
        .ok_or_else(|| FleetError::AmountOverflow {
            what: format!("fuel records of trip {trip_id}"),
        })
}

impl super::Database {
    /// Records a refuelling stop against a trip in progress.
    pub fn create_fuel(&mut self, params: &CreateFuel) -> Result<FuelRecord> {
        params.validate()?;

        let tx = self.write_transaction()?;

        authorize_ledger_write(&tx, params.trip_id)?;

        let fueled_at = params.fueled_at.unwrap_or_else(Timestamp::now);

        tx.execute(
            INSERT_FUEL_SQL,
            params![
                params.trip_id as i64,
                params.liters.to_string(),
                params.amount.to_string(),
                params.location,
                fueled_at.to_string()
            ],
        )
        .db_context("Failed to insert fuel record")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(FuelRecord {
            id,
            trip_id: params.trip_id,
            liters: params.liters,
            amount: params.amount,
            location: params.location.clone(),
            fueled_at,
        })
    }

    /// Retrieves a fuel record by its ID.
    pub fn get_fuel(&self, fuel_id: u64) -> Result<Option<FuelRecord>> {
        fetch_fuel(&self.connection, fuel_id)
    }

    /// Lists every fuel record, grouped by trip and oldest first within a trip.
    pub fn list_fuel(&self) -> Result<Vec<FuelRecord>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {FUEL_COLUMNS} FROM fuel_records"))
            .db_context("Failed to prepare query")?;

        let mut records = stmt
            .query_map([], build_fuel_from_row)
            .db_context("Failed to query fuel records")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch fuel records")?;

        sort_by_fueled_at(&mut records);
        records.sort_by_key(|record| record.trip_id);
        Ok(records)
    }

    /// Lists the fuel records of one trip, oldest first. No status guard.
    pub fn list_trip_fuel(&self, trip_id: u64) -> Result<Vec<FuelRecord>> {
        fetch_fuel_for_trip(&self.connection, trip_id)
    }

    /// Total fuel spending of one trip. No status guard.
    pub fn trip_fuel_total(&self, trip_id: u64) -> Result<Decimal> {
        Ok(sum_fuel_for_trip(&self.connection, trip_id)?.1)
    }

    /// Total liters pumped on one trip. No status guard.
    pub fn trip_fuel_liters(&self, trip_id: u64) -> Result<Decimal> {
        Ok(sum_fuel_for_trip(&self.connection, trip_id)?.0)
    }

    /// Amends a fuel record while its trip is in progress.
    pub fn update_fuel(&mut self, params: &UpdateFuel) -> Result<FuelRecord> {
        params.validate()?;

        let tx = self.write_transaction()?;

        let mut record = load_fuel(&tx, params.id)?;
        authorize_ledger_write(&tx, record.trip_id)?;

        if let Some(liters) = params.liters {
            record.liters = liters;
        }
        if let Some(amount) = params.amount {
            record.amount = amount;
        }
        if let Some(ref location) = params.location {
            record.location = location.clone();
        }
        if let Some(fueled_at) = params.fueled_at {
            record.fueled_at = fueled_at;
        }

        tx.execute(
            UPDATE_FUEL_SQL,
            params![
                record.liters.to_string(),
                record.amount.to_string(),
                record.location,
                record.fueled_at.to_string(),
                record.id as i64
            ],
        )
        .db_context("Failed to update fuel record")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(record)
    }

    /// Removes a fuel record while its trip is in progress.
    pub fn delete_fuel(&mut self, fuel_id: u64) -> Result<FuelRecord> {
        let tx = self.write_transaction()?;

        let record = load_fuel(&tx, fuel_id)?;
        authorize_ledger_write(&tx, record.trip_id)?;

        tx.execute(DELETE_FUEL_SQL, params![fuel_id as i64])
            .db_context("Failed to delete fuel record")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(record)
    }
}
