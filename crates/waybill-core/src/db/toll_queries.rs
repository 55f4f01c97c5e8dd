//! Toll ledger queries.
//!
//! Writes are gated on the owning trip being in progress. For updates and
//! deletes the trip is taken from the stored record, never from the caller.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{
    convert::{id, parsed},
    trip_queries::authorize_ledger_write,
};
use crate::{
    error::{DatabaseResultExt, FleetError, Result},
    models::TollRecord,
    params::{CreateToll, UpdateToll},
};

const TOLL_COLUMNS: &str = "id, trip_id, amount, location, paid_at";
const INSERT_TOLL_SQL: &str =
    "INSERT INTO tolls (trip_id, amount, location, paid_at) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_TOLL_SQL: &str =
    "UPDATE tolls SET amount = ?1, location = ?2, paid_at = ?3 WHERE id = ?4";
const DELETE_TOLL_SQL: &str = "DELETE FROM tolls WHERE id = ?1";

fn build_toll_from_row(row: &Row<'_>) -> rusqlite::Result<TollRecord> {
    Ok(TollRecord {
        id: id(row, 0)?,
        trip_id: id(row, 1)?,
        amount: parsed(row, 2)?,
        location: row.get(3)?,
        paid_at: parsed(row, 4)?,
    })
}

fn sort_by_paid_at(tolls: &mut [TollRecord]) {
    tolls.sort_by(|a, b| a.paid_at.cmp(&b.paid_at).then_with(|| a.id.cmp(&b.id)));
}

fn fetch_toll(conn: &Connection, toll_id: u64) -> Result<Option<TollRecord>> {
    conn.query_row(
        &format!("SELECT {TOLL_COLUMNS} FROM tolls WHERE id = ?1"),
        params![toll_id as i64],
        build_toll_from_row,
    )
    .optional()
    .db_context("Failed to query toll")
}

fn load_toll(conn: &Connection, toll_id: u64) -> Result<TollRecord> {
    fetch_toll(conn, toll_id)?.ok_or(FleetError::TollNotFound { id: toll_id })
}

/// Tolls of one trip, oldest first.
pub(crate) fn fetch_tolls_for_trip(conn: &Connection, trip_id: u64) -> Result<Vec<TollRecord>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {TOLL_COLUMNS} FROM tolls WHERE trip_id = ?1"))
        .db_context("Failed to prepare query")?;

    let mut tolls = stmt
        .query_map(params![trip_id as i64], build_toll_from_row)
        .db_context("Failed to query tolls")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to fetch tolls")?;

    sort_by_paid_at(&mut tolls);
    Ok(tolls)
}

/// Total toll spending of one trip.
pub(crate) fn sum_tolls_for_trip(conn: &Connection, trip_id: u64) -> Result<Decimal> {
    fetch_tolls_for_trip(conn, trip_id)?
        .iter()
        .try_fold(Decimal::ZERO, |total, toll| total.checked_add(toll.amount))
        .ok_or_else(|| FleetError::AmountOverflow {
            what: format!("tolls of trip {trip_id}"),
        })
}

impl super::Database {
    /// Records a toll against a trip in progress.
    pub fn create_toll(&mut self, params: &CreateToll) -> Result<TollRecord> {
        params.validate()?;

        let tx = self.write_transaction()?;

        authorize_ledger_write(&tx, params.trip_id)?;

        let paid_at = params.paid_at.unwrap_or_else(Timestamp::now);

        tx.execute(
            INSERT_TOLL_SQL,
            params![
                params.trip_id as i64,
                params.amount.to_string(),
                params.location,
                paid_at.to_string()
            ],
        )
        .db_context("Failed to insert toll")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(TollRecord {
            id,
            trip_id: params.trip_id,
            amount: params.amount,
            location: params.location.clone(),
            paid_at,
        })
    }

    /// Retrieves a toll by its ID.
    pub fn get_toll(&self, toll_id: u64) -> Result<Option<TollRecord>> {
        fetch_toll(&self.connection, toll_id)
    }

    /// Lists every toll, grouped by trip and oldest first within a trip.
    pub fn list_tolls(&self) -> Result<Vec<TollRecord>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {TOLL_COLUMNS} FROM tolls"))
            .db_context("Failed to prepare query")?;

        let mut tolls = stmt
            .query_map([], build_toll_from_row)
            .db_context("Failed to query tolls")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch tolls")?;

        sort_by_paid_at(&mut tolls);
        tolls.sort_by_key(|toll| toll.trip_id);
        Ok(tolls)
    }

    /// Lists the tolls of one trip, oldest first. No status guard.
    pub fn list_trip_tolls(&self, trip_id: u64) -> Result<Vec<TollRecord>> {
        fetch_tolls_for_trip(&self.connection, trip_id)
    }

    /// Total toll spending of one trip. No status guard.
    pub fn trip_toll_total(&self, trip_id: u64) -> Result<Decimal> {
        sum_tolls_for_trip(&self.connection, trip_id)
    }

    /// Amends a toll while its trip is in progress.
    pub fn update_toll(&mut self, params: &UpdateToll) -> Result<TollRecord> {
        params.validate()?;

        let tx = self.write_transaction()?;

        let mut toll = load_toll(&tx, params.id)?;
        authorize_ledger_write(&tx, toll.trip_id)?;

        if let Some(amount) = params.amount {
            toll.amount = amount;
        }
        if let Some(ref location) = params.location {
            toll.location = location.clone();
        }
        if let Some(paid_at) = params.paid_at {
            toll.paid_at = paid_at;
        }

        tx.execute(
            UPDATE_TOLL_SQL,
            params![
                toll.amount.to_string(),
                toll.location,
                toll.paid_at.to_string(),
                toll.id as i64
            ],
        )
        .db_context("Failed to update toll")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(toll)
    }

    /// Removes a toll while its trip is in progress.
    pub fn delete_toll(&mut self, toll_id: u64) -> Result<TollRecord> {
        let tx = self.write_transaction()?;

        let toll = load_toll(&tx, toll_id)?;
        authorize_ledger_write(&tx, toll.trip_id)?;

        tx.execute(DELETE_TOLL_SQL, params![toll_id as i64])
            .db_context("Failed to delete toll")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(toll)
    }
}
