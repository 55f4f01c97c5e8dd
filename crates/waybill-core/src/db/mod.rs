//! Database operations and SQLite management for the fleet.
//!
//! This module owns the SQLite connection and exposes one query module per
//! entity. Each query module has crate-visible `fetch_*` functions that take a
//! plain [`Connection`] so lifecycle operations can compose them inside a
//! single transaction, plus public `Database` methods for standalone use.

use std::{path::Path, time::Duration};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{DatabaseResultExt, Result};

mod convert;
pub mod driver_queries;
pub mod fuel_queries;
pub mod migrations;
pub mod toll_queries;
pub mod trip_queries;
pub mod truck_queries;

/// How long a writer waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Opens a connection with an explicit busy timeout.
    pub fn open<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(busy_timeout)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Begins a write transaction that takes the database write lock up
    /// front, so guard reads and the writes they permit see the same state.
    fn write_transaction(&mut self) -> Result<Transaction<'_>> {
        self.connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")
    }
}
