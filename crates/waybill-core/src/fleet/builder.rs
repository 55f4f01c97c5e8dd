//! Configuration of a [`Fleet`]: where its SQLite file lives and how long
//! writers wait on each other.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::task;

use super::Fleet;
use crate::{
    db::{Database, DEFAULT_BUSY_TIMEOUT},
    error::{FleetError, Result},
};

/// Resolves the database location and busy timeout, then opens the database
/// once so the schema exists before the first operation.
#[derive(Debug, Clone)]
pub struct FleetBuilder {
    database_path: Option<PathBuf>,
    busy_timeout: Duration,
}

impl FleetBuilder {
    /// Starts with the XDG data path and a five second busy timeout.
    pub fn new() -> Self {
        Self {
            database_path: None,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Stores the fleet in `path` instead of the default location.
    ///
    /// `None` keeps the default, `$XDG_DATA_HOME/waybill/waybill.db` (usually
    /// `~/.local/share/waybill/waybill.db`). Missing parent directories are
    /// created by [`build`](Self::build).
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets how long each operation waits on a locked database before it
    /// fails with `FleetError::Database`. Concurrent trip starts queue behind
    /// this lock.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Creates the database and its schema if missing, then returns a fleet
    /// that opens its own connection per operation.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::FileSystem` if the database directory cannot be
    /// created and `FleetError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<Fleet> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| FleetError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let db_path_clone = db_path.clone();
        let busy_timeout = self.busy_timeout;
        task::spawn_blocking(move || {
            let _db = Database::open(&db_path_clone, busy_timeout)?;
            Ok::<(), FleetError>(())
        })
        .await
        .map_err(|e| FleetError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Fleet::new(db_path, self.busy_timeout))
    }

    /// `waybill/waybill.db` under the XDG data home, with the `waybill`
    /// directory created on the way.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waybill")
            .place_data_file("waybill.db")
            .map_err(|e| FleetError::XdgDirectory(e.to_string()))
    }
}

impl Default for FleetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
