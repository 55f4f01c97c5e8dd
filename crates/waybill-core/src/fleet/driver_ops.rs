//! Driver registry operations for the Fleet.

use super::Fleet;
use crate::{
    error::{FleetError, Result},
    lifecycle,
    models::Driver,
    params::{CreateDriver, Id, ListDrivers, UpdateDriver},
};

impl Fleet {
    /// Registers a driver. The license number must not be in use.
    pub async fn create_driver(&self, params: &CreateDriver) -> Result<Driver> {
        let params = params.clone();
        self.with_database("create_driver", move |db| db.create_driver(&params))
            .await
    }

    /// Retrieves a driver, failing with `DriverNotFound` if absent.
    pub async fn get_driver(&self, params: &Id) -> Result<Driver> {
        let driver_id = params.id;
        self.with_database("get_driver", move |db| {
            db.get_driver(driver_id)?
                .ok_or(FleetError::DriverNotFound { id: driver_id })
        })
        .await
    }

    /// Lists drivers, optionally only those whose license is valid today.
    pub async fn list_drivers(&self, params: &ListDrivers) -> Result<Vec<Driver>> {
        let valid_on = params.valid_license.then(lifecycle::today);
        self.with_database("list_drivers", move |db| db.list_drivers(valid_on))
            .await
    }

    /// Lists drivers whose license expires today or later.
    pub async fn list_drivers_with_valid_license(&self) -> Result<Vec<Driver>> {
        self.list_drivers(&ListDrivers {
            valid_license: true,
        })
        .await
    }

    /// Applies a partial update to a driver.
    pub async fn update_driver(&self, params: &UpdateDriver) -> Result<Driver> {
        let params = params.clone();
        self.with_database("update_driver", move |db| db.update_driver(&params))
            .await
    }

    /// Deletes a driver that no trip references.
    pub async fn delete_driver(&self, params: &Id) -> Result<Driver> {
        let driver_id = params.id;
        self.with_database("delete_driver", move |db| db.delete_driver(driver_id))
            .await
    }
}
