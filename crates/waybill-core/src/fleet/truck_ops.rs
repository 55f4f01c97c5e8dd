//! Truck registry operations for the Fleet.

use super::Fleet;
use crate::{
    error::{FleetError, Result},
    models::Truck,
    params::{CreateTruck, Id, ListTrucks, UpdateTruck},
};

impl Fleet {
    /// Registers a truck. The plate must not be in use.
    pub async fn create_truck(&self, params: &CreateTruck) -> Result<Truck> {
        let params = params.clone();
        self.with_database("create_truck", move |db| db.create_truck(&params))
            .await
    }

    /// Retrieves a truck, failing with `TruckNotFound` if absent.
    pub async fn get_truck(&self, params: &Id) -> Result<Truck> {
        let truck_id = params.id;
        self.with_database("get_truck", move |db| {
            db.get_truck(truck_id)?
                .ok_or(FleetError::TruckNotFound { id: truck_id })
        })
        .await
    }

    /// Lists trucks, optionally only those that can take a trip.
    pub async fn list_trucks(&self, params: &ListTrucks) -> Result<Vec<Truck>> {
        let only_available = params.available;
        self.with_database("list_trucks", move |db| db.list_trucks(only_available))
            .await
    }

    /// Lists trucks whose status is available.
    pub async fn list_available_trucks(&self) -> Result<Vec<Truck>> {
        self.list_trucks(&ListTrucks { available: true }).await
    }

    /// Applies a partial update to a truck.
    pub async fn update_truck(&self, params: &UpdateTruck) -> Result<Truck> {
        let params = params.clone();
        self.with_database("update_truck", move |db| db.update_truck(&params))
            .await
    }

    /// Deletes a truck that no trip references.
    pub async fn delete_truck(&self, params: &Id) -> Result<Truck> {
        let truck_id = params.id;
        self.with_database("delete_truck", move |db| db.delete_truck(truck_id))
            .await
    }
}
