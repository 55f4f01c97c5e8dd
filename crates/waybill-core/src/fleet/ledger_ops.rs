//! Toll and fuel ledger operations for the Fleet.
//!
//! Writes require the owning trip to be in progress. Reads are unguarded.

use rust_decimal::Decimal;

use super::Fleet;
use crate::{
    error::{FleetError, Result},
    models::{FuelRecord, TollRecord},
    params::{CreateFuel, CreateToll, Id, UpdateFuel, UpdateToll},
};

impl Fleet {
    /// Records a toll on a trip in progress.
    pub async fn create_toll(&self, params: &CreateToll) -> Result<TollRecord> {
        let params = params.clone();
        self.with_database("create_toll", move |db| db.create_toll(&params))
            .await
    }

    /// Retrieves a toll, failing with `TollNotFound` if absent.
    pub async fn get_toll(&self, params: &Id) -> Result<TollRecord> {
        let toll_id = params.id;
        self.with_database("get_toll", move |db| {
            db.get_toll(toll_id)?
                .ok_or(FleetError::TollNotFound { id: toll_id })
        })
        .await
    }

    /// Lists every toll in the ledger.
    pub async fn list_tolls(&self) -> Result<Vec<TollRecord>> {
        self.with_database("list_tolls", |db| db.list_tolls()).await
    }

    /// Lists the tolls of one trip, oldest first.
    pub async fn list_trip_tolls(&self, params: &Id) -> Result<Vec<TollRecord>> {
        let trip_id = params.id;
        self.with_database("list_trip_tolls", move |db| db.list_trip_tolls(trip_id))
            .await
    }

    /// Total toll spending of one trip.
    pub async fn trip_toll_total(&self, params: &Id) -> Result<Decimal> {
        let trip_id = params.id;
        self.with_database("trip_toll_total", move |db| db.trip_toll_total(trip_id))
            .await
    }

    /// Amends a toll while its trip is in progress.
    pub async fn update_toll(&self, params: &UpdateToll) -> Result<TollRecord> {
        let params = params.clone();
        self.with_database("update_toll", move |db| db.update_toll(&params))
            .await
    }

    /// Removes a toll while its trip is in progress.
    pub async fn delete_toll(&self, params: &Id) -> Result<TollRecord> {
        let toll_id = params.id;
        self.with_database("delete_toll", move |db| db.delete_toll(toll_id))
            .await
    }

    /// Records a refuelling stop on a trip in progress.
    pub async fn create_fuel(&self, params: &CreateFuel) -> Result<FuelRecord> {
        let params = params.clone();
        self.with_database("create_fuel", move |db| db.create_fuel(&params))
            .await
    }

    /// Retrieves a fuel record, failing with `FuelNotFound` if absent.
    pub async fn get_fuel(&self, params: &Id) -> Result<FuelRecord> {
        let fuel_id = params.id;
        self.with_database("get_fuel", move |db| {
            db.get_fuel(fuel_id)?
                .ok_or(FleetError::FuelNotFound { id: fuel_id })
        })
        .await
    }

    /// Lists every fuel record in the ledger.
    pub async fn list_fuel(&self) -> Result<Vec<FuelRecord>> {
        self.with_database("list_fuel", |db| db.list_fuel()).await
    }

    /// Lists the fuel records of one trip, oldest first.
    pub async fn list_trip_fuel(&self, params: &Id) -> Result<Vec<FuelRecord>> {
        let trip_id = params.id;
        self.with_database("list_trip_fuel", move |db| db.list_trip_fuel(trip_id))
            .await
    }

    /// Total fuel spending of one trip.
    pub async fn trip_fuel_total(&self, params: &Id) -> Result<Decimal> {
        let trip_id = params.id;
        self.with_database("trip_fuel_total", move |db| db.trip_fuel_total(trip_id))
            .await
    }

    /// Total liters pumped on one trip.
    pub async fn trip_fuel_liters(&self, params: &Id) -> Result<Decimal> {
        let trip_id = params.id;
        self.with_database("trip_fuel_liters", move |db| db.trip_fuel_liters(trip_id))
            .await
    }

    /// Amends a fuel record while its trip is in progress.
    pub async fn update_fuel(&self, params: &UpdateFuel) -> Result<FuelRecord> {
        let params = params.clone();
        self.with_database("update_fuel", move |db| db.update_fuel(&params))
            .await
    }

    /// Removes a fuel record while its trip is in progress.
    pub async fn delete_fuel(&self, params: &Id) -> Result<FuelRecord> {
        let fuel_id = params.id;
        self.with_database("delete_fuel", move |db| db.delete_fuel(fuel_id))
            .await
    }
}
