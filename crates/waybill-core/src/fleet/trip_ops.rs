//! Trip lifecycle operations for the Fleet.
//!
//! Every transition runs inside a single database transaction; see
//! [`crate::lifecycle`] for the allowed edges.

use super::Fleet;
use crate::{
    error::{FleetError, Result},
    models::{Trip, TripDetails, TripExpenses},
    params::{CreateTrip, Id, ListTrips, UpdateTrip},
};

impl Fleet {
    /// Plans a trip for an available truck.
    pub async fn create_trip(&self, params: &CreateTrip) -> Result<Trip> {
        let params = params.clone();
        self.with_database("create_trip", move |db| db.create_trip(&params))
            .await
    }

    /// Retrieves a trip, failing with `TripNotFound` if absent.
    pub async fn get_trip(&self, params: &Id) -> Result<Trip> {
        let trip_id = params.id;
        self.with_database("get_trip", move |db| {
            db.get_trip(trip_id)?
                .ok_or(FleetError::TripNotFound { id: trip_id })
        })
        .await
    }

    /// Retrieves a trip with its truck, driver and ledger records.
    pub async fn get_trip_details(&self, params: &Id) -> Result<TripDetails> {
        let trip_id = params.id;
        self.with_database("get_trip_details", move |db| {
            db.get_trip_details(trip_id)?
                .ok_or(FleetError::TripNotFound { id: trip_id })
        })
        .await
    }

    /// Lists trips matching the filters, newest start first.
    pub async fn list_trips(&self, params: &ListTrips) -> Result<Vec<Trip>> {
        let filter = params.clone();
        self.with_database("list_trips", move |db| db.list_trips(&filter))
            .await
    }

    /// Lists trips currently on the road.
    pub async fn list_trips_in_progress(&self) -> Result<Vec<Trip>> {
        self.list_trips(&ListTrips {
            in_progress: true,
            ..Default::default()
        })
        .await
    }

    /// Edits a planned trip.
    pub async fn update_trip(&self, params: &UpdateTrip) -> Result<Trip> {
        let params = params.clone();
        self.with_database("update_trip", move |db| db.update_trip(&params))
            .await
    }

    /// Starts a planned trip with a driver assigned.
    pub async fn start_trip(&self, params: &Id) -> Result<Trip> {
        let trip_id = params.id;
        self.with_database("start_trip", move |db| db.start_trip(trip_id))
            .await
    }

    /// Completes a trip in progress.
    pub async fn finish_trip(&self, params: &Id) -> Result<Trip> {
        let trip_id = params.id;
        self.with_database("finish_trip", move |db| db.finish_trip(trip_id))
            .await
    }

    /// Cancels a planned or in-progress trip.
    pub async fn cancel_trip(&self, params: &Id) -> Result<Trip> {
        let trip_id = params.id;
        self.with_database("cancel_trip", move |db| db.cancel_trip(trip_id))
            .await
    }

    /// Deletes a planned or cancelled trip and its ledger records.
    pub async fn delete_trip(&self, params: &Id) -> Result<Trip> {
        let trip_id = params.id;
        self.with_database("delete_trip", move |db| db.delete_trip(trip_id))
            .await
    }

    /// Sums the toll and fuel spending of a trip.
    pub async fn trip_expenses(&self, params: &Id) -> Result<TripExpenses> {
        let trip_id = params.id;
        self.with_database("trip_expenses", move |db| db.trip_expenses(trip_id))
            .await
    }
}
