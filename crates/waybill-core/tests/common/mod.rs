#![allow(dead_code)]

use jiff::civil::{date, Date};
use tempfile::TempDir;
use waybill_core::{
    params::{CreateDriver, CreateTrip, CreateTruck},
    Fleet, FleetBuilder,
};

/// Helper function to create a test fleet
pub async fn create_test_fleet() -> (TempDir, Fleet) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let fleet = FleetBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create fleet");
    (temp_dir, fleet)
}

pub fn truck_params(plate: &str) -> CreateTruck {
    CreateTruck {
        model: "Scania R450".to_string(),
        plate: plate.to_string(),
        manufactured_on: date(2020, 5, 4),
    }
}

pub fn driver_params(license: &str, expires_on: Date) -> CreateDriver {
    CreateDriver {
        name: format!("Driver {license}"),
        license_number: license.to_string(),
        license_expires_on: expires_on,
    }
}

/// A license that will not expire during the test run.
pub fn far_future() -> Date {
    date(2099, 12, 31)
}

pub fn trip_params(truck_id: u64, driver_id: Option<u64>) -> CreateTrip {
    CreateTrip {
        truck_id,
        driver_id,
        origin: "Santos".to_string(),
        destination: "Campinas".to_string(),
        distance_km: 160,
        start_time: None,
    }
}
