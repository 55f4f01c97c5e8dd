use jiff::{civil::date, Timestamp};
use rust_decimal::Decimal;
use tempfile::NamedTempFile;
use waybill_core::{
    params::{
        CreateDriver, CreateFuel, CreateToll, CreateTrip, CreateTruck, ListTrips, UpdateDriver,
        UpdateFuel, UpdateToll, UpdateTrip, UpdateTruck,
    },
    Database, ErrorKind, FleetError, TripStatus, TruckStatus,
};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn create_truck(db: &mut Database, plate: &str) -> u64 {
    db.create_truck(&CreateTruck {
        model: "Iveco S-Way".to_string(),
        plate: plate.to_string(),
        manufactured_on: date(2022, 1, 10),
    })
    .expect("Failed to create truck")
    .id
}

fn create_driver(db: &mut Database, license: &str) -> u64 {
    db.create_driver(&CreateDriver {
        name: "Marcos Pereira".to_string(),
        license_number: license.to_string(),
        license_expires_on: date(2099, 1, 1),
    })
    .expect("Failed to create driver")
    .id
}

fn create_trip(db: &mut Database, truck_id: u64, driver_id: Option<u64>) -> u64 {
    db.create_trip(&CreateTrip {
        truck_id,
        driver_id,
        origin: "Vitória".to_string(),
        destination: "Salvador".to_string(),
        distance_km: 1200,
        start_time: None,
    })
    .expect("Failed to create trip")
    .id
}

/// A truck, a driver and a trip already on the road.
fn trip_in_progress(db: &mut Database) -> (u64, u64) {
    let truck_id = create_truck(db, "RUN0001");
    let driver_id = create_driver(db, "ES-1001");
    let trip_id = create_trip(db, truck_id, Some(driver_id));
    db.start_trip(trip_id).expect("Failed to start trip");
    (truck_id, trip_id)
}

fn toll(trip_id: u64, cents: i64, paid_at: Option<Timestamp>) -> CreateToll {
    CreateToll {
        trip_id,
        amount: Decimal::new(cents, 2),
        location: format!("Plaza {cents}"),
        paid_at,
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());

    // Reopening runs the schema again; it must stay idempotent
    let reopened = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert!(reopened.list_trucks(false).unwrap().is_empty());
}

#[test]
fn test_truck_crud() {
    let (_temp_file, mut db) = create_test_db();

    let truck_id = create_truck(&mut db, "MNO7P89");
    let truck = db.get_truck(truck_id).unwrap().expect("Truck should exist");
    assert_eq!(truck.plate, "MNO7P89");
    assert_eq!(truck.status, TruckStatus::Available);

    let updated = db
        .update_truck(&UpdateTruck {
            id: truck_id,
            model: Some("Iveco S-Way 570".to_string()),
            status: Some(TruckStatus::InMaintenance),
            ..Default::default()
        })
        .expect("Failed to update truck");
    assert_eq!(updated.model, "Iveco S-Way 570");
    assert_eq!(updated.plate, "MNO7P89");
    assert_eq!(updated.status, TruckStatus::InMaintenance);

    assert!(db.list_trucks(true).unwrap().is_empty());
    assert_eq!(db.list_trucks(false).unwrap().len(), 1);

    let deleted = db.delete_truck(truck_id).expect("Failed to delete truck");
    assert_eq!(deleted.id, truck_id);
    assert!(db.get_truck(truck_id).unwrap().is_none());
}

#[test]
fn test_duplicate_plate_rejected() {
    let (_temp_file, mut db) = create_test_db();

    let first = create_truck(&mut db, "DUP1A11");
    let second = create_truck(&mut db, "DUP2B22");

    let err = db
        .create_truck(&CreateTruck {
            model: "Other".to_string(),
            plate: "DUP1A11".to_string(),
            manufactured_on: date(2015, 1, 1),
        })
        .unwrap_err();
    assert!(matches!(err, FleetError::DuplicateKey { field: "plate", .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);

    let err = db
        .update_truck(&UpdateTruck {
            id: second,
            plate: Some("DUP1A11".to_string()),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);

    // Keeping one's own plate is not a conflict
    db.update_truck(&UpdateTruck {
        id: first,
        plate: Some("DUP1A11".to_string()),
        ..Default::default()
    })
    .expect("Updating to own plate should succeed");
}

#[test]
fn test_duplicate_license_rejected() {
    let (_temp_file, mut db) = create_test_db();

    let first = create_driver(&mut db, "LIC-1");
    let second = create_driver(&mut db, "LIC-2");

    let err = db
        .update_driver(&UpdateDriver {
            id: second,
            license_number: Some("LIC-1".to_string()),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        FleetError::DuplicateKey {
            field: "license number",
            ..
        }
    ));

    let same = db
        .update_driver(&UpdateDriver {
            id: first,
            license_number: Some("LIC-1".to_string()),
            name: Some("Renamed".to_string()),
            ..Default::default()
        })
        .expect("Updating to own license should succeed");
    assert_eq!(same.name, "Renamed");
}

#[test]
fn test_list_drivers_with_valid_license() {
    let (_temp_file, mut db) = create_test_db();

    for (license, expiry) in [
        ("OLD", date(2024, 12, 31)),
        ("EDGE", date(2025, 1, 1)),
        ("NEW", date(2026, 1, 1)),
    ] {
        db.create_driver(&CreateDriver {
            name: license.to_string(),
            license_number: license.to_string(),
            license_expires_on: expiry,
        })
        .unwrap();
    }

    let valid: Vec<String> = db
        .list_drivers(Some(date(2025, 1, 1)))
        .unwrap()
        .into_iter()
        .map(|d| d.license_number)
        .collect();
    assert_eq!(valid, ["EDGE", "NEW"]);
    assert_eq!(db.list_drivers(None).unwrap().len(), 3);
}

#[test]
fn test_license_filter_compares_dates_not_text() {
    let (_temp_file, mut db) = create_test_db();

    for (license, expiry) in [
        ("BCE-10", date(-10, 1, 1)),
        ("BCE-1", date(-1, 1, 1)),
        ("LAST", date(9999, 12, 31)),
    ] {
        db.create_driver(&CreateDriver {
            name: license.to_string(),
            license_number: license.to_string(),
            license_expires_on: expiry,
        })
        .unwrap();
    }

    let valid_on = |day| -> Vec<String> {
        db.list_drivers(Some(day))
            .unwrap()
            .into_iter()
            .map(|d| d.license_number)
            .collect()
    };
    // "-000010-01-01" sorts after "-000005-01-01" as text
    assert_eq!(valid_on(date(-5, 1, 1)), ["BCE-1", "LAST"]);
    assert_eq!(valid_on(date(2025, 1, 1)), ["LAST"]);
    assert_eq!(valid_on(date(9999, 12, 31)), ["LAST"]);
}

#[test]
fn test_blank_input_never_reaches_storage() {
    let (_temp_file, mut db) = create_test_db();

    let err = db
        .create_driver(&CreateDriver {
            name: " ".to_string(),
            license_number: "X".to_string(),
            license_expires_on: date(2030, 1, 1),
        })
        .unwrap_err();
    assert!(matches!(err, FleetError::InvalidInput { .. }));
    assert!(db.list_drivers(None).unwrap().is_empty());
}

#[test]
fn test_referenced_truck_and_driver_cannot_be_deleted() {
    let (_temp_file, mut db) = create_test_db();

    let truck_id = create_truck(&mut db, "REF0001");
    let driver_id = create_driver(&mut db, "REF-1");
    let trip_id = create_trip(&mut db, truck_id, Some(driver_id));

    assert_eq!(
        db.delete_truck(truck_id).unwrap_err().kind(),
        ErrorKind::InvalidOperation
    );
    assert_eq!(
        db.delete_driver(driver_id).unwrap_err().kind(),
        ErrorKind::InvalidOperation
    );

    db.delete_trip(trip_id).expect("Planned trips can be deleted");
    db.delete_truck(truck_id).expect("Truck is free now");
    db.delete_driver(driver_id).expect("Driver is free now");
}

#[test]
fn test_list_trips_newest_first_across_precisions() {
    let (_temp_file, mut db) = create_test_db();
    let truck_id = create_truck(&mut db, "ORD0001");

    let whole: Timestamp = "2024-05-01T10:00:00Z".parse().unwrap();
    let fractional: Timestamp = "2024-05-01T10:00:00.5Z".parse().unwrap();
    let earlier: Timestamp = "2024-04-30T23:59:59Z".parse().unwrap();

    let mut ids = Vec::new();
    for start in [whole, fractional, earlier] {
        let trip = db
            .create_trip(&CreateTrip {
                truck_id,
                driver_id: None,
                origin: "A".to_string(),
                destination: "B".to_string(),
                distance_km: 10,
                start_time: Some(start),
            })
            .unwrap();
        ids.push(trip.id);
    }

    let listed: Vec<u64> = db
        .list_trips(&ListTrips::default())
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(listed, [ids[1], ids[0], ids[2]]);
}

#[test]
fn test_list_trips_filters_combine() {
    let (_temp_file, mut db) = create_test_db();
    let (truck_id, running) = trip_in_progress(&mut db);
    let other_truck = create_truck(&mut db, "OTH0001");
    let planned = create_trip(&mut db, other_truck, None);

    let by_truck = db
        .list_trips(&ListTrips {
            truck_id: Some(truck_id),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(by_truck.len(), 1);
    assert_eq!(by_truck[0].id, running);

    let in_progress = db
        .list_trips(&ListTrips {
            in_progress: true,
            truck_id: Some(other_truck),
            ..Default::default()
        })
        .unwrap();
    assert!(in_progress.is_empty());

    let unassigned = db.get_trip(planned).unwrap().unwrap();
    assert_eq!(unassigned.driver_id, None);
}

#[test]
fn test_update_trip_only_while_planned() {
    let (_temp_file, mut db) = create_test_db();
    let truck_id = create_truck(&mut db, "UPD0001");
    let driver_id = create_driver(&mut db, "UPD-1");
    let trip_id = create_trip(&mut db, truck_id, None);

    let updated = db
        .update_trip(&UpdateTrip {
            id: trip_id,
            driver_id: Some(Some(driver_id)),
            distance_km: Some(1250),
            ..Default::default()
        })
        .expect("Planned trips are editable");
    assert_eq!(updated.driver_id, Some(driver_id));
    assert_eq!(updated.distance_km, 1250);

    let err = db
        .update_trip(&UpdateTrip {
            id: trip_id,
            truck_id: Some(999),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, FleetError::TruckNotFound { id: 999 }));

    db.start_trip(trip_id).unwrap();
    let err = db
        .update_trip(&UpdateTrip {
            id: trip_id,
            origin: Some("Elsewhere".to_string()),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert_eq!(db.get_trip(trip_id).unwrap().unwrap().origin, "Vitória");
}

#[test]
fn test_update_trip_can_unassign_driver() {
    let (_temp_file, mut db) = create_test_db();
    let truck_id = create_truck(&mut db, "UNA0001");
    let driver_id = create_driver(&mut db, "UNA-1");
    let trip_id = create_trip(&mut db, truck_id, Some(driver_id));

    let updated = db
        .update_trip(&UpdateTrip {
            id: trip_id,
            driver_id: Some(None),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(updated.driver_id, None);
}

#[test]
fn test_tolls_ordered_by_paid_at_and_summed() {
    let (_temp_file, mut db) = create_test_db();
    let (_, trip_id) = trip_in_progress(&mut db);

    let late: Timestamp = "2024-05-01T12:00:00Z".parse().unwrap();
    let early: Timestamp = "2024-05-01T08:00:00Z".parse().unwrap();

    let second = db.create_toll(&toll(trip_id, 1590, Some(late))).unwrap();
    let first = db.create_toll(&toll(trip_id, 870, Some(early))).unwrap();

    let listed: Vec<u64> = db
        .list_trip_tolls(trip_id)
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(listed, [first.id, second.id]);
    assert_eq!(db.trip_toll_total(trip_id).unwrap(), Decimal::new(2460, 2));
    assert_eq!(db.list_tolls().unwrap().len(), 2);
}

#[test]
fn test_fuel_update_and_totals() {
    let (_temp_file, mut db) = create_test_db();
    let (_, trip_id) = trip_in_progress(&mut db);

    let record = db
        .create_fuel(&CreateFuel {
            trip_id,
            liters: Decimal::new(2500, 1),
            amount: Decimal::new(150000, 2),
            location: "Teixeira de Freitas".to_string(),
            fueled_at: None,
        })
        .unwrap();

    let updated = db
        .update_fuel(&UpdateFuel {
            id: record.id,
            liters: Some(Decimal::new(2600, 1)),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(updated.liters, Decimal::new(2600, 1));
    assert_eq!(updated.amount, Decimal::new(150000, 2));
    assert_eq!(updated.trip_id, trip_id);

    assert_eq!(db.trip_fuel_liters(trip_id).unwrap(), Decimal::new(260, 0));
    assert_eq!(db.trip_fuel_total(trip_id).unwrap(), Decimal::new(1500, 0));

    let stored = db.get_fuel(record.id).unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[test]
fn test_stored_totals_out_of_range_are_errors() {
    let (temp_file, mut db) = create_test_db();
    let (_, trip_id) = trip_in_progress(&mut db);

    // Amounts this large fail validation, so write them behind the API
    let raw = rusqlite::Connection::open(temp_file.path()).unwrap();
    let max = Decimal::MAX.to_string();
    for _ in 0..2 {
        raw.execute(
            "INSERT INTO tolls (trip_id, amount, location, paid_at) VALUES (?1, ?2, 'Plaza', ?3)",
            rusqlite::params![trip_id as i64, max, "2024-05-01T08:00:00Z"],
        )
        .unwrap();
        raw.execute(
            "INSERT INTO fuel_records (trip_id, liters, amount, location, fueled_at) \
             VALUES (?1, ?2, ?2, 'Posto', ?3)",
            rusqlite::params![trip_id as i64, max, "2024-05-01T09:00:00Z"],
        )
        .unwrap();
    }

    for err in [
        db.trip_toll_total(trip_id).unwrap_err(),
        db.trip_fuel_total(trip_id).unwrap_err(),
        db.trip_fuel_liters(trip_id).unwrap_err(),
        db.trip_expenses(trip_id).unwrap_err(),
    ] {
        assert!(matches!(err, FleetError::AmountOverflow { .. }));
        assert_eq!(err.kind(), ErrorKind::Failure);
        assert!(err.to_string().contains("out of range"));
    }
    assert_eq!(db.list_trip_tolls(trip_id).unwrap().len(), 2);
}

#[test]
fn test_ledger_write_on_missing_trip_is_not_found() {
    let (_temp_file, mut db) = create_test_db();

    let err = db.create_toll(&toll(77, 100, None)).unwrap_err();
    assert!(matches!(err, FleetError::TripNotFound { id: 77 }));

    let err = db
        .update_toll(&UpdateToll {
            id: 5,
            amount: Some(Decimal::ONE),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, FleetError::TollNotFound { id: 5 }));
    assert!(matches!(
        db.delete_fuel(6).unwrap_err(),
        FleetError::FuelNotFound { id: 6 }
    ));
}

#[test]
fn test_delete_cancelled_trip_removes_ledger() {
    let (_temp_file, mut db) = create_test_db();
    let (truck_id, trip_id) = trip_in_progress(&mut db);

    db.create_toll(&toll(trip_id, 500, None)).unwrap();
    db.create_fuel(&CreateFuel {
        trip_id,
        liters: Decimal::new(100, 0),
        amount: Decimal::new(600, 0),
        location: "Linhares".to_string(),
        fueled_at: None,
    })
    .unwrap();

    let cancelled = db.cancel_trip(trip_id).unwrap();
    assert_eq!(cancelled.status, TripStatus::Cancelled);

    db.delete_trip(trip_id).expect("Cancelled trips can be deleted");
    assert!(db.get_trip(trip_id).unwrap().is_none());
    assert!(db.list_tolls().unwrap().is_empty());
    assert!(db.list_fuel().unwrap().is_empty());

    // Cancelling released the truck and nothing references it any more
    let truck = db.delete_truck(truck_id).expect("Truck is no longer referenced");
    assert_eq!(truck.status, TruckStatus::Available);
}
