//! Collection wrapper types for displaying groups of domain objects.
//!
//! Lists render as markdown tables, one row per record, with a plain
//! sentence in place of an empty table.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::models::{Driver, FuelRecord, TollRecord, Trip, Truck};

/// Implements the slice-like accessors shared by every collection wrapper.
macro_rules! collection_accessors {
    ($wrapper:ident, $item:ty) => {
        impl $wrapper {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Get the number of records in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Get a reference to the record at the given index.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            /// Get an iterator over the records.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $wrapper {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $wrapper {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $wrapper {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl From<Vec<$item>> for $wrapper {
            fn from(items: Vec<$item>) -> Self {
                Self(items)
            }
        }
    };
}

/// Newtype wrapper for displaying a list of trucks.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use waybill_core::{
///     display::Trucks,
///     models::{Truck, TruckStatus},
/// };
///
/// let trucks = Trucks(vec![Truck {
///     id: 1,
///     model: "Scania R450".to_string(),
///     plate: "BRA2E19".to_string(),
///     manufactured_on: date(2020, 5, 4),
///     status: TruckStatus::Available,
/// }]);
/// assert!(trucks.to_string().contains("| 1 | BRA2E19 | Scania R450 |"));
/// assert_eq!(Trucks(vec![]).to_string(), "No trucks found.\n");
/// ```
pub struct Trucks(pub Vec<Truck>);

collection_accessors!(Trucks, Truck);

impl fmt::Display for Trucks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No trucks found.");
        }
        writeln!(f, "| ID | Plate | Model | Manufactured | Status |")?;
        writeln!(f, "|---:|---|---|---|---|")?;
        for truck in &self.0 {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} |",
                truck.id,
                truck.plate,
                truck.model,
                truck.manufactured_on,
                truck.status.with_icon()
            )?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a list of drivers.
pub struct Drivers(pub Vec<Driver>);

collection_accessors!(Drivers, Driver);

impl fmt::Display for Drivers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No drivers found.");
        }
        writeln!(f, "| ID | Name | License | Expires |")?;
        writeln!(f, "|---:|---|---|---|")?;
        for driver in &self.0 {
            writeln!(
                f,
                "| {} | {} | {} | {} |",
                driver.id, driver.name, driver.license_number, driver.license_expires_on
            )?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a list of trips, newest first as returned
/// by the fleet.
pub struct Trips(pub Vec<Trip>);

collection_accessors!(Trips, Trip);

impl fmt::Display for Trips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No trips found.");
        }
        writeln!(f, "| ID | Route | Truck | Driver | Distance | Start | Status |")?;
        writeln!(f, "|---:|---|---:|---:|---:|---|---|")?;
        for trip in &self.0 {
            let driver = trip
                .driver_id
                .map_or_else(|| "-".to_string(), |id| id.to_string());
            writeln!(
                f,
                "| {} | {} → {} | {} | {} | {} km | {} | {} |",
                trip.id,
                trip.origin,
                trip.destination,
                trip.truck_id,
                driver,
                trip.distance_km,
                LocalDateTime(&trip.start_time),
                trip.status.with_icon()
            )?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying toll records.
pub struct Tolls(pub Vec<TollRecord>);

collection_accessors!(Tolls, TollRecord);

pub(crate) fn write_toll_table(f: &mut fmt::Formatter<'_>, tolls: &[TollRecord]) -> fmt::Result {
    if tolls.is_empty() {
        return writeln!(f, "No tolls found.");
    }
    writeln!(f, "| ID | Trip | Paid | Location | Amount |")?;
    writeln!(f, "|---:|---:|---|---|---:|")?;
    for toll in tolls {
        writeln!(
            f,
            "| {} | {} | {} | {} | {} |",
            toll.id,
            toll.trip_id,
            LocalDateTime(&toll.paid_at),
            toll.location,
            toll.amount
        )?;
    }
    Ok(())
}

impl fmt::Display for Tolls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_toll_table(f, &self.0)
    }
}

/// Newtype wrapper for displaying fuel records.
pub struct FuelRecords(pub Vec<FuelRecord>);

collection_accessors!(FuelRecords, FuelRecord);

pub(crate) fn write_fuel_table(f: &mut fmt::Formatter<'_>, records: &[FuelRecord]) -> fmt::Result {
    if records.is_empty() {
        return writeln!(f, "No fuel records found.");
    }
    writeln!(f, "| ID | Trip | Fueled | Location | Liters | Amount |")?;
    writeln!(f, "|---:|---:|---|---|---:|---:|")?;
    for record in records {
        writeln!(
            f,
            "| {} | {} | {} | {} | {} | {} |",
            record.id,
            record.trip_id,
            LocalDateTime(&record.fueled_at),
            record.location,
            record.liters,
            record.amount
        )?;
    }
    Ok(())
}

impl fmt::Display for FuelRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fuel_table(f, &self.0)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::TripStatus;

    #[test]
    fn test_empty_collections() {
        assert_eq!(Drivers(vec![]).to_string(), "No drivers found.\n");
        assert_eq!(Trips(vec![]).to_string(), "No trips found.\n");
        assert_eq!(Tolls(vec![]).to_string(), "No tolls found.\n");
        assert_eq!(FuelRecords(vec![]).to_string(), "No fuel records found.\n");
    }

    #[test]
    fn test_drivers_table() {
        let drivers = Drivers::from(vec![Driver {
            id: 4,
            name: "João Lima".to_string(),
            license_number: "MG-445566".to_string(),
            license_expires_on: date(2027, 8, 31),
        }]);
        assert_eq!(drivers.len(), 1);
        assert_eq!(drivers[0].name, "João Lima");
        assert!(drivers
            .to_string()
            .contains("| 4 | João Lima | MG-445566 | 2027-08-31 |"));
    }

    #[test]
    fn test_trips_table_marks_missing_driver() {
        let trips = Trips(vec![Trip {
            id: 8,
            truck_id: 1,
            driver_id: None,
            origin: "Recife".to_string(),
            destination: "Natal".to_string(),
            distance_km: 286,
            start_time: Timestamp::from_second(1_700_000_000).unwrap(),
            end_time: None,
            status: TripStatus::Planned,
        }]);
        let output = trips.to_string();
        assert!(output.contains("| 8 | Recife → Natal | 1 | - | 286 km |"));
        assert!(output.contains("○ Planned"));
    }

    #[test]
    fn test_fuel_table_iterates_in_order() {
        let at = Timestamp::from_second(1_700_000_000).unwrap();
        let records = FuelRecords(vec![
            FuelRecord {
                id: 1,
                trip_id: 2,
                liters: Decimal::new(1500, 1),
                amount: Decimal::new(89990, 2),
                location: "Registro".to_string(),
                fueled_at: at,
            },
            FuelRecord {
                id: 2,
                trip_id: 2,
                liters: Decimal::new(800, 1),
                amount: Decimal::new(47920, 2),
                location: "Curitiba".to_string(),
                fueled_at: at,
            },
        ]);
        let locations: Vec<&str> = records.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(locations, ["Registro", "Curitiba"]);
        assert!(records.to_string().contains("| 150.0 | 899.90 |"));
    }
}
