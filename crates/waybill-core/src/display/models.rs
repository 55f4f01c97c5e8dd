//! Display implementations for domain models.
//!
//! Everything renders as markdown for the terminal renderer. Single records
//! use a heading plus a bullet list of fields; composite views add one
//! second-level section per part.

use std::fmt;

use super::{
    collections::{write_fuel_table, write_toll_table},
    datetime::{Elapsed, LocalDateTime},
};
use crate::models::{
    Driver, FuelRecord, TollRecord, Trip, TripDetails, TripExpenses, TripStatus, Truck,
    TruckStatus,
};

impl fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Truck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Truck {}: {}", self.id, self.plate)?;
        writeln!(f)?;
        writeln!(f, "- Model: {}", self.model)?;
        writeln!(f, "- Manufactured: {}", self.manufactured_on)?;
        writeln!(f, "- Status: {}", self.status.with_icon())
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Driver {}: {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- License: {}", self.license_number)?;
        writeln!(f, "- Expires: {}", self.license_expires_on)
    }
}

impl Trip {
    fn fmt_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# Trip {}: {} → {} ({})",
            self.id,
            self.origin,
            self.destination,
            self.status.with_icon()
        )
    }

    /// Bullet list of schedule fields. A planned trip's start time is only a
    /// schedule, so it is labelled as such.
    fn fmt_schedule(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Distance: {} km", self.distance_km)?;

        let start_label = if self.status == TripStatus::Planned {
            "Scheduled"
        } else {
            "Started"
        };
        writeln!(f, "- {start_label}: {}", LocalDateTime(&self.start_time))?;

        if let Some(end) = &self.end_time {
            writeln!(f, "- Ended: {}", LocalDateTime(end))?;
            if self.status == TripStatus::Completed {
                writeln!(
                    f,
                    "- Duration: {}",
                    Elapsed {
                        from: &self.start_time,
                        to: end
                    }
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_header(f)?;
        writeln!(f)?;
        writeln!(f, "- Truck: {}", self.truck_id)?;
        match self.driver_id {
            Some(driver_id) => writeln!(f, "- Driver: {driver_id}")?,
            None => writeln!(f, "- Driver: unassigned")?,
        }
        self.fmt_schedule(f)
    }
}

impl fmt::Display for TollRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Toll {} (trip {})", self.id, self.trip_id)?;
        writeln!(f)?;
        writeln!(f, "- Amount: {}", self.amount)?;
        writeln!(f, "- Location: {}", self.location)?;
        writeln!(f, "- Paid: {}", LocalDateTime(&self.paid_at))
    }
}

impl fmt::Display for FuelRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Fuel {} (trip {})", self.id, self.trip_id)?;
        writeln!(f)?;
        writeln!(f, "- Liters: {}", self.liters)?;
        writeln!(f, "- Amount: {}", self.amount)?;
        writeln!(f, "- Location: {}", self.location)?;
        writeln!(f, "- Fueled: {}", LocalDateTime(&self.fueled_at))
    }
}

impl fmt::Display for TripDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.trip.fmt_header(f)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Truck: {} {} ({})",
            self.truck.plate,
            self.truck.model,
            self.truck.status.with_icon()
        )?;
        match &self.driver {
            Some(driver) => writeln!(f, "- Driver: {} ({})", driver.name, driver.license_number)?,
            None => writeln!(f, "- Driver: unassigned")?,
        }
        self.trip.fmt_schedule(f)?;

        writeln!(f, "\n## Tolls")?;
        writeln!(f)?;
        write_toll_table(f, &self.tolls)?;

        writeln!(f, "\n## Fuel")?;
        writeln!(f)?;
        write_fuel_table(f, &self.fuel)
    }
}

impl fmt::Display for TripExpenses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Expenses for trip {}", self.trip_id)?;
        writeln!(f)?;
        writeln!(f, "- Tolls: {}", self.toll_total)?;
        writeln!(f, "- Fuel: {} ({} L)", self.fuel_total, self.fuel_liters)?;
        match self.grand_total() {
            Some(total) => writeln!(f, "- Total: {total}")?,
            None => writeln!(f, "- Total: out of range")?,
        }
        match self.cost_per_km() {
            Some(cost) => writeln!(f, "- Per km: {cost} over {} km", self.distance_km),
            None => writeln!(f, "- Per km: n/a"),
        }
    }
}
