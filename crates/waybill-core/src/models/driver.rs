//! Driver model definition.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A driver who may be assigned to trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    /// Unique identifier for the driver
    pub id: u64,

    /// Full name
    pub name: String,

    /// Driving license number, unique across drivers
    pub license_number: String,

    /// Last day on which the license is valid
    pub license_expires_on: Date,
}

impl Driver {
    /// A license is valid through its expiry date, inclusive.
    pub fn has_valid_license(&self, today: Date) -> bool {
        self.license_expires_on >= today
    }
}
