//! Result wrapper types for displaying operation outcomes.
//!
//! Create, update and delete operations print a one-line confirmation naming
//! the record, followed by the record itself for creates and updates.

use std::fmt;

use crate::models::{Driver, FuelRecord, TollRecord, Trip, Truck};

/// A record that can be named in a confirmation line.
pub trait Resource: fmt::Display {
    /// Lowercase noun used in messages, e.g. `truck`.
    const NOUN: &'static str;

    fn id(&self) -> u64;

    /// Short human label used when the record itself is no longer shown.
    fn label(&self) -> String;
}

impl Resource for Truck {
    const NOUN: &'static str = "truck";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} {}", self.plate, self.model)
    }
}

impl Resource for Driver {
    const NOUN: &'static str = "driver";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Resource for Trip {
    const NOUN: &'static str = "trip";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}

impl Resource for TollRecord {
    const NOUN: &'static str = "toll";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} at {}", self.amount, self.location)
    }
}

impl Resource for FuelRecord {
    const NOUN: &'static str = "fuel record";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} L at {}", self.liters, self.location)
    }
}

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use waybill_core::{display::CreateResult, models::Driver};
///
/// let driver = Driver {
///     id: 3,
///     name: "Ana Souza".to_string(),
///     license_number: "SP-000111".to_string(),
///     license_expires_on: date(2030, 1, 31),
/// };
/// let output = CreateResult::new(driver).to_string();
/// assert!(output.starts_with("Created driver with ID: 3"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", T::NOUN, self.resource.id())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, including
/// lifecycle transitions.
///
/// The wrapper can list the changes made so the user sees what moved, e.g.
/// the trip and truck status changes of a start.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Resource> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::NOUN, self.resource.id())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for DeleteResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted {} '{}' (ID: {})",
            T::NOUN,
            self.resource.label(),
            self.resource.id()
        )
    }
}
