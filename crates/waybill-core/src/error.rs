//! Error types for the fleet library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all fleet operations.
#[derive(Error, Debug)]
pub enum FleetError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Truck not found for the given ID
    #[error("Truck with ID {id} not found")]
    TruckNotFound { id: u64 },
    /// Driver not found for the given ID
    #[error("Driver with ID {id} not found")]
    DriverNotFound { id: u64 },
    /// Trip not found for the given ID
    #[error("Trip with ID {id} not found")]
    TripNotFound { id: u64 },
    /// Toll record not found for the given ID
    #[error("Toll record with ID {id} not found")]
    TollNotFound { id: u64 },
    /// Fuel record not found for the given ID
    #[error("Fuel record with ID {id} not found")]
    FuelNotFound { id: u64 },
    /// A state-machine guard rejected the requested transition or mutation
    #[error("Invalid operation: {reason}")]
    InvalidOperation { reason: String },
    /// A unique key is already held by another record
    #[error("A record with {field} '{value}' already exists")]
    DuplicateKey { field: &'static str, value: String },
    /// A ledger total left the range of `Decimal`
    #[error("Total of {what} is out of range")]
    AmountOverflow { what: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification of a [`FleetError`] for transport layers.
///
/// Interfaces map these onto their own status codes; the CLI maps them onto
/// process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced identity does not resolve
    NotFound,
    /// A lifecycle guard, uniqueness rule or input rule was violated
    InvalidOperation,
    /// Anything unanticipated (storage, filesystem, runtime)
    Failure,
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> FleetError {
        FleetError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl FleetError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a guard rejection with the given reason.
    pub fn invalid_operation(reason: impl Into<String>) -> Self {
        FleetError::InvalidOperation {
            reason: reason.into(),
        }
    }

    /// Creates a database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        FleetError::Database {
            message: message.to_string(),
            source,
        }
    }

    /// Classifies this error for transport-level mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FleetError::TruckNotFound { .. }
            | FleetError::DriverNotFound { .. }
            | FleetError::TripNotFound { .. }
            | FleetError::TollNotFound { .. }
            | FleetError::FuelNotFound { .. } => ErrorKind::NotFound,
            FleetError::InvalidOperation { .. }
            | FleetError::DuplicateKey { .. }
            | FleetError::InvalidInput { .. } => ErrorKind::InvalidOperation,
            FleetError::Database { .. }
            | FleetError::AmountOverflow { .. }
            | FleetError::FileSystem { .. }
            | FleetError::XdgDirectory(_)
            | FleetError::Serialization { .. }
            | FleetError::Configuration { .. } => ErrorKind::Failure,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| FleetError::database_error(message, e))
    }
}

/// Result type alias for fleet operations
pub type Result<T> = std::result::Result<T, FleetError>;
