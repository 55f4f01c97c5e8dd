//! Ledger records attached to a trip.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A toll paid during a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TollRecord {
    pub id: u64,

    /// Owning trip; fixed at creation
    pub trip_id: u64,

    /// Amount paid
    pub amount: Decimal,

    /// Toll plaza or road
    pub location: String,

    /// When the toll was paid (UTC)
    pub paid_at: Timestamp,
}

/// A refuelling stop during a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuelRecord {
    pub id: u64,

    /// Owning trip; fixed at creation
    pub trip_id: u64,

    /// Volume pumped
    pub liters: Decimal,

    /// Amount paid
    pub amount: Decimal,

    /// Station or town
    pub location: String,

    /// When the truck was refuelled (UTC)
    pub fueled_at: Timestamp,
}
