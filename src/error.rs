use thiserror::Error;

use crate::model::QuoteId;

// Failures reported by the booking operations. Each variant tells the caller
// something different to do next, so none of them are folded together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RentalError {
    #[error("Unknown car type: {0}")]
    TypeNotFound(String),

    #[error("No {car_type} available in region {region}")]
    NoAvailability { car_type: String, region: String },

    #[error("Reservation failed for quote {quote_id}: no free {car_type} left in {region}")]
    ReservationFailed {
        quote_id: QuoteId,
        car_type: String,
        region: String,
    },

    #[error("Invalid quote {quote_id}: {reason}")]
    InvalidQuote { quote_id: QuoteId, reason: String },

    #[error("Invalid period: start {start} is not before end {end}")]
    InvalidPeriod { start: String, end: String },
}

impl RentalError {
    // Only a lost confirmation race is worth retrying with a fresh quote
    pub fn is_retryable(&self) -> bool {
        matches!(self, RentalError::ReservationFailed { .. })
    }
}

// Errors raised while provisioning a company from its catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Duplicate car type: {0}")]
    DuplicateCarType(String),

    #[error("Invalid car type {name}: {reason}")]
    InvalidCarType { name: String, reason: String },
}

pub type RentalResult<T> = Result<T, RentalError>;
