// Inventory and booking entities shared by every other module

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{RentalError, RentalResult};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Half-open rental interval `[start, end)`. Deserializing goes through
/// `Period::new`, so an inverted interval never reaches the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawPeriod> for Period {
    type Error = RentalError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Period::new(raw.start, raw.end)
    }
}

impl Period {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> RentalResult<Self> {
        if start >= end {
            return Err(RentalError::InvalidPeriod {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    // Touching endpoints do not overlap
    pub fn overlaps(&self, other: &Period) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Number of started days in the period; a rental of one hour is billed as a day.
    pub fn rental_days(&self) -> u64 {
        debug_assert!(self.start < self.end);
        let millis = (self.end - self.start).num_milliseconds().max(0);
        ((millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY) as u64
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarType {
    pub name: String,
    pub seats: u32,
    pub trunk_space: f32,
    pub price_per_day: f64,
    pub smoking_allowed: bool,
}

impl CarType {
    pub fn price_for(&self, period: &Period) -> f64 {
        self.price_per_day * period.rental_days() as f64
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Car type: {} \t[seats: {}, price per day: {}, trunk space: {}, smoking allowed: {}]",
            self.name, self.seats, self.price_per_day, self.trunk_space, self.smoking_allowed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CarId(pub u32);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuoteId(pub u64);

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

// What a renter asks for: a car type in a region over a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationConstraints {
    period: Period,
    car_type: String,
    region: String,
}

impl ReservationConstraints {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        car_type: impl Into<String>,
        region: impl Into<String>,
    ) -> RentalResult<Self> {
        Ok(Self {
            period: Period::new(start, end)?,
            car_type: car_type.into(),
            region: region.into(),
        })
    }

    pub fn period(&self) -> &Period {
        &self.period
    }

    pub fn car_type(&self) -> &str {
        &self.car_type
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

/// A priced, non-binding offer. Holding a quote reserves nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub renter: String,
    pub company: String,
    pub constraints: ReservationConstraints,
    pub price: f64,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote {} for {} from {}: {} in {} during {}, price {}",
            self.id,
            self.renter,
            self.company,
            self.constraints.car_type(),
            self.constraints.region(),
            self.constraints.period(),
            self.price
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub quote_id: QuoteId,
    pub car_id: CarId,
    pub renter: String,
    pub company: String,
    pub car_type: String,
    pub region: String,
    pub period: Period,
    pub price: f64,
}

impl Reservation {
    fn from_quote(quote: &Quote, car_id: CarId) -> Self {
        Self {
            quote_id: quote.id,
            car_id,
            renter: quote.renter.clone(),
            company: quote.company.clone(),
            car_type: quote.constraints.car_type().to_string(),
            region: quote.constraints.region().to_string(),
            period: *quote.constraints.period(),
            price: quote.price,
        }
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation for {} on car {} ({} in {}) during {}, price {}",
            self.renter, self.car_id, self.car_type, self.region, self.period, self.price
        )
    }
}

// A physical car. The reservation list is the only mutable part and sits
// behind the car's own lock, so claims on different cars never contend.
#[derive(Debug)]
pub struct Car {
    id: CarId,
    car_type: Arc<CarType>,
    region: String,
    reservations: RwLock<Vec<Reservation>>,
}

impl Car {
    pub fn new(id: CarId, car_type: Arc<CarType>, region: impl Into<String>) -> Self {
        Self {
            id,
            car_type,
            region: region.into(),
            reservations: RwLock::new(Vec::new()),
        }
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn car_type(&self) -> &CarType {
        &self.car_type
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn is_available(&self, period: &Period) -> bool {
        !self
            .reservations
            .read()
            .iter()
            .any(|reservation| reservation.period.overlaps(period))
    }

    // The free check and the append happen under one write guard. Returns None
    // and leaves the list untouched when the car is taken for the period.
    pub(crate) fn try_claim(&self, quote: &Quote) -> Option<Reservation> {
        let period = quote.constraints.period();
        let mut reservations = self.reservations.write();
        if reservations
            .iter()
            .any(|reservation| reservation.period.overlaps(period))
        {
            return None;
        }

        let reservation = Reservation::from_quote(quote, self.id);
        reservations.push(reservation.clone());
        Some(reservation)
    }

    pub fn snapshot(&self) -> CarSnapshot {
        CarSnapshot {
            id: self.id,
            car_type: CarType::clone(&self.car_type),
            region: self.region.clone(),
            reservations: self.reservations.read().clone(),
        }
    }
}

/// Point-in-time copy of a car, taken under the car's read lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarSnapshot {
    pub id: CarId,
    pub car_type: CarType,
    pub region: String,
    pub reservations: Vec<Reservation>,
}
