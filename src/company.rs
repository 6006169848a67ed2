// The booking authority for one rental company.
//
// Catalog data (car types, car identities, regions) is fixed at provisioning
// and read without locks. The only mutable state is each car's reservation
// list, guarded per car, and the ledger of issued quotes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::availability::AvailabilityIndex;
use crate::config::{Catalog, CompanyConfig, QuotePolicy};
use crate::error::{CatalogError, RentalError, RentalResult};
use crate::model::{
    Car, CarId, CarSnapshot, CarType, Period, Quote, QuoteId, Reservation, ReservationConstraints,
};
use crate::statistics;
use crate::stats::{ServiceStats, ServiceStatsReport};

/// Lifecycle of an issued quote. `Reserved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteState {
    Quoted,
    Confirming,
    Reserved,
    Rejected,
}

impl fmt::Display for QuoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuoteState::Quoted => "quoted",
            QuoteState::Confirming => "being confirmed",
            QuoteState::Reserved => "already reserved",
            QuoteState::Rejected => "already rejected",
        };
        f.write_str(name)
    }
}

// Terminal records keep only their state. The issued copy is needed solely
// to match a quote being confirmed; quotes never confirmed keep it.
struct QuoteRecord {
    quote: Option<Quote>,
    state: QuoteState,
}

pub struct CarRentalCompany {
    config: CompanyConfig,
    car_types: BTreeMap<String, Arc<CarType>>,
    index: AvailabilityIndex,
    quotes: DashMap<QuoteId, QuoteRecord>,
    next_quote_id: AtomicU64,
    stats: ServiceStats,
}

impl CarRentalCompany {
    pub fn new(config: CompanyConfig, catalog: &Catalog) -> Result<Self, CatalogError> {
        catalog.validate()?;

        let mut car_types = BTreeMap::new();
        let mut cars = Vec::with_capacity(catalog.total_cars());
        let mut next_car_id = 1;

        for entry in &catalog.car_types {
            let car_type = Arc::new(entry.car_type());
            for group in &entry.cars {
                for _ in 0..group.count {
                    cars.push(Car::new(CarId(next_car_id), car_type.clone(), &group.region));
                    next_car_id += 1;
                }
            }
            car_types.insert(entry.name.clone(), car_type);
        }

        info!(
            company = %config.name,
            car_types = car_types.len(),
            cars = cars.len(),
            "Provisioned rental company"
        );

        Ok(Self {
            config,
            car_types,
            index: AvailabilityIndex::new(cars),
            quotes: DashMap::new(),
            next_quote_id: AtomicU64::new(1),
            stats: ServiceStats::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn quote_policy(&self) -> QuotePolicy {
        self.config.quote_policy
    }

    pub fn regions(&self) -> BTreeSet<String> {
        self.index.regions()
    }

    pub fn get_car_types(&self) -> Vec<CarType> {
        self.car_types.values().map(|t| CarType::clone(t)).collect()
    }

    pub fn get_car_type(&self, name: &str) -> RentalResult<CarType> {
        self.car_types
            .get(name)
            .map(|t| CarType::clone(t))
            .ok_or_else(|| RentalError::TypeNotFound(name.to_string()))
    }

    /// Car types with at least one car free over `[start, end)`, ordered by name.
    pub fn get_available_car_types(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RentalResult<Vec<CarType>> {
        let period = Period::new(start, end)?;
        let available: Vec<CarType> = self
            .index
            .available_type_names(&period)
            .into_iter()
            .filter_map(|name| self.car_types.get(name))
            .map(|t| CarType::clone(t))
            .collect();

        debug!(
            company = %self.name(),
            %period,
            available = available.len(),
            "Checked available car types"
        );
        Ok(available)
    }

    pub fn is_available(&self, constraints: &ReservationConstraints) -> bool {
        self.index.has_free_car(
            constraints.car_type(),
            Some(constraints.region()),
            constraints.period(),
        )
    }

    // Prices a quote. Nothing is held; a racing confirmation may still take
    // the last car before this quote is confirmed.
    pub fn create_quote(
        &self,
        constraints: ReservationConstraints,
        renter: &str,
    ) -> RentalResult<Quote> {
        let car_type = match self.car_types.get(constraints.car_type()) {
            Some(car_type) => car_type.clone(),
            None => {
                ServiceStats::record(&self.stats.quotes_refused);
                return Err(RentalError::TypeNotFound(constraints.car_type().to_string()));
            }
        };

        let in_stock = match self.config.quote_policy {
            QuotePolicy::CheckAvailability => self.is_available(&constraints),
            QuotePolicy::Optimistic => self
                .index
                .candidates(constraints.car_type(), Some(constraints.region()))
                .next()
                .is_some(),
        };
        if !in_stock {
            ServiceStats::record(&self.stats.quotes_refused);
            debug!(
                company = %self.name(),
                renter,
                car_type = constraints.car_type(),
                region = constraints.region(),
                "Refused quote, nothing available"
            );
            return Err(RentalError::NoAvailability {
                car_type: constraints.car_type().to_string(),
                region: constraints.region().to_string(),
            });
        }

        let quote = Quote {
            id: QuoteId(self.next_quote_id.fetch_add(1, Ordering::SeqCst)),
            renter: renter.to_string(),
            company: self.config.name.clone(),
            price: car_type.price_for(constraints.period()),
            constraints,
        };
        self.quotes.insert(
            quote.id,
            QuoteRecord {
                quote: Some(quote.clone()),
                state: QuoteState::Quoted,
            },
        );
        ServiceStats::record(&self.stats.quotes_issued);

        debug!(company = %self.name(), quote = %quote, "Issued quote");
        Ok(quote)
    }

    /// Turns a quote into a reservation on the lowest-id free car of its type
    /// in its region. Fails fast when no such car is left.
    pub fn confirm_quote(&self, quote: &Quote) -> RentalResult<Reservation> {
        self.begin_confirmation(quote)?;

        let constraints = &quote.constraints;
        for car in self
            .index
            .candidates(constraints.car_type(), Some(constraints.region()))
        {
            if let Some(reservation) = car.try_claim(quote) {
                self.finish_confirmation(quote.id, QuoteState::Reserved);
                ServiceStats::record(&self.stats.confirmations_succeeded);
                info!(
                    company = %self.name(),
                    quote_id = %quote.id,
                    car_id = %reservation.car_id,
                    renter = %reservation.renter,
                    period = %reservation.period,
                    "Reservation confirmed"
                );
                return Ok(reservation);
            }
        }

        self.finish_confirmation(quote.id, QuoteState::Rejected);
        ServiceStats::record(&self.stats.confirmations_rejected);
        warn!(
            company = %self.name(),
            quote_id = %quote.id,
            car_type = constraints.car_type(),
            region = constraints.region(),
            "Reservation failed, no free car left"
        );
        Err(RentalError::ReservationFailed {
            quote_id: quote.id,
            car_type: constraints.car_type().to_string(),
            region: constraints.region().to_string(),
        })
    }

    // Moves the quote from Quoted to Confirming. The shard guard makes this a
    // single step, so at most one caller ever confirms a given quote.
    fn begin_confirmation(&self, quote: &Quote) -> RentalResult<()> {
        let invalid = |reason: String| {
            ServiceStats::record(&self.stats.invalid_quote_attempts);
            warn!(company = %self.name(), quote_id = %quote.id, %reason, "Invalid quote");
            Err(RentalError::InvalidQuote {
                quote_id: quote.id,
                reason,
            })
        };

        if quote.company != self.config.name {
            return invalid(format!("issued by {}, not {}", quote.company, self.name()));
        }

        let Some(mut record) = self.quotes.get_mut(&quote.id) else {
            return invalid("not issued by this company".to_string());
        };
        if record.state != QuoteState::Quoted {
            let state = record.state;
            drop(record);
            return invalid(state.to_string());
        }
        if record.quote.as_ref() != Some(quote) {
            drop(record);
            return invalid("does not match the issued quote".to_string());
        }

        record.state = QuoteState::Confirming;
        Ok(())
    }

    fn finish_confirmation(&self, quote_id: QuoteId, state: QuoteState) {
        if let Some(mut record) = self.quotes.get_mut(&quote_id) {
            record.state = state;
            record.quote = None;
        }
    }

    #[cfg(test)]
    fn retained_quote_copies(&self) -> usize {
        self.quotes
            .iter()
            .filter(|record| record.quote.is_some())
            .count()
    }

    pub fn quote_state(&self, quote_id: QuoteId) -> Option<QuoteState> {
        self.quotes.get(&quote_id).map(|record| record.state)
    }

    /// Snapshot of every car, in id order. Each car is copied under its own
    /// read lock, so no car is ever seen half-updated.
    pub fn get_all_cars(&self) -> Vec<CarSnapshot> {
        self.index.cars().iter().map(Car::snapshot).collect()
    }

    pub fn get_reservations_by_renter(&self, renter: &str) -> Vec<Reservation> {
        statistics::reservations_by_renter(&self.get_all_cars(), renter)
    }

    pub fn get_number_of_reservations_for_car_type(&self, car_type: &str) -> usize {
        statistics::number_of_reservations_for_car_type(&self.get_all_cars(), car_type)
    }

    pub fn stats(&self) -> ServiceStatsReport {
        self.stats.report()
    }
}
