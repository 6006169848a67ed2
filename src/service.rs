// Remote-facing booking contract.
//
// Callers (an RPC or HTTP binding, or a test harness) talk to a company only
// through this trait. The in-process company implements it directly; every
// method completes without waiting on other callers.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::company::CarRentalCompany;
use crate::error::RentalResult;
use crate::model::{CarSnapshot, CarType, Quote, Reservation, ReservationConstraints};

#[async_trait]
pub trait RentalCompanyService: Send + Sync + 'static {
    // Name the company is registered under
    fn name(&self) -> &str;

    async fn get_regions(&self) -> BTreeSet<String>;

    async fn get_available_car_types(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RentalResult<Vec<CarType>>;

    async fn create_quote(
        &self,
        constraints: ReservationConstraints,
        renter: &str,
    ) -> RentalResult<Quote>;

    // The only operation that changes inventory
    async fn confirm_quote(&self, quote: &Quote) -> RentalResult<Reservation>;

    async fn get_all_cars(&self) -> Vec<CarSnapshot>;

    async fn get_reservations_by_renter(&self, renter: &str) -> Vec<Reservation> {
        crate::statistics::reservations_by_renter(&self.get_all_cars().await, renter)
    }

    async fn get_number_of_reservations_for_car_type(&self, car_type: &str) -> usize {
        let cars = self.get_all_cars().await;
        crate::statistics::number_of_reservations_for_car_type(&cars, car_type)
    }
}

#[async_trait]
impl RentalCompanyService for CarRentalCompany {
    fn name(&self) -> &str {
        CarRentalCompany::name(self)
    }

    async fn get_regions(&self) -> BTreeSet<String> {
        self.regions()
    }

    async fn get_available_car_types(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RentalResult<Vec<CarType>> {
        CarRentalCompany::get_available_car_types(self, start, end)
    }

    async fn create_quote(
        &self,
        constraints: ReservationConstraints,
        renter: &str,
    ) -> RentalResult<Quote> {
        CarRentalCompany::create_quote(self, constraints, renter)
    }

    async fn confirm_quote(&self, quote: &Quote) -> RentalResult<Reservation> {
        CarRentalCompany::confirm_quote(self, quote)
    }

    async fn get_all_cars(&self) -> Vec<CarSnapshot> {
        CarRentalCompany::get_all_cars(self)
    }
}
