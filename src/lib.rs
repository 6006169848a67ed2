// Booking service for a car rental company: availability queries, quotes,
// and race-free confirmation of quotes into reservations

pub mod availability;
pub mod company;
pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod statistics;
pub mod stats;

// Re-export key types for convenience
pub use availability::AvailabilityIndex;
pub use company::{CarRentalCompany, QuoteState};
pub use config::{CarGroup, CarTypeEntry, Catalog, CompanyConfig, QuotePolicy};
pub use error::{CatalogError, RentalError, RentalResult};
pub use model::{
    Car, CarId, CarSnapshot, CarType, Period, Quote, QuoteId, Reservation, ReservationConstraints,
};
pub use service::RentalCompanyService;
pub use stats::{ServiceStats, ServiceStatsReport};
