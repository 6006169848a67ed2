// Reservation statistics derived from a snapshot of all cars

use std::collections::BTreeMap;

use crate::model::{CarSnapshot, Reservation};

pub fn reservations_by_renter(cars: &[CarSnapshot], renter: &str) -> Vec<Reservation> {
    cars.iter()
        .flat_map(|car| car.reservations.iter())
        .filter(|reservation| reservation.renter == renter)
        .cloned()
        .collect()
}

pub fn number_of_reservations_for_car_type(cars: &[CarSnapshot], car_type: &str) -> usize {
    cars.iter()
        .filter(|car| car.car_type.name == car_type)
        .map(|car| car.reservations.len())
        .sum()
}

/// Reservation count per car type; types without reservations report zero.
pub fn reservations_per_car_type(cars: &[CarSnapshot]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for car in cars {
        *counts.entry(car.car_type.name.clone()).or_insert(0) += car.reservations.len();
    }
    counts
}
