// Availability lookups over a company's cars.
//
// Free/occupied answers are computed on demand from each car's reservation
// list, so they can never disagree with the list itself. The only derived
// state kept here is the immutable grouping of cars by type.

use std::collections::{BTreeSet, HashMap};

use crate::model::{Car, Period};

#[derive(Debug, Default)]
pub struct AvailabilityIndex {
    // Ordered by ascending car id
    cars: Vec<Car>,
    // Car type name -> positions in `cars`, ascending
    by_type: HashMap<String, Vec<usize>>,
}

impl AvailabilityIndex {
    pub fn new(mut cars: Vec<Car>) -> Self {
        cars.sort_by_key(|car| car.id());

        let mut by_type: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, car) in cars.iter().enumerate() {
            by_type
                .entry(car.car_type().name.clone())
                .or_default()
                .push(position);
        }

        Self { cars, by_type }
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn regions(&self) -> BTreeSet<String> {
        self.cars.iter().map(|car| car.region().to_string()).collect()
    }

    /// Cars of the given type, optionally restricted to a region, lowest id first.
    pub fn candidates<'a>(
        &'a self,
        car_type: &str,
        region: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Car> + 'a {
        self.by_type
            .get(car_type)
            .map(|positions| positions.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&position| &self.cars[position])
            .filter(move |car| region.map_or(true, |r| car.region() == r))
    }

    pub fn has_free_car(&self, car_type: &str, region: Option<&str>, period: &Period) -> bool {
        self.candidates(car_type, region)
            .any(|car| car.is_available(period))
    }

    // Type names with at least one free car in any region, sorted
    pub fn available_type_names(&self, period: &Period) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .by_type
            .keys()
            .map(String::as_str)
            .filter(|name| self.has_free_car(name, None, period))
            .collect();
        names.sort_unstable();
        names
    }
}
