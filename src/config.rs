// Company configuration and the inventory catalog it is provisioned from

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::CarType;

// Whether createQuote checks inventory before handing out a quote.
// Confirmation re-validates under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuotePolicy {
    #[default]
    CheckAvailability,
    Optimistic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    #[serde(default)]
    pub quote_policy: QuotePolicy,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "Hertz".to_string(),
            quote_policy: QuotePolicy::CheckAvailability,
        }
    }
}

// A number of identical cars stationed in one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarGroup {
    pub region: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarTypeEntry {
    pub name: String,
    pub seats: u32,
    pub trunk_space: f32,
    pub price_per_day: f64,
    #[serde(default)]
    pub smoking_allowed: bool,
    #[serde(default)]
    pub cars: Vec<CarGroup>,
}

impl CarTypeEntry {
    pub fn car_type(&self) -> CarType {
        CarType {
            name: self.name.clone(),
            seats: self.seats,
            trunk_space: self.trunk_space,
            price_per_day: self.price_per_day,
            smoking_allowed: self.smoking_allowed,
        }
    }
}

/// Everything a company owns at provisioning time. Cars are numbered from 1
/// in the order their groups appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub car_types: Vec<CarTypeEntry>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for entry in &self.car_types {
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicateCarType(entry.name.clone()));
            }
            if entry.name.trim().is_empty() {
                return Err(CatalogError::InvalidCarType {
                    name: entry.name.clone(),
                    reason: "name must not be empty".to_string(),
                });
            }
            if !(entry.price_per_day > 0.0) {
                return Err(CatalogError::InvalidCarType {
                    name: entry.name.clone(),
                    reason: format!("price per day must be positive, got {}", entry.price_per_day),
                });
            }
        }
        Ok(())
    }

    pub fn total_cars(&self) -> usize {
        self.car_types
            .iter()
            .flat_map(|entry| entry.cars.iter())
            .map(|group| group.count as usize)
            .sum()
    }
}
