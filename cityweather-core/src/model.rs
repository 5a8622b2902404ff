use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Cities offered by the selector.
pub const CITY_CATALOG: &[&str] = &[
    "London",
    "Paris",
    "Berlin",
    "Madrid",
    "Rome",
    "Tokyo",
    "Tel Aviv",
    "Dallol",
    "Cape Town",
    "Mumbai",
    "Moskva",
];

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// A place name used as the lookup key for both the weather and geocoding APIs.
///
/// The selector only offers [`CITY_CATALOG`], but any non-empty name is a valid
/// key so that lookups of unknown places end in a `NotFound` instead of being
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct City(String);

impl City {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn catalog() -> Vec<City> {
        CITY_CATALOG.iter().map(|name| City((*name).to_string())).collect()
    }

    pub fn is_catalogued(&self) -> bool {
        CITY_CATALOG.iter().any(|name| name.eq_ignore_ascii_case(&self.0))
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for City {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("City name must not be empty."));
        }

        // Prefer the catalog spelling so "london" and "London" are the same favorite.
        let name = CITY_CATALOG
            .iter()
            .find(|name| name.eq_ignore_ascii_case(trimmed))
            .map(|name| (*name).to_string())
            .unwrap_or_else(|| trimmed.to_string());

        Ok(City(name))
    }
}

/// Absolute temperature as returned by the weather API.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl Kelvin {
    pub fn value(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Live temperature for the selected city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub city: City,
    pub temperature: Kelvin,
    pub observation_time: DateTime<Utc>,
}

/// A pinned city. The temperature is the reading displayed when it was pinned
/// and is never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub city: City,
    pub temperature: Kelvin,
    pub coordinates: Coordinates,
}
