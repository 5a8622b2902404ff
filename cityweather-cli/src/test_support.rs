//! In-process lookups for driving a `Session` without a network.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use cityweather_core::{
    City, Coordinates, Geocoder, Kelvin, LookupError, Session, TemperatureReading,
    WeatherProvider,
};

#[derive(Debug, Clone)]
pub struct StubLookups {
    pub temperature: Result<Kelvin, LookupError>,
}

impl StubLookups {
    pub fn session(self) -> Session {
        let stub = Arc::new(self);
        Session::new(stub.clone(), stub)
    }
}

#[async_trait]
impl WeatherProvider for StubLookups {
    async fn current_temperature(&self, city: &City) -> Result<TemperatureReading, LookupError> {
        self.temperature.clone().map(|temperature| TemperatureReading {
            city: city.clone(),
            temperature,
            observation_time: Utc::now(),
        })
    }
}

#[async_trait]
impl Geocoder for StubLookups {
    async fn locate(&self, _query: &str) -> Result<Coordinates, LookupError> {
        Ok(Coordinates::new(51.5, -0.12))
    }
}
