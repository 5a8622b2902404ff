use crate::{
    Config, LookupError,
    model::{City, Coordinates, TemperatureReading},
    provider::{nominatim::NominatimGeocoder, openweather::OpenWeatherProvider},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

pub mod nominatim;
pub mod openweather;

const USER_AGENT: &str = concat!("cityweather/", env!("CARGO_PKG_VERSION"));

/// Source of the live temperature for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_temperature(&self, city: &City) -> Result<TemperatureReading, LookupError>;
}

/// Resolves a free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn locate(&self, query: &str) -> Result<Coordinates, LookupError>;
}

/// Shared HTTP client honouring the configured timeout.
pub fn http_client(config: &Config) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Construct the weather provider from config, resolving the API key.
pub fn weather_provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key()?;
    Ok(OpenWeatherProvider::new(
        api_key,
        config.weather_base_url.clone(),
        http_client(config)?,
    ))
}

pub fn geocoder_from_config(config: &Config) -> anyhow::Result<NominatimGeocoder> {
    Ok(NominatimGeocoder::new(
        config.geocode_base_url.clone(),
        http_client(config)?,
    ))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
