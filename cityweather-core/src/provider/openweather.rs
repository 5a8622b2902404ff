use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    LookupError,
    model::{City, Kelvin, TemperatureReading},
    provider::truncate_body,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const SERVICE: &str = "OpenWeather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, http: Client) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    async fn fetch_current(&self, city: &City) -> Result<TemperatureReading, LookupError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!(%city, "requesting current weather");

        // No `units` parameter: the API answers in Kelvin.
        let res = self
            .http
            .get(&url)
            .query(&[("q", city.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| LookupError::network(SERVICE, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| LookupError::network(SERVICE, e))?;

        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::not_found(SERVICE, city.as_str()));
        }

        if !status.is_success() {
            return Err(LookupError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::parse(SERVICE, e))?;

        if !parsed.main.temp.is_finite() {
            return Err(LookupError::parse(SERVICE, "temperature is not a finite number"));
        }

        let observation_time = parsed.dt.and_then(unix_to_utc).unwrap_or_else(Utc::now);

        Ok(TemperatureReading {
            city: city.clone(),
            temperature: Kelvin(parsed.main.temp),
            observation_time,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: Option<i64>,
    main: OwMain,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_temperature(&self, city: &City) -> Result<TemperatureReading, LookupError> {
        self.fetch_current(city).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}
