//! Forward geocoding through Nominatim (OpenStreetMap). No API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{LookupError, model::Coordinates, provider::truncate_body};

use super::Geocoder;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

const SERVICE: &str = "Nominatim";

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(base_url: String, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }
}

/// Nominatim serialises coordinates as strings; other servers use numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self, field: &str) -> Result<f64, LookupError> {
        let value = match self {
            Degrees::Number(n) => *n,
            Degrees::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                LookupError::parse(SERVICE, format!("{field} '{s}' is not a number"))
            })?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(LookupError::parse(SERVICE, format!("{field} is not finite")))
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Degrees,
    lon: Degrees,
}

impl NominatimPlace {
    fn coordinates(&self) -> Result<Coordinates, LookupError> {
        Ok(Coordinates::new(self.lat.value("lat")?, self.lon.value("lon")?))
    }
}

fn first_place(places: &[NominatimPlace], query: &str) -> Result<Coordinates, LookupError> {
    places
        .first()
        .ok_or_else(|| LookupError::not_found(SERVICE, query))?
        .coordinates()
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn locate(&self, query: &str) -> Result<Coordinates, LookupError> {
        let url = format!("{}/search", self.base_url);
        debug!(query, "geocoding");

        let res = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(|e| LookupError::network(SERVICE, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| LookupError::network(SERVICE, e))?;

        if !status.is_success() {
            return Err(LookupError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| LookupError::parse(SERVICE, e))?;

        first_place(&places, query)
    }
}
