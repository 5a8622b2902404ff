//! Session state and its transitions.
//!
//! The store never touches the network. [`Store::dispatch`] applies an
//! [`Action`] and returns the [`Effect`] the caller has to perform, if any;
//! the result of that effect comes back as another action carrying the same
//! [`RequestId`]. Completions whose id is no longer the latest for their slot
//! are dropped, so a slow reply can never overwrite a newer one.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::{
    LookupError,
    favorites::Favorites,
    model::{City, Coordinates, Favorite, Kelvin, TemperatureReading},
};

/// Monotonic tag attached to every outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// State of the live temperature for the selected city.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LiveReading {
    #[default]
    Unselected,
    Loading {
        city: City,
        request: RequestId,
    },
    Displayed(TemperatureReading),
    Failed {
        city: City,
        error: LookupError,
    },
}

impl LiveReading {
    pub fn city(&self) -> Option<&City> {
        match self {
            LiveReading::Unselected => None,
            LiveReading::Loading { city, .. } | LiveReading::Failed { city, .. } => Some(city),
            LiveReading::Displayed(reading) => Some(&reading.city),
        }
    }

    pub fn temperature(&self) -> Option<Kelvin> {
        match self {
            LiveReading::Displayed(reading) => Some(reading.temperature),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LiveReading::Loading { .. })
    }
}

/// Outcome of the most recent add-to-favorites attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FavoriteStatus {
    #[default]
    Idle,
    Resolving(City),
    Added(City),
    AlreadyPinned(City),
    /// Add was requested before a temperature was on screen.
    NoTemperature,
    Failed {
        city: City,
        error: LookupError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectCity(City),
    TemperatureFetched {
        request: RequestId,
        result: Result<TemperatureReading, LookupError>,
    },
    /// Pin the selected city with its displayed temperature.
    AddFavorite,
    GeocodeResolved {
        city: City,
        request: RequestId,
        result: Result<Coordinates, LookupError>,
    },
    RemoveFavorite(City),
    ReorderFavorite {
        city: City,
        offset_px: f64,
    },
}

/// Network work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchTemperature { city: City, request: RequestId },
    Geocode { city: City, request: RequestId },
}

#[derive(Debug, Clone, PartialEq)]
struct PendingAdd {
    request: RequestId,
    temperature: Kelvin,
}

#[derive(Debug, Default)]
pub struct Store {
    live: LiveReading,
    favorites: Favorites,
    favorite_status: FavoriteStatus,
    pending_adds: HashMap<City, PendingAdd>,
    last_request: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> &LiveReading {
        &self.live
    }

    pub fn selected_city(&self) -> Option<&City> {
        self.live.city()
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn favorite_status(&self) -> &FavoriteStatus {
        &self.favorite_status
    }

    pub fn is_adding(&self, city: &City) -> bool {
        self.pending_adds.contains_key(city)
    }

    fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        RequestId(self.last_request)
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SelectCity(city) => Some(self.select_city(city)),
            Action::TemperatureFetched { request, result } => {
                self.temperature_fetched(request, result);
                None
            }
            Action::AddFavorite => self.add_favorite(),
            Action::GeocodeResolved {
                city,
                request,
                result,
            } => {
                self.geocode_resolved(city, request, result);
                None
            }
            Action::RemoveFavorite(city) => {
                self.remove_favorite(&city);
                None
            }
            Action::ReorderFavorite { city, offset_px } => {
                if let Some(to) = self.favorites.reorder(&city, offset_px) {
                    debug!(%city, to, "favorite moved");
                }
                None
            }
        }
    }

    fn select_city(&mut self, city: City) -> Effect {
        let request = self.next_request();
        debug!(%city, request = request.value(), "city selected");

        self.live = LiveReading::Loading {
            city: city.clone(),
            request,
        };
        Effect::FetchTemperature { city, request }
    }

    fn temperature_fetched(
        &mut self,
        request: RequestId,
        result: Result<TemperatureReading, LookupError>,
    ) {
        let city = match &self.live {
            LiveReading::Loading { city, request: latest } if *latest == request => city.clone(),
            _ => {
                debug!(request = request.value(), "dropping stale temperature response");
                return;
            }
        };

        self.live = match result {
            Ok(reading) => LiveReading::Displayed(TemperatureReading { city, ..reading }),
            Err(error) => {
                warn!(%city, %error, "temperature lookup failed");
                LiveReading::Failed { city, error }
            }
        };
    }

    fn add_favorite(&mut self) -> Option<Effect> {
        let LiveReading::Displayed(reading) = &self.live else {
            self.favorite_status = FavoriteStatus::NoTemperature;
            return None;
        };
        let city = reading.city.clone();
        let temperature = reading.temperature;

        if self.favorites.contains(&city) {
            self.favorite_status = FavoriteStatus::AlreadyPinned(city);
            return None;
        }
        if self.pending_adds.contains_key(&city) {
            self.favorite_status = FavoriteStatus::Resolving(city);
            return None;
        }

        let request = self.next_request();
        self.pending_adds
            .insert(city.clone(), PendingAdd { request, temperature });
        self.favorite_status = FavoriteStatus::Resolving(city.clone());

        Some(Effect::Geocode { city, request })
    }

    fn geocode_resolved(
        &mut self,
        city: City,
        request: RequestId,
        result: Result<Coordinates, LookupError>,
    ) {
        let Some(pending) = self.pending_adds.get(&city) else {
            debug!(%city, "dropping geocode response for abandoned add");
            return;
        };
        if pending.request != request {
            debug!(%city, request = request.value(), "dropping stale geocode response");
            return;
        }
        let temperature = pending.temperature;
        self.pending_adds.remove(&city);

        match result {
            Ok(coordinates) => {
                self.favorites.push(Favorite {
                    city: city.clone(),
                    temperature,
                    coordinates,
                });
                info!(%city, "favorite added");
                self.favorite_status = FavoriteStatus::Added(city);
            }
            Err(error) => {
                warn!(%city, %error, "geocoding failed");
                self.favorite_status = FavoriteStatus::Failed { city, error };
            }
        }
    }

    fn remove_favorite(&mut self, city: &City) {
        let abandoned = self.pending_adds.remove(city).is_some();
        if self.favorites.remove(city) || abandoned {
            info!(%city, "favorite removed");
        }

        let status_city = match &self.favorite_status {
            FavoriteStatus::Resolving(c)
            | FavoriteStatus::Added(c)
            | FavoriteStatus::AlreadyPinned(c)
            | FavoriteStatus::Failed { city: c, .. } => Some(c),
            FavoriteStatus::Idle | FavoriteStatus::NoTemperature => None,
        };
        if status_city == Some(city) {
            self.favorite_status = FavoriteStatus::Idle;
        }
    }
}
