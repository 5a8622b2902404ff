//! Async driver around [`Store`].
//!
//! The session owns the store and is the only thing that mutates it. Effects
//! returned by transitions run as spawned tasks; each task reports back
//! through a channel and its completion is dispatched like any other action.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::{
    Config, LookupError,
    map::{MapView, TileSource},
    presentation::Screen,
    provider::{Geocoder, WeatherProvider, geocoder_from_config, weather_provider_from_config},
    store::{Action, Effect, Store},
};

#[derive(Debug)]
pub struct Session {
    store: Store,
    weather: Arc<dyn WeatherProvider>,
    geocoder: Arc<dyn Geocoder>,
    tiles: TileSource,
    completions_tx: mpsc::UnboundedSender<Action>,
    completions_rx: mpsc::UnboundedReceiver<Action>,
    in_flight: usize,
}

impl Session {
    pub fn new(weather: Arc<dyn WeatherProvider>, geocoder: Arc<dyn Geocoder>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            store: Store::new(),
            weather,
            geocoder,
            tiles: TileSource::default(),
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let weather = weather_provider_from_config(config)?;
        let geocoder = geocoder_from_config(config)?;

        Ok(Self::new(Arc::new(weather), Arc::new(geocoder))
            .with_tiles(TileSource::new(config.tile_url.clone())))
    }

    pub fn with_tiles(mut self, tiles: TileSource) -> Self {
        self.tiles = tiles;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn screen(&self) -> Screen {
        Screen::from_store(&self.store)
    }

    pub fn map(&self) -> MapView {
        MapView::from_favorites(self.store.favorites(), self.tiles.clone())
    }

    /// Requests still waiting for a reply, including ones whose reply will be discarded.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Applies `action` and starts whatever request it asks for.
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, action: Action) {
        if let Some(effect) = self.store.dispatch(action) {
            self.spawn(effect);
        }
    }

    /// Every spawned request sends exactly one completion, even if the
    /// provider panics, so `in_flight` always drains.
    fn spawn(&mut self, effect: Effect) {
        let tx = self.completions_tx.clone();
        self.in_flight += 1;

        match effect {
            Effect::FetchTemperature { city, request } => {
                let weather = Arc::clone(&self.weather);
                tokio::spawn(async move {
                    let lookup =
                        tokio::spawn(async move { weather.current_temperature(&city).await });
                    let result = lookup
                        .await
                        .unwrap_or_else(|e| Err(LookupError::task_failed("Weather lookup", e)));
                    // The receiver lives as long as the session.
                    let _ = tx.send(Action::TemperatureFetched { request, result });
                });
            }
            Effect::Geocode { city, request } => {
                let geocoder = Arc::clone(&self.geocoder);
                let query = city.as_str().to_string();
                tokio::spawn(async move {
                    let lookup = tokio::spawn(async move { geocoder.locate(&query).await });
                    let result = lookup
                        .await
                        .unwrap_or_else(|e| Err(LookupError::task_failed("Geocoding", e)));
                    let _ = tx.send(Action::GeocodeResolved {
                        city,
                        request,
                        result,
                    });
                });
            }
        }
    }

    /// Waits for the next request to finish and applies its result.
    /// Returns `false` straight away when nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }

        match self.completions_rx.recv().await {
            Some(action) => {
                self.in_flight -= 1;
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Applies completions that have already arrived without waiting.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.completions_rx.try_recv() {
            self.in_flight -= 1;
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Runs until every outstanding request has completed.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
        debug!("session settled");
    }
}
