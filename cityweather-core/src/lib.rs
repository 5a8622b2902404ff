//! Core library for the `cityweather` widget.
//!
//! This crate defines:
//! - Shared domain models (cities, readings, favorites)
//! - Clients for the weather and geocoding APIs
//! - The session store and its transitions
//! - Pure presentation: unit conversion, colour cue, map markers
//! - Configuration & credentials handling
//!
//! It is used by `cityweather-cli`, but holds no terminal code so another
//! front end can drive the same [`Session`].

pub mod config;
pub mod error;
pub mod favorites;
pub mod map;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod reorder;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::LookupError;
pub use favorites::Favorites;
pub use map::{MapView, Marker, TileKey, TileSource};
pub use model::{City, Coordinates, Favorite, Kelvin, TemperatureReading};
pub use presentation::{Rgb, Screen, background_color, celsius, format_celsius, to_kelvin};
pub use provider::{Geocoder, WeatherProvider};
pub use reorder::{ROW_HEIGHT_PX, index_from_offset};
pub use session::Session;
pub use store::{Action, Effect, FavoriteStatus, LiveReading, RequestId, Store};
