//! Pure view derivations: unit conversion, the temperature colour cue and the
//! screen snapshot rendered by front ends.

use serde::Serialize;
use std::fmt;

use crate::{
    model::{KELVIN_OFFSET, Kelvin},
    store::{FavoriteStatus, LiveReading, Store},
};

/// Width, in °C above freezing, of the span mapped onto the red channel.
pub const COLOR_SPAN_C: f64 = 40.0;
pub const COLOR_GREEN: u8 = 100;
pub const COLOR_BLUE: u8 = 100;

pub fn celsius(temperature: Kelvin) -> f64 {
    temperature.value() - KELVIN_OFFSET
}

pub fn to_kelvin(celsius: f64) -> Kelvin {
    Kelvin(celsius + KELVIN_OFFSET)
}

/// One decimal, e.g. `10.0°C`.
pub fn format_celsius(temperature: Kelvin) -> String {
    format!("{:.1}°C", celsius(temperature))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Hot/cold background cue: 0 °C maps to red 0, 40 °C to red 255, clamped outside.
/// White when nothing is on screen.
pub fn background_color(temperature: Option<Kelvin>) -> Rgb {
    let Some(temperature) = temperature else {
        return Rgb::WHITE;
    };

    let c = celsius(temperature);
    let red = if c.is_nan() {
        0.0
    } else {
        (c / COLOR_SPAN_C * 255.0).clamp(0.0, 255.0).round()
    };

    Rgb {
        r: red as u8,
        g: COLOR_GREEN,
        b: COLOR_BLUE,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteRow {
    pub city: String,
    pub temperature: String,
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub city: Option<String>,
    pub temperature: Option<String>,
    /// Loading indicator or error for the live reading.
    pub status: Option<String>,
    pub background: Rgb,
    pub favorites: Vec<FavoriteRow>,
    pub favorite_notice: Option<String>,
    pub can_add_favorite: bool,
}

impl Screen {
    pub fn from_store(store: &Store) -> Self {
        let live = store.live();

        let status = match live {
            LiveReading::Loading { city, .. } => Some(format!("Loading weather for {city}...")),
            LiveReading::Failed { error, .. } => Some(error.user_message()),
            LiveReading::Unselected | LiveReading::Displayed(_) => None,
        };

        let favorite_notice = match store.favorite_status() {
            FavoriteStatus::Idle => None,
            FavoriteStatus::Resolving(city) => Some(format!("Locating {city}...")),
            FavoriteStatus::Added(city) => Some(format!("{city} added to favorites.")),
            FavoriteStatus::AlreadyPinned(city) => Some(format!("{city} is already a favorite.")),
            FavoriteStatus::NoTemperature => {
                Some("Wait for the temperature before adding a favorite.".to_string())
            }
            FavoriteStatus::Failed { city, error } => {
                Some(format!("Could not add {city}: {}", error.user_message()))
            }
        };

        let favorites = store
            .favorites()
            .iter()
            .map(|f| FavoriteRow {
                city: f.city.to_string(),
                temperature: format_celsius(f.temperature),
            })
            .collect();

        Self {
            city: live.city().map(ToString::to_string),
            temperature: live.temperature().map(format_celsius),
            status,
            background: background_color(live.temperature()),
            favorites,
            favorite_notice,
            can_add_favorite: live.temperature().is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{City, TemperatureReading};
    use crate::store::{Action, Effect};
    use chrono::Utc;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn celsius_conversion_is_exact_and_reversible() {
        for k in [0.0, 233.15, 273.15, 283.15, 293.15, 310.0, 1_000.5] {
            let c = celsius(Kelvin(k));
            assert!((c - (k - 273.15)).abs() < EPSILON);
            assert!((to_kelvin(c).value() - k).abs() < EPSILON);
        }
    }

    #[test]
    fn formats_one_decimal() {
        assert_eq!(format_celsius(Kelvin(283.15)), "10.0°C");
        assert_eq!(format_celsius(Kelvin(293.15)), "20.0°C");
        assert_eq!(format_celsius(Kelvin(268.15)), "-5.0°C");
    }

    #[test]
    fn red_channel_is_monotonic_within_range() {
        let mut previous = 0u8;
        for step in 0..=40 {
            let color = background_color(Some(to_kelvin(f64::from(step))));
            assert!(color.r >= previous, "red decreased at {step}°C");
            assert_eq!((color.g, color.b), (COLOR_GREEN, COLOR_BLUE));
            previous = color.r;
        }
        assert_eq!(background_color(Some(to_kelvin(0.0))).r, 0);
        assert_eq!(background_color(Some(to_kelvin(40.0))).r, 255);
    }

    #[test]
    fn red_channel_is_clamped_outside_range() {
        assert_eq!(background_color(Some(to_kelvin(-30.0))).r, 0);
        assert_eq!(background_color(Some(to_kelvin(95.0))).r, 255);
    }

    #[test]
    fn no_temperature_is_white() {
        assert_eq!(background_color(None), Rgb::WHITE);
        assert_eq!(Rgb::WHITE.hex(), "#ffffff");
    }

    #[test]
    fn color_renders_as_css() {
        let color = background_color(Some(to_kelvin(30.0)));
        assert_eq!(color.to_string(), "rgb(191, 100, 100)");
        assert_eq!(color.hex(), "#bf6464");
    }

    #[test]
    fn screen_shows_displayed_reading() {
        let mut store = Store::new();
        let london = City::try_from("London").expect("valid city");
        let Some(Effect::FetchTemperature { request, .. }) =
            store.dispatch(Action::SelectCity(london.clone()))
        else {
            panic!("expected fetch");
        };

        let loading = Screen::from_store(&store);
        assert_eq!(loading.status.as_deref(), Some("Loading weather for London..."));
        assert_eq!(loading.background, Rgb::WHITE);
        assert!(!loading.can_add_favorite);

        store.dispatch(Action::TemperatureFetched {
            request,
            result: Ok(TemperatureReading {
                city: london,
                temperature: Kelvin(283.15),
                observation_time: Utc::now(),
            }),
        });

        let screen = Screen::from_store(&store);
        assert_eq!(screen.city.as_deref(), Some("London"));
        assert_eq!(screen.temperature.as_deref(), Some("10.0°C"));
        assert_eq!(screen.status, None);
        assert!(screen.can_add_favorite);
        assert_eq!(screen.background.r, 64);
    }
}
