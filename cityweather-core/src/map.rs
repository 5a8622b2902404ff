//! World map of pinned cities, derived from the favorites list.

use serde::Serialize;
use std::f64::consts::PI;

use crate::{favorites::Favorites, model::Coordinates, presentation::format_celsius};

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";
const OSM_SUBDOMAINS: &[&str] = &["a", "b", "c"];

pub const MAP_CENTER: Coordinates = Coordinates {
    latitude: 20.505,
    longitude: 50.09,
};
pub const MAP_ZOOM: u8 = 2;

/// Deepest zoom served by standard raster tile endpoints.
pub const MAX_ZOOM: u8 = 22;

/// Latitude limit of the Web Mercator projection.
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileKey {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileKey {
    /// Tile containing `point` at `zoom`, with zoom capped at [`MAX_ZOOM`].
    pub fn containing(point: Coordinates, zoom: u8) -> Self {
        let zoom = zoom.min(MAX_ZOOM);
        let n = 2_f64.powi(i32::from(zoom));
        let max_index = n - 1.0;

        let lat = point.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let lon = (point.longitude + 180.0).rem_euclid(360.0);

        let x = (lon / 360.0 * n).floor().clamp(0.0, max_index);
        let y = ((1.0 - lat.tan().asinh() / PI) / 2.0 * n)
            .floor()
            .clamp(0.0, max_index);

        Self {
            z: zoom,
            x: x as u32,
            y: y as u32,
        }
    }
}

/// Raster tile endpoint plus the attribution it requires.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSource {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileSource {
    fn default() -> Self {
        Self::new(OSM_TILE_URL)
    }
}

impl TileSource {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }

    pub fn tile_url(&self, tile: TileKey) -> String {
        let slot = (u64::from(tile.x) + u64::from(tile.y)) % OSM_SUBDOMAINS.len() as u64;
        let subdomain = OSM_SUBDOMAINS[slot as usize];
        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: Coordinates,
    pub popup: String,
    pub tile: TileKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub tiles: TileSource,
    pub markers: Vec<Marker>,
}

impl MapView {
    pub fn from_favorites(favorites: &Favorites, tiles: TileSource) -> Self {
        let markers = favorites
            .iter()
            .map(|f| Marker {
                position: f.coordinates,
                popup: format!("{}. {}.", f.city, format_celsius(f.temperature)),
                tile: TileKey::containing(f.coordinates, MAP_ZOOM),
            })
            .collect();

        Self {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            tiles,
            markers,
        }
    }

    pub fn marker_tile_url(&self, marker: &Marker) -> String {
        self.tiles.tile_url(marker.tile)
    }
}
