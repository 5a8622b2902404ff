use cityweather_core::{MapView, Rgb, Screen};

/// Two-cell block painted in `color` (24-bit ANSI background).
fn swatch(color: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m    \x1b[0m", color.r, color.g, color.b)
}

pub fn screen(screen: &Screen) {
    println!();
    println!("{} Weather App  {}", swatch(screen.background), screen.background.hex());

    match (&screen.city, &screen.temperature) {
        (Some(city), Some(temperature)) => {
            println!("City: {city}");
            println!("Temperature: {temperature}");
        }
        (Some(city), None) => println!("City: {city}"),
        (None, _) => println!("No city selected."),
    }

    if let Some(status) = &screen.status {
        println!("! {status}");
    }

    println!();
    println!("My Favorite Cities");
    if screen.favorites.is_empty() {
        println!("  (none yet)");
    }
    for (row, favorite) in screen.favorites.iter().enumerate() {
        println!("  {}. {}: {}", row + 1, favorite.city, favorite.temperature);
    }

    if let Some(notice) = &screen.favorite_notice {
        println!("* {notice}");
    }
}

pub fn map(map: &MapView) {
    println!();
    println!(
        "Map centred at ({:.3}, {:.3}), zoom {}",
        map.center.latitude, map.center.longitude, map.zoom
    );

    if map.markers.is_empty() {
        println!("  No pinned cities.");
    }
    for marker in &map.markers {
        println!(
            "  [{:>8.3}, {:>8.3}] {}  tile {}",
            marker.position.latitude,
            marker.position.longitude,
            marker.popup,
            map.marker_tile_url(marker)
        );
    }

    println!("Tiles: {}", map.tiles.attribution);
}
