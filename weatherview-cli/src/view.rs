//! Human-friendly rendering of the query state.

use std::fmt::Write as _;

use weatherview_core::{IconCategory, QueryState, WeatherView};

pub const HEADING: &str = "Weather Details";
pub const PROMPT: &str = "Search City (Enter to search, Ctrl-D to quit) > ";

fn glyph(icon: IconCategory) -> &'static str {
    match icon {
        IconCategory::Clear => "🌤",
        IconCategory::Cloudy => "☁",
        IconCategory::Rainy => "🌧",
        IconCategory::Drizzle => "🌦",
        IconCategory::Snow => "❄",
        IconCategory::Hot => "☀",
    }
}

/// Render one state as a block of text.
pub fn render(state: &QueryState) -> String {
    match state {
        QueryState::Loading => "Loading...\n".to_string(),
        QueryState::ShowingError(err) => format!("{}\n", err.user_message()),
        QueryState::Showing(view) => render_details(view),
    }
}

fn render_details(view: &WeatherView) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "  {}  {}°C", glyph(view.icon), view.temperature_c);
    let _ = writeln!(out, "  {}", view.city);
    let _ = writeln!(out, "  {}", view.country);
    let _ = writeln!(out, "  Local Time: {}", view.local_time);
    let _ = writeln!(out, "  Sunrise: {}   Sunset: {}", view.sunrise, view.sunset);
    let _ = writeln!(out, "  Latitude {}   Longitude {}", view.latitude, view.longitude);
    let _ = writeln!(
        out,
        "  Humidity {}%   Wind speed {} km/h",
        view.humidity_pct, view.wind_speed_kmh
    );

    out
}
