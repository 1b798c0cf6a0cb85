use serde::{Deserialize, Serialize};

use crate::icon::IconCategory;

/// Normalized result of one successful current-weather query.
///
/// Only ever built from a complete provider response; a new query replaces
/// it as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherView {
    pub temperature_c: i32,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub humidity_pct: u8,
    pub wind_speed_kmh: f64,
    /// `HH:MM` at the location.
    pub sunrise: String,
    pub sunset: String,
    pub local_time: String,
    /// Provider condition text, e.g. "Clouds".
    pub condition: String,
    pub icon: IconCategory,
}

/// Round half toward positive infinity, so `-2.5` becomes `-2`.
///
/// `0.49999999999999994` rounds to 1 here (the `+ 0.5` is inexact) where a
/// browser's `Math.round` gives 0. Provider readings never carry that many
/// digits, so the difference is accepted.
pub fn round_temperature(celsius: f64) -> i32 {
    (celsius + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_halves_up() {
        assert_eq!(round_temperature(2.5), 3);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(31.49), 31);
        assert_eq!(round_temperature(-0.4), 0);
    }

    #[test]
    fn largest_double_below_half_rounds_up() {
        assert_eq!(round_temperature(0.499_999_999_999_999_94), 1);
    }
}
