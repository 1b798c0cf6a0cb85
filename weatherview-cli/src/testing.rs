//! Test doubles shared by the binary's unit tests.

use std::sync::Mutex;

use weatherview_core::{IconCategory, QueryError, WeatherProvider, WeatherView};

/// Answers from memory: "Atlantis" is unknown, every other city succeeds.
#[derive(Debug, Default)]
pub struct FakeProvider {
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn view(city: &str) -> WeatherView {
    WeatherView {
        temperature_c: 18,
        city: city.to_string(),
        country: "XX".into(),
        latitude: 1.5,
        longitude: 2.5,
        humidity_pct: 50,
        wind_speed_kmh: 2.0,
        sunrise: "06:00".into(),
        sunset: "18:00".into(),
        local_time: "12:00".into(),
        condition: "Clouds".into(),
        icon: IconCategory::Clear,
    }
}

#[async_trait::async_trait]
impl WeatherProvider for FakeProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherView, QueryError> {
        self.calls.lock().unwrap().push(city.to_string());
        if city == "Atlantis" {
            Err(QueryError::NotFound { status: 404, message: "city not found".into() })
        } else {
            Ok(view(city))
        }
    }
}
