use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    clock::{local_clock, shifted_clock},
    error::QueryError,
    icon::pick_icon,
    model::{WeatherView, round_temperature},
};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// `base_url` is scheme and host only, e.g. `https://api.openweathermap.org`.
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_current(&self, city: &str) -> Result<WeatherView, QueryError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| QueryError::Transport(format!("request to OpenWeather failed: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            QueryError::Transport(format!("failed to read OpenWeather response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(QueryError::NotFound {
                status: status.as_u16(),
                message: provider_message(&body),
            });
        }

        let view = normalize_body(&body, Utc::now())?;
        debug!(
            city = %view.city,
            country = %view.country,
            temperature_c = view.temperature_c,
            icon = %view.icon,
            "OpenWeather current conditions"
        );

        Ok(view)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherView, QueryError> {
        let result = self.fetch_current(city).await;

        if let Err(err) = &result {
            warn!(kind = err.kind(), error = %err, city, "current weather query failed");
        }

        result
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
    coord: OwCoord,
    /// Shift from UTC in seconds.
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

/// Parse a 2xx body into a [`WeatherView`], with `now` as the caller's
/// instant for the local clock.
pub fn normalize_body(body: &str, now: DateTime<Utc>) -> Result<WeatherView, QueryError> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).map_err(|e| QueryError::Malformed(e.to_string()))?;

    normalize(parsed, now)
}

fn normalize(parsed: OwCurrentResponse, now: DateTime<Utc>) -> Result<WeatherView, QueryError> {
    let condition = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.main)
        .ok_or_else(|| QueryError::Malformed("`weather` array is empty".to_string()))?;

    let offset = parsed.timezone;
    let clock = |epoch: i64, field: &str| {
        shifted_clock(epoch, offset)
            .ok_or_else(|| QueryError::Malformed(format!("`{field}` is out of range")))
    };

    let sunrise = clock(parsed.sys.sunrise, "sys.sunrise")?;
    let sunset = clock(parsed.sys.sunset, "sys.sunset")?;
    let local_time = local_clock(now, offset)
        .ok_or_else(|| QueryError::Malformed("`timezone` is out of range".to_string()))?;

    // Thresholds see the raw reading; the display uses the rounded one.
    let icon = pick_icon(&condition, parsed.main.temp);

    Ok(WeatherView {
        temperature_c: round_temperature(parsed.main.temp),
        city: parsed.name,
        country: parsed.sys.country,
        latitude: parsed.coord.lat,
        longitude: parsed.coord.lon,
        humidity_pct: parsed.main.humidity,
        wind_speed_kmh: parsed.wind.speed,
        sunrise,
        sunset,
        local_time,
        condition,
        icon,
    })
}

/// The provider's `message` field, or a truncated raw body.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
