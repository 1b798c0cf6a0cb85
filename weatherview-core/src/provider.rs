use crate::{Config, QueryError, WeatherView, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions for a free-text city name.
///
/// One call is one attempt: implementations do not retry or cache.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherView, QueryError>;
}

/// Construct the provider from config.
///
/// Fails when no API key is configured, so an empty credential is never sent.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    let provider = OpenWeatherProvider::with_base_url(
        api_key.to_owned(),
        config.base_url.clone(),
        config.timeout(),
    )?;

    Ok(Box::new(provider))
}
