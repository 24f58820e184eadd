use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config, WeatherError,
    model::{AirQuality, Coordinates, WeatherSnapshot},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// The three upstream lookups a city report is built from.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a place name. An empty vec means no match.
    async fn geocode(&self, city: &str) -> Result<Vec<Coordinates>, WeatherError>;

    /// Current conditions in metric units.
    async fn current_weather(&self, at: Coordinates) -> Result<WeatherSnapshot, WeatherError>;

    async fn air_quality(&self, at: Coordinates) -> Result<AirQuality, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    let provider = OpenWeatherProvider::with_base_url(api_key.to_owned(), config.base_url.clone());

    Ok(Box::new(provider))
}
