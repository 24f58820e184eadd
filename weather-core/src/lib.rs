//! Core library for the `cityweather` service.
//!
//! This crate defines:
//! - Startup configuration (API key, upstream base URL, listen address)
//! - The upstream provider abstraction and its OpenWeather implementation
//! - The city lookup pipeline and the response payload it produces
//!
//! It is used by `cityweather-server`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;

pub use config::Config;
pub use error::{Stage, WeatherError};
pub use model::{AirQuality, CityWeather, Coordinates, Measurement, WeatherSnapshot};
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use report::city_weather;
