//! The city lookup pipeline: geocode, then weather, then air quality.
//!
//! Each stage needs the previous one's output, so the calls run strictly in
//! order and a failure stops the chain.

use tracing::{debug, instrument};

use crate::{WeatherError, model::CityWeather, provider::WeatherProvider};

#[instrument(skip(provider))]
pub async fn city_weather<P>(provider: &P, city: &str) -> Result<CityWeather, WeatherError>
where
    P: WeatherProvider + ?Sized,
{
    let at = provider
        .geocode(city)
        .await?
        .into_iter()
        .next()
        .ok_or(WeatherError::NotFound)?;
    debug!(lat = at.latitude, lon = at.longitude, "city resolved");

    let weather = provider.current_weather(at).await?;
    let air = provider.air_quality(at).await?;

    Ok(CityWeather::assemble(city, weather, air))
}
