use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::{Number, Value};
use tracing::{debug, instrument, warn};

use crate::{
    error::{Stage, WeatherError},
    model::{AirQuality, Coordinates, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const WEATHER_PATH: &str = "/data/2.5/weather";
const AIR_POLLUTION_PATH: &str = "/data/2.5/air_pollution";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        stage: Stage,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| WeatherError::Transport { stage, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Transport { stage, source })?;

        if !status.is_success() {
            warn!(
                %stage,
                status = status.as_u16(),
                body = %truncate_body(&body),
                "OpenWeather request failed"
            );
            return Err(WeatherError::Upstream {
                stage,
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&body).map_err(|source| {
            warn!(%stage, error = %source, "failed to parse OpenWeather response");
            WeatherError::Decode { stage, source }
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), level = "debug")]
    async fn geocode(&self, city: &str) -> Result<Vec<Coordinates>, WeatherError> {
        let hits: Vec<OwGeoEntry> = self
            .fetch(
                Stage::Geocoding,
                GEOCODING_PATH,
                &[("q", city.to_string()), ("limit", "1".to_string())],
            )
            .await?;

        debug!(hits = hits.len(), "geocoding finished");
        Ok(hits.into_iter().map(Coordinates::from).collect())
    }

    #[instrument(skip(self), level = "debug")]
    async fn current_weather(&self, at: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        let mut query = coordinate_query(at);
        query.push(("units", "metric".to_string()));

        let parsed: OwCurrentResponse = self.fetch(Stage::Weather, WEATHER_PATH, &query).await?;
        Ok(parsed.into())
    }

    #[instrument(skip(self), level = "debug")]
    async fn air_quality(&self, at: Coordinates) -> Result<AirQuality, WeatherError> {
        let parsed: OwAirPollutionResponse = self
            .fetch(Stage::AirQuality, AIR_POLLUTION_PATH, &coordinate_query(at))
            .await?;
        Ok(parsed.into())
    }
}

fn coordinate_query(at: Coordinates) -> Vec<(&'static str, String)> {
    vec![
        ("lat", at.latitude.to_string()),
        ("lon", at.longitude.to_string()),
    ]
}

// Upstream payloads. Anything below the top level may be missing or null, and
// leaf values of an unexpected type are read as missing.

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    lat: f64,
    lon: f64,
}

impl From<OwGeoEntry> for Coordinates {
    fn from(entry: OwGeoEntry) -> Self {
        Coordinates {
            latitude: entry.lat,
            longitude: entry.lon,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct OwMain {
    #[serde(default, deserialize_with = "lenient_number")]
    temp: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    feels_like: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    temp_min: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    temp_max: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    humidity: Option<Number>,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    #[serde(default, deserialize_with = "lenient_string")]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: Option<OwMain>,
    weather: Option<Vec<OwCondition>>,
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(parsed: OwCurrentResponse) -> Self {
        let main = parsed.main.unwrap_or_default();
        let description = parsed
            .weather
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|w| w.description);

        WeatherSnapshot {
            temperature: main.temp,
            feels_like: main.feels_like,
            temp_min: main.temp_min,
            temp_max: main.temp_max,
            humidity: main.humidity,
            description,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwAirMain {
    #[serde(default, deserialize_with = "lenient_number")]
    aqi: Option<Number>,
}

#[derive(Debug, Deserialize)]
struct OwAirEntry {
    main: Option<OwAirMain>,
}

#[derive(Debug, Deserialize)]
struct OwAirPollutionResponse {
    list: Option<Vec<OwAirEntry>>,
}

impl From<OwAirPollutionResponse> for AirQuality {
    fn from(parsed: OwAirPollutionResponse) -> Self {
        let aqi = parsed
            .list
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|entry| entry.main)
            .and_then(|main| main.aqi);

        AirQuality { aqi }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(n),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
