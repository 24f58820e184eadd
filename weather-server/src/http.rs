//! HTTP surface: `GET /weather?city=<name>`.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use cityweather_core::{CityWeather, WeatherError, WeatherProvider, city_weather};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(provider: impl Into<Arc<dyn WeatherProvider>>) -> Self {
        Self {
            provider: provider.into(),
        }
    }
}

/// JSON body for every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug)]
pub enum ApiError {
    InvalidQuery(QueryRejection),
    MissingCity,
    Weather(WeatherError),
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        ApiError::Weather(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::InvalidQuery(rejection) => (rejection.status(), rejection.body_text()),
            ApiError::MissingCity => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Missing required query parameter: city".to_string(),
            ),
            ApiError::Weather(err) => {
                let status =
                    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, err.to_string())
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Value of the last `city` pair; repeated parameters do not conflict.
fn city_param(pairs: Vec<(String, String)>) -> Option<String> {
    pairs
        .into_iter()
        .rev()
        .find(|(key, _)| key == "city")
        .map(|(_, value)| value)
}

/// GET /weather - current weather and air quality for a city
async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<CityWeather>, ApiError> {
    let Query(pairs) = query.map_err(ApiError::InvalidQuery)?;
    let city = city_param(pairs).ok_or(ApiError::MissingCity)?;

    match city_weather(&*state.provider, &city).await {
        Ok(report) => Ok(Json(report)),
        Err(err) => {
            warn!(
                %city,
                stage = ?err.stage(),
                status = err.status_code(),
                "city lookup failed"
            );
            Err(err.into())
        }
    }
}

pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let addr = listener
        .local_addr()
        .context("Failed to read listener address")?;
    info!("Weather API listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
