use std::fmt;

use thiserror::Error;

/// Which upstream call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Geocoding,
    Weather,
    AirQuality,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geocoding => "geocoding data",
            Stage::Weather => "weather data",
            Stage::AirQuality => "air quality data",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single city lookup. Every variant is terminal for the request.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The upstream answered with a non-success status.
    #[error("Error retrieving {stage}")]
    Upstream { stage: Stage, status: u16 },

    /// Geocoding succeeded but matched nothing.
    #[error("City not found")]
    NotFound,

    #[error("Error retrieving {stage}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error retrieving {stage}")]
    Decode {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },
}

impl WeatherError {
    /// Status to report to the caller: the upstream's own status where there
    /// is one, 404 for an unknown city, 502 when the upstream was unusable.
    pub fn status_code(&self) -> u16 {
        match self {
            WeatherError::Upstream { status, .. } => *status,
            WeatherError::NotFound => 404,
            WeatherError::Transport { .. } | WeatherError::Decode { .. } => 502,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            WeatherError::Upstream { stage, .. }
            | WeatherError::Transport { stage, .. }
            | WeatherError::Decode { stage, .. } => Some(*stage),
            WeatherError::NotFound => None,
        }
    }
}
