use serde::Serialize;
use serde_json::Number;

pub const CELSIUS: &str = "°C";
pub const PERCENT: &str = "%";
pub const AQI_SCALE: &str = "AQI (1(Best)-5(Worst) scale)";

/// Used when the upstream omits the weather description.
pub const NO_DESCRIPTION: &str = "No description";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions as reported upstream. `None` means the field was absent.
///
/// Numbers are kept as JSON numbers so integers stay integers in the output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature: Option<Number>,
    pub feels_like: Option<Number>,
    pub temp_min: Option<Number>,
    pub temp_max: Option<Number>,
    pub humidity: Option<Number>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirQuality {
    pub aqi: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub value: Option<Number>,
    pub unit: &'static str,
}

impl Measurement {
    pub fn new(value: Option<Number>, unit: &'static str) -> Self {
        Self { value, unit }
    }
}

/// Response payload for one city lookup. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityWeather {
    pub city: String,
    pub temperature: Measurement,
    pub feels_like: Measurement,
    pub temp_min: Measurement,
    pub temp_max: Measurement,
    pub humidity: Measurement,
    pub weather_description: String,
    pub aqi: Measurement,
}

impl CityWeather {
    pub fn assemble(city: impl Into<String>, weather: WeatherSnapshot, air: AirQuality) -> Self {
        Self {
            city: city.into(),
            temperature: Measurement::new(weather.temperature, CELSIUS),
            feels_like: Measurement::new(weather.feels_like, CELSIUS),
            temp_min: Measurement::new(weather.temp_min, CELSIUS),
            temp_max: Measurement::new(weather.temp_max, CELSIUS),
            humidity: Measurement::new(weather.humidity, PERCENT),
            weather_description: weather
                .description
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            aqi: Measurement::new(air.aqi, AQI_SCALE),
        }
    }
}
