use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

/// Errors that can occur while fetching weather.
#[derive(Debug)]
pub enum WeatherError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response.
    Parse(String),
    /// The fetch did not finish within the configured bound.
    Timeout(Duration),
    /// Nothing has been fetched successfully yet.
    NoData,
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherError::Config(msg) => write!(f, "config error: {msg}"),
            WeatherError::Network(msg) => write!(f, "network error: {msg}"),
            WeatherError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            WeatherError::Parse(msg) => write!(f, "parse error: {msg}"),
            WeatherError::Timeout(after) => {
                write!(f, "weather fetch timed out after {}s", after.as_secs_f32())
            }
            WeatherError::NoData => write!(f, "no weather data available"),
        }
    }
}

impl std::error::Error for WeatherError {}

/// Current conditions as reported by a provider, before unit conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Detailed status text, e.g. "light rain".
    pub status: String,
    pub temperature_kelvin: f64,
    /// Metres per second.
    pub wind_speed: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Fetches current conditions at the given coordinates.
    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Observation, WeatherError>;
}
