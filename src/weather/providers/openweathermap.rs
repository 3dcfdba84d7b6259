//! OpenWeatherMap provider using the current weather endpoint.
//!
//! Always requests standard units (kelvin, m/s); the dashboard converts the
//! temperature itself so wind speed keeps one unit whatever the user picks.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::weather::{Observation, WeatherError, WeatherProvider};

// ============================================================================
// OpenWeatherMap API Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct CurrentResponse {
    #[serde(default)]
    weather: Vec<Condition>,
    main: Main,
    wind: Wind,
}

#[derive(Deserialize, Debug)]
struct Condition {
    description: String,
}

#[derive(Deserialize, Debug)]
struct Main {
    temp: f64,
    humidity: u8,
}

#[derive(Deserialize, Debug)]
struct Wind {
    speed: f64,
}

impl From<CurrentResponse> for Observation {
    fn from(response: CurrentResponse) -> Self {
        let status = response
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .unwrap_or_else(|| "unknown".to_string());
        Observation {
            status,
            temperature_kelvin: response.main.temp,
            wind_speed: response.wind.speed,
            humidity: response.main.humidity,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct OpenWeatherMapProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenWeatherMapProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, WeatherError> {
        if api_key.trim().is_empty() {
            return Err(WeatherError::Config("OpenWeatherMap API key is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Config(e.to_string()))?;
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    fn name(&self) -> &str {
        "openweathermap"
    }

    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Observation, WeatherError> {
        info!("OpenWeatherMap request: lat={latitude}, lon={longitude}");

        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "standard".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let status = response.status();
        debug!("OpenWeatherMap response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("OpenWeatherMap API error: {} - {}", status, truncate_body(&body));
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        let parsed: CurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;
        Ok(parsed.into())
    }
}
