//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{Local, TimeZone};

use crate::TemperatureUnit;
use crate::core::state::{Location, WeatherSnapshot};
use crate::geo::{GeoError, LocationProvider};
use crate::weather::{Observation, WeatherError, WeatherProvider};

/// The San Francisco location used throughout the tests.
pub fn sample_location() -> Location {
    Location {
        latitude: 37.7,
        longitude: -122.4,
        city: "SF".to_string(),
        region: "CA".to_string(),
        ip: "1.2.3.4".to_string(),
        raw: None,
    }
}

/// A fahrenheit snapshot stamped at 09:`minute`:00 local time.
pub fn sample_snapshot(minute: u32) -> WeatherSnapshot {
    WeatherSnapshot {
        status: "clear sky".to_string(),
        temperature: 61.5,
        temperature_unit: TemperatureUnit::Fahrenheit,
        wind_speed: 4.1,
        humidity: 72,
        fetched_at_minute: minute,
        fetched_at: Local.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap(),
    }
}

/// Fails with a network error `failures` times, then returns [`sample_location`].
pub struct FlakyLocator {
    failures: u32,
    pub attempts: AtomicU32,
}

impl FlakyLocator {
    pub fn new(failures: u32) -> Self {
        Self {
            failures,
            attempts: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl LocationProvider for FlakyLocator {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn locate(&self) -> Result<Location, GeoError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures {
            Err(GeoError::Network(format!("attempt {attempt} refused")))
        } else {
            Ok(sample_location())
        }
    }
}

/// Returns the same observation on every call.
pub struct StaticWeather(pub Observation);

#[async_trait]
impl WeatherProvider for StaticWeather {
    fn name(&self) -> &str {
        "static"
    }

    async fn current_weather(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<Observation, WeatherError> {
        Ok(self.0.clone())
    }
}
