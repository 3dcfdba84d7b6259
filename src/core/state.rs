//! # Dashboard State
//!
//! Domain data shared by the loop, the refresher and the renderer. No
//! terminal types live here.
//!
//! ```text
//! Location          // resolved once at startup, read-only afterwards
//! WeatherSnapshot   // replaced wholesale on every successful refresh
//! UiState           // flags mutated only through update(state, command)
//! Phase             // Starting → Running → Terminated
//! ```

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::TemperatureUnit;
use crate::weather::Observation;

/// Where the machine running the dashboard appears to be.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    #[serde(rename = "region_name", alias = "region")]
    pub region: String,
    pub ip: String,
    /// The provider's full response, kept for the verbose line.
    #[serde(skip)]
    pub raw: Option<serde_json::Value>,
}

impl Location {
    /// `"City, Region"`, as shown in the top-left field.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.city, self.region)
    }

    /// Compact JSON for the verbose diagnostic line: the provider's raw
    /// payload when there is one, otherwise the parsed fields.
    pub fn diagnostic_json(&self) -> String {
        match &self.raw {
            Some(raw) => raw.to_string(),
            None => serde_json::to_string(self)
                .unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}")),
        }
    }
}

/// A complete weather reading. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub status: String,
    pub temperature: f64,
    pub temperature_unit: TemperatureUnit,
    pub wind_speed: f64,
    pub humidity: u8,
    pub fetched_at_minute: u32,
    pub fetched_at: DateTime<Local>,
}

impl WeatherSnapshot {
    pub fn from_observation(
        observation: Observation,
        unit: TemperatureUnit,
        fetched_at: DateTime<Local>,
    ) -> Self {
        Self {
            status: observation.status,
            temperature: unit.from_kelvin(observation.temperature_kelvin),
            temperature_unit: unit,
            wind_speed: observation.wind_speed,
            humidity: observation.humidity,
            fetched_at_minute: fetched_at.minute(),
            fetched_at,
        }
    }

    /// Status text with the first letter upper-cased and the rest lowered.
    pub fn status_label(&self) -> String {
        let mut chars = self.status.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => String::new(),
        }
    }

    pub fn temperature_label(&self) -> String {
        format!("{:.1} °{}", self.temperature, self.temperature_unit.symbol())
    }

    pub fn wind_label(&self) -> String {
        format!("{:.1} m/s", self.wind_speed)
    }

    pub fn humidity_label(&self) -> String {
        format!("{} %", self.humidity)
    }

    pub fn updated_label(&self) -> String {
        format!("Updated: {}", self.fetched_at.format("%I:%M:%S %p"))
    }
}

/// Flags driven by keyboard commands. Owned by the loop controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub running: bool,
    pub verbose: bool,
    /// Set by `r`; consumed (and cleared) at the start of the next tick.
    pub force_refresh_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            running: true,
            verbose: false,
            force_refresh_requested: false,
        }
    }
}

impl UiState {
    /// Returns the pending force-refresh request and clears it.
    pub fn take_force_refresh(&mut self) -> bool {
        std::mem::take(&mut self.force_refresh_requested)
    }
}

/// Lifecycle of the loop controller. `Terminated` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Running,
    Terminated,
}
