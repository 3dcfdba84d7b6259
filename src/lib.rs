//! Nimbus library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod geo;
pub mod startup;
pub mod tui;
pub mod weather;

#[cfg(test)]
pub mod test_support;

/// Unit used to display temperatures. Providers always report kelvin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
    Kelvin,
}

impl TemperatureUnit {
    /// Single-letter symbol shown after the degree sign.
    pub fn symbol(self) -> char {
        match self {
            TemperatureUnit::Fahrenheit => 'F',
            TemperatureUnit::Celsius => 'C',
            TemperatureUnit::Kelvin => 'K',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Kelvin => "kelvin",
        }
    }

    /// Converts a kelvin reading into this unit, rounded to two decimals.
    pub fn from_kelvin(self, kelvin: f64) -> f64 {
        let value = match self {
            TemperatureUnit::Fahrenheit => (kelvin - 273.15) * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Celsius => kelvin - 273.15,
            TemperatureUnit::Kelvin => kelvin,
        };
        (value * 100.0).round() / 100.0
    }

    /// Parses a unit name case-insensitively (`"Celsius"`, `"kelvin"`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "fahrenheit" | "f" => Some(TemperatureUnit::Fahrenheit),
            "celsius" | "c" => Some(TemperatureUnit::Celsius),
            "kelvin" | "k" => Some(TemperatureUnit::Kelvin),
            _ => None,
        }
    }
}
