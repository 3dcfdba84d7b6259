//! # Startup
//!
//! Everything that can stop the program before or around the dashboard,
//! and the exit code each case maps to:
//!
//! ```text
//! missing API key, bad config, provider setup, fatal first fetch  → 1
//! Ctrl+C while waiting for the location                           → 130
//! ```
//!
//! The API key check runs before the terminal enters raw mode, so its
//! message lands on a normal screen.

use std::fmt;
use std::io;
use std::process::ExitCode;

use crate::core::config::{ConfigError, ResolvedConfig};
use crate::geo::{GeoError, ResolveError};
use crate::tui::controller::TickError;
use crate::weather::WeatherError;

pub const MISSING_API_KEY_MESSAGE: &str = "No OpenWeatherMap API key found.
Please register at openweathermap.org for your key.
Enter it here with the -k argument.";

/// Exit code for a startup interrupted by Ctrl+C (128 + SIGINT).
pub const CANCELLED_EXIT_CODE: u8 = 130;

#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    MissingApiKey,
    Runtime(io::Error),
    Weather(WeatherError),
    Geo(GeoError),
    Location(ResolveError),
    Dashboard(TickError),
}

impl StartupError {
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::Location(ResolveError::Cancelled) => CANCELLED_EXIT_CODE,
            _ => 1,
        }
    }
}

impl From<&StartupError> for ExitCode {
    fn from(error: &StartupError) -> Self {
        ExitCode::from(error.exit_code())
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "{e}"),
            StartupError::MissingApiKey => write!(f, "{MISSING_API_KEY_MESSAGE}"),
            StartupError::Runtime(e) => write!(f, "failed to start runtime: {e}"),
            StartupError::Weather(e) => write!(f, "{e}"),
            StartupError::Geo(e) => write!(f, "{e}"),
            StartupError::Location(e) => write!(f, "{e}"),
            StartupError::Dashboard(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        StartupError::Config(e)
    }
}

impl From<ResolveError> for StartupError {
    fn from(e: ResolveError) -> Self {
        StartupError::Location(e)
    }
}

impl From<TickError> for StartupError {
    fn from(e: TickError) -> Self {
        StartupError::Dashboard(e)
    }
}

/// Returns the API key, or `MissingApiKey` when it is absent or blank.
pub fn require_api_key(config: &ResolvedConfig) -> Result<String, StartupError> {
    match config.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => Err(StartupError::MissingApiKey),
    }
}
