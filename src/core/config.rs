//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.nimbus/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! `--save-config` (or passing `--api-key`) writes the effective CLI values
//! back into that file.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::TemperatureUnit;
use crate::core::refresh::DEFAULT_REFRESH_INTERVAL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct NimbusConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_unit: Option<TemperatureUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_ms: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_delay_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TICK_MS: u64 = 100;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_OPENWEATHERMAP_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_GEO_URL: &str = "https://freegeoip.app/json/";
/// Minute 0 is then never the only qualifying minute of the hour.
pub const MAX_REFRESH_INTERVAL: u32 = 59;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// `None` means the dashboard cannot start; main reports it before
    /// touching the terminal.
    pub api_key: Option<String>,
    pub temp_unit: TemperatureUnit,
    pub refresh_interval: u32,
    pub tick: Duration,
    pub fetch_timeout: Duration,
    pub weather_base_url: String,
    pub geo_url: String,
    pub retry_delay: Duration,
}

/// Values supplied on the command line (None = flag not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_key: Option<String>,
    pub temp_unit: Option<TemperatureUnit>,
    pub refresh_interval: Option<u32>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    NoHomeDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
            ConfigError::NoHomeDir => write!(f, "could not determine home directory"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.nimbus`, where the config and log file live.
pub fn nimbus_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".nimbus"))
}

/// Returns the path to `~/.nimbus/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    nimbus_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.nimbus/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NimbusConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NimbusConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NimbusConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NimbusConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<NimbusConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NimbusConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Nimbus Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# temp_unit = "fahrenheit"           # "fahrenheit", "celsius" or "kelvin"
# refresh_interval = 15              # minutes between weather refreshes (1-59)
# tick_ms = 100                      # redraw / input poll cadence

# [openweathermap]
# api_key = "..."                    # Or set OPENWEATHERMAP_API_KEY env var
# base_url = "https://api.openweathermap.org/data/2.5"
# timeout_secs = 10

# [location]
# url = "https://freegeoip.app/json/"
# retry_delay_ms = 0
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Saving
// ============================================================================

/// Folds CLI values into the file config, CLI winning.
pub fn merge_cli(config: &NimbusConfig, cli: &CliOverrides) -> NimbusConfig {
    let mut merged = config.clone();
    if let Some(ref key) = cli.api_key {
        merged.openweathermap.api_key = Some(key.clone());
    }
    if let Some(unit) = cli.temp_unit {
        merged.general.temp_unit = Some(unit);
    }
    if let Some(interval) = cli.refresh_interval {
        merged.general.refresh_interval = Some(interval);
    }
    merged
}

/// Writes `config` to `path`, replacing the commented default if present.
pub fn save_config_to(path: &Path, config: &NimbusConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(ConfigError::Io)?;
    }
    fs::write(path, contents).map_err(ConfigError::Io)?;
    info!("Saved config to {}", path.display());
    Ok(())
}

/// Writes `config` to `~/.nimbus/config.toml` and returns the path used.
pub fn save_config(config: &NimbusConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoHomeDir)?;
    save_config_to(&path, config)?;
    Ok(path)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NimbusConfig, cli: &CliOverrides) -> ResolvedConfig {
    // API key: CLI → env → config. Empty strings count as missing.
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENWEATHERMAP_API_KEY").ok())
        .or_else(|| config.openweathermap.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    // Temperature unit: CLI → env → config → default
    let temp_unit = cli
        .temp_unit
        .or_else(|| {
            std::env::var("NIMBUS_TEMP_UNIT")
                .ok()
                .and_then(|s| TemperatureUnit::parse(&s))
        })
        .or(config.general.temp_unit)
        .unwrap_or_default();

    let refresh_interval = resolve_interval(
        cli.refresh_interval
            .or(config.general.refresh_interval)
            .unwrap_or(DEFAULT_REFRESH_INTERVAL),
    );

    // Geo URL: env → config → default
    let geo_url = std::env::var("NIMBUS_GEO_URL")
        .ok()
        .or_else(|| config.location.url.clone())
        .unwrap_or_else(|| DEFAULT_GEO_URL.to_string());

    let weather_base_url = config
        .openweathermap
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_OPENWEATHERMAP_BASE_URL.to_string());

    ResolvedConfig {
        api_key,
        temp_unit,
        refresh_interval,
        tick: Duration::from_millis(config.general.tick_ms.unwrap_or(DEFAULT_TICK_MS).max(1)),
        fetch_timeout: Duration::from_secs(
            config
                .openweathermap
                .timeout_secs
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
                .max(1),
        ),
        weather_base_url,
        geo_url,
        retry_delay: Duration::from_millis(config.location.retry_delay_ms.unwrap_or(0)),
    }
}

fn resolve_interval(minutes: u32) -> u32 {
    if (1..=MAX_REFRESH_INTERVAL).contains(&minutes) {
        minutes
    } else {
        warn!(
            "refresh_interval {} is outside 1..={}, using {}",
            minutes, MAX_REFRESH_INTERVAL, DEFAULT_REFRESH_INTERVAL
        );
        DEFAULT_REFRESH_INTERVAL
    }
}
