use std::fmt;

use async_trait::async_trait;

use crate::core::state::Location;

/// Errors from a single location lookup.
///
/// Every variant is retried by the resolver: free geo-IP services drop
/// requests and return garbage under load.
#[derive(Debug)]
pub enum GeoError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service answered with a non-success status.
    Api { status: u16, message: String },
    /// The body wasn't the JSON we expected.
    Parse(String),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::Network(msg) => write!(f, "network error: {msg}"),
            GeoError::Api { status, message } => {
                write!(f, "geolocation API error (HTTP {status}): {message}")
            }
            GeoError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for GeoError {}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Performs one lookup of the caller's location.
    async fn locate(&self) -> Result<Location, GeoError>;
}
