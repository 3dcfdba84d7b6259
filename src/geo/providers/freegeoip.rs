//! freegeoip-style IP geolocation: one `GET`, one JSON object back.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};

use crate::core::state::Location;
use crate::geo::{GeoError, LocationProvider};

pub struct FreeGeoIpLocator {
    url: String,
    client: reqwest::Client,
}

impl FreeGeoIpLocator {
    /// `timeout` bounds each attempt; the resolver decides whether to retry.
    pub fn new(url: String, timeout: Duration) -> Result<Self, GeoError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeoError::Network(e.to_string()))?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl LocationProvider for FreeGeoIpLocator {
    fn name(&self) -> &str {
        "freegeoip"
    }

    async fn locate(&self) -> Result<Location, GeoError> {
        debug!("Geolocation request: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeoError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeoError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(GeoError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let raw: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| GeoError::Parse(e.to_string()))?;
        let mut location: Location =
            serde_json::from_value(raw.clone()).map_err(|e| GeoError::Parse(e.to_string()))?;
        location.raw = Some(raw);
        info!("Located {} ({})", location.display_name(), location.ip);
        Ok(location)
    }
}
