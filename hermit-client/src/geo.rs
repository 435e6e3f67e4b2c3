//! IP geolocation lookup for the inbox header
//!
//! Cosmetic display only: the lookup reflects whatever network the inbox
//! runs on, not the visitor's. Any failure is swallowed and replaced by a
//! placeholder, never surfaced as an error.

use serde::Deserialize;
use std::time::Duration;

const GEO_ENDPOINT: &str = "http://ip-api.com/json";
const LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Location summary from the geolocation endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GeoInfo {
    #[serde(default)]
    pub country: String,
    #[serde(default, rename = "regionName")]
    pub region: String,
    #[serde(default)]
    pub city: String,
    /// IP the endpoint resolved the location for
    #[serde(default)]
    pub query: String,
}

impl GeoInfo {
    /// Fallback value shown when the lookup fails
    pub fn placeholder() -> Self {
        Self {
            country: "Unknown".to_string(),
            region: String::new(),
            city: String::new(),
            query: String::new(),
        }
    }

    /// One-line display string, e.g. "Ottawa, Canada"
    pub fn summary(&self) -> String {
        if self.city.is_empty() {
            self.country.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }
}

/// Look up the current network's location; never fails
pub async fn lookup() -> GeoInfo {
    match fetch().await {
        Ok(info) => info,
        Err(e) => {
            tracing::debug!("Geolocation lookup failed: {e}");
            GeoInfo::placeholder()
        }
    }
}

async fn fetch() -> Result<GeoInfo, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
        .build()?;

    client
        .get(GEO_ENDPOINT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}
