use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::GeolocationError;
use crate::model::Coordinate;

pub const IP_LOOKUP_URL: &str = "http://ip-api.com/json";

/// Host position capability, one shot.
pub trait Geolocator: Send + Sync {
    fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Always answers with the same position (config `fixed`).
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinate);

impl Geolocator for FixedGeolocator {
    fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Ok(self.0)
    }
}

/// Approximate position from the public IP address.
pub struct IpGeolocator {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct IpLookup {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

impl IpGeolocator {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, GeolocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GeolocationError::Failed(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Geolocator for IpGeolocator {
    fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        let lookup: IpLookup = self
            .client
            .get(&self.endpoint)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| {
                warn!(error = %e, "IP geolocation lookup failed");
                GeolocationError::Failed(e.to_string())
            })?;

        parse_lookup(lookup)
    }
}

fn parse_lookup(lookup: IpLookup) -> Result<Coordinate, GeolocationError> {
    if lookup.status != "success" {
        let msg = lookup
            .message
            .unwrap_or_else(|| format!("lookup status '{}'", lookup.status));
        return Err(GeolocationError::Failed(msg));
    }
    match (lookup.lat, lookup.lon) {
        (Some(lat), Some(lon)) => {
            debug!(lat, lon, "resolved position from IP");
            Ok(Coordinate::new(lat, lon))
        }
        _ => Err(GeolocationError::Failed(
            "lookup returned no coordinates".to_string(),
        )),
    }
}

/// Asks `geolocator` for a position; `None` means the host has no support.
pub fn locate(geolocator: Option<&dyn Geolocator>) -> Result<Coordinate, GeolocationError> {
    match geolocator {
        Some(g) => g.current_position(),
        None => Err(GeolocationError::Unsupported),
    }
}
