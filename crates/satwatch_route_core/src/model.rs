use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic position in degrees. On the wire it is a `[lat, lon]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance in kilometers (haversine).
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();
        let a = (dlat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Short human-readable form with 2 decimals, e.g. `12.97, 77.59`.
    pub fn approx_label(&self) -> String {
        format!("{:.2}, {:.2}", self.lat, self.lon)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lon]
    }
}

/// Where a route starts: a place name to be geocoded by the backend, or an
/// already resolved position.
#[derive(Debug, Clone, PartialEq)]
pub enum StartLocation {
    Text(String),
    Coordinates(Coordinate),
}

impl StartLocation {
    pub fn text(s: impl Into<String>) -> Self {
        StartLocation::Text(s.into())
    }
}

impl From<Coordinate> for StartLocation {
    fn from(c: Coordinate) -> Self {
        StartLocation::Coordinates(c)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub start: StartLocation,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub coords: Coordinate,
    pub location_name: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    #[serde(default)]
    pub route: Vec<Coordinate>,

    #[serde(rename = "satelliteUrl")]
    pub satellite_url: String,

    #[serde(default)]
    pub hazards: Vec<Hazard>,

    #[serde(rename = "startName")]
    pub start_name: String,

    #[serde(rename = "endName")]
    pub end_name: String,
}

impl RouteResult {
    pub fn distance_km(&self) -> f64 {
        self.route
            .windows(2)
            .map(|w| w[0].distance_km(&w[1]))
            .sum()
    }

    pub fn is_clear(&self) -> bool {
        self.hazards.is_empty()
    }
}
