use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::geolocation::{FixedGeolocator, Geolocator, IP_LOOKUP_URL, IpGeolocator};
use crate::model::Coordinate;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_BASE_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationSource {
    #[default]
    Ip,
    None,
    Fixed([f64; 2]),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub default_center: [f64; 2],
    pub default_zoom: f64,
    pub base_tile_url: String,
    pub satellite_opacity: f32,
    /// Pixels kept free around the route when fitting the viewport.
    pub fit_padding: f64,
    /// Unset: wait for the backend indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub geolocation: GeolocationSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            default_center: [20.5937, 78.9629],
            default_zoom: 5.0,
            base_tile_url: DEFAULT_BASE_TILE_URL.to_string(),
            satellite_opacity: 0.5,
            fit_padding: 50.0,
            request_timeout_secs: None,
            geolocation: GeolocationSource::Ip,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("", "", "satwatch_route")
        .context("Unable to determine OS config directory")?;
    Ok(proj.config_dir().join("config.json"))
}

impl Config {
    /// Reads `path` (or the default location). A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Unable to read config file: {}", path.display()))?;
        let cfg = Config::from_json(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn from_json(raw: &str) -> Result<Config> {
        let cfg: Config = serde_json::from_str(raw).context("Failed to parse config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_backend(mut self, backend: Option<String>) -> Result<Config> {
        if let Some(url) = backend {
            self.backend_url = url;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.backend_url)
            .with_context(|| format!("Invalid backend URL: {}", self.backend_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Backend URL must use http or https: {}", self.backend_url);
        }
        if !(0.0..=1.0).contains(&self.satellite_opacity) {
            bail!("satellite_opacity must be within 0..=1");
        }
        if self.fit_padding < 0.0 {
            bail!("fit_padding must be >= 0");
        }
        Ok(())
    }

    pub fn center(&self) -> Coordinate {
        self.default_center.into()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn geolocator(&self) -> Option<Box<dyn Geolocator>> {
        match &self.geolocation {
            GeolocationSource::None => None,
            GeolocationSource::Fixed(p) => Some(Box::new(FixedGeolocator((*p).into()))),
            GeolocationSource::Ip => match IpGeolocator::new(IP_LOOKUP_URL) {
                Ok(g) => Some(Box::new(g)),
                Err(e) => {
                    warn!(error = %e, "IP geolocation unavailable");
                    None
                }
            },
        }
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_merges_with_defaults() {
        let cfg = Config::from_json(r#"{"backend_url": "https://routes.example.org"}"#).unwrap();
        assert_eq!(cfg.backend_url, "https://routes.example.org");
        assert_eq!(cfg.default_zoom, 5.0);
        assert_eq!(cfg.request_timeout(), None);
    }

    #[test]
    fn fixed_geolocation_parses() {
        let cfg = Config::from_json(r#"{"geolocation": {"fixed": [12.97, 77.59]}}"#).unwrap();
        assert_eq!(cfg.geolocation, GeolocationSource::Fixed([12.97, 77.59]));
        assert!(cfg.geolocator().is_some());
    }

    #[test]
    fn geolocation_source_selects_geolocator() {
        assert!(Config::default().geolocator().is_some());

        let cfg = Config::from_json(r#"{"geolocation": "none"}"#).unwrap();
        assert!(cfg.geolocator().is_none());
    }

    #[test]
    fn rejects_non_http_backend() {
        assert!(Config::from_json(r#"{"backend_url": "ftp://x"}"#).is_err());
        assert!(Config::default().with_backend(Some("not a url".into())).is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let p = std::env::temp_dir().join("satwatch_route_missing_config_for_test.json");
        let cfg = Config::load(Some(p.as_path())).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
