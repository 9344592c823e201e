use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_CONFIG_FILE, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_RADIUS_KM,
    DEFAULT_URL1, DEFAULT_URL2, DEFAULT_ZOOM, ENV_PREFIX, FALLBACK_CENTER_LAT,
    FALLBACK_CENTER_LON,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[validate(length(min = 1))]
    pub url1: String,

    #[validate(length(min = 1))]
    pub url2: String,

    #[validate(range(min = 1))]
    pub cache_ttl_secs: u64,

    #[validate(range(min = 0.1, max = 500.0))]
    pub radius_km: f64,

    #[validate(range(min = 1, max = 20))]
    pub zoom: u8,

    #[validate(range(min = -90.0, max = 90.0))]
    pub fallback_center_lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub fallback_center_lon: f64,

    #[validate(range(min = 1))]
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url1: DEFAULT_URL1.to_string(),
            url2: DEFAULT_URL2.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            radius_km: DEFAULT_RADIUS_KM,
            zoom: DEFAULT_ZOOM,
            fallback_center_lat: FALLBACK_CENTER_LAT,
            fallback_center_lon: FALLBACK_CENTER_LON,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Defaults, then the TOML file, then `EV_LOCATOR_*` environment variables
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("url1", defaults.url1)?
            .set_default("url2", defaults.url2)?
            .set_default("cache_ttl_secs", defaults.cache_ttl_secs as i64)?
            .set_default("radius_km", defaults.radius_km)?
            .set_default("zoom", defaults.zoom as i64)?
            .set_default("fallback_center_lat", defaults.fallback_center_lat)?
            .set_default("fallback_center_lon", defaults.fallback_center_lon)?
            .set_default("http_timeout_secs", defaults.http_timeout_secs as i64)?;

        builder = match config_file {
            Some(path) => {
                debug!("Reading configuration from {}", path.display());
                builder.add_source(File::from(path).required(true))
            }
            None => builder.add_source(File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides and re-validate
    pub fn with_overrides(
        mut self,
        url1: Option<String>,
        url2: Option<String>,
        radius_km: Option<f64>,
    ) -> Result<Self> {
        if let Some(url1) = url1 {
            self.url1 = url1;
        }
        if let Some(url2) = url2 {
            self.url2 = url2;
        }
        if let Some(radius_km) = radius_km {
            self.radius_km = radius_km;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn fallback_center(&self) -> (f64, f64) {
        (self.fallback_center_lat, self.fallback_center_lon)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
